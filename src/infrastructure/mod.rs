//! Infrastructure layer - storage, hashing and logging implementations

pub mod logging;
pub mod migrations;
pub mod user;
