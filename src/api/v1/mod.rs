//! Versioned user API

pub mod users;

pub use users::create_users_router;
