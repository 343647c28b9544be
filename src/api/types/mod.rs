//! API transport types: the response envelope and JSON extraction

pub mod envelope;
pub mod json;

pub use envelope::{status_for, ApiError, Envelope, Meta};
pub use json::Json;
