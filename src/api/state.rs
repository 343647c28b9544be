//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::user::UserService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}
