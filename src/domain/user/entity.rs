//! User entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User account entity.
///
/// The password hash and reset key never leave the process: both are skipped
/// during serialization and redacted from `Debug` output.
#[derive(Clone, Serialize)]
pub struct User {
    /// Storage-assigned identifier, immutable once created
    id: i64,
    /// Login email, unique across all users
    email: String,
    /// Password hash in PHC string format
    #[serde(skip_serializing)]
    password_hash: String,
    /// Key required to reset the password without knowing it
    #[serde(skip_serializing)]
    reset_key: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with fresh timestamps.
    pub fn new(
        id: i64,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        reset_key: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
            reset_key,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a user from stored column values.
    pub fn from_storage(
        id: i64,
        email: String,
        password_hash: String,
        reset_key: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            reset_key,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn reset_key(&self) -> Option<&str> {
        self.reset_key.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the password hash.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Replace the reset key.
    pub fn set_reset_key(&mut self, reset_key: impl Into<String>) {
        self.reset_key = Some(reset_key.into());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// Hand-written so neither the hash nor the reset key can end up in logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("reset_key", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Creation record handed to the repository; the store assigns the id.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub reset_key: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("reset_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(1, "user@example.com", "hashed_password", Some("key".into()))
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user();

        assert_eq!(user.id(), 1);
        assert_eq!(user.email(), "user@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.reset_key(), Some("key"));
    }

    #[test]
    fn test_user_update_password() {
        let mut user = create_test_user();
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_password_hash("new_hash");
        assert_eq!(user.password_hash(), "new_hash");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_user_serialization_excludes_secrets() {
        let user = create_test_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("user@example.com"));
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("reset_key"));
    }

    #[test]
    fn test_user_debug_redacts_secrets() {
        let user = create_test_user();

        let debug = format!("{:?}", user);
        assert!(!debug.contains("hashed_password"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_new_user_debug_redacts_secrets() {
        let new_user = NewUser {
            email: "user@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            reset_key: "key".to_string(),
        };

        let debug = format!("{:?}", new_user);
        assert!(!debug.contains("hashed_password"));
        assert!(!debug.contains("\"key\""));
    }
}
