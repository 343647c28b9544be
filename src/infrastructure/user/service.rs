//! User service: registration, authentication and password management

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

use crate::domain::user::{ListOrder, NewUser, User, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

const RESET_KEY_LENGTH: usize = 32;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request for resetting a forgotten password with a reset key
#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub reset_key: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Request for changing a password with the current one
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// User service composing the repository and the password hasher.
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user.
    ///
    /// Returns the created user together with its one-time reset key; the
    /// key is only ever handed out here.
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, String), DomainError> {
        require_field(&request.email, "email")?;
        require_field(&request.password, "password")?;
        require_field(&request.confirm_password, "confirm_password")?;

        if request.password != request.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let reset_key = generate_reset_key();

        let user = self
            .repository
            .create(NewUser {
                email: request.email,
                password_hash,
                reset_key: reset_key.clone(),
            })
            .await?;

        info!(user_id = user.id(), email = user.email(), "user registered");

        Ok((user, reset_key))
    }

    /// Authenticate a user by email and password.
    ///
    /// `UserNotFound` from the lookup propagates unchanged; a hash mismatch
    /// is `InvalidPassword`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        require_field(email, "email")?;
        require_field(password, "password")?;

        let user = self.repository.get_by_email(email).await?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::InvalidPassword);
        }

        info!(user_id = user.id(), "user authenticated");

        Ok(user)
    }

    /// Reset a password using the stored reset key.
    ///
    /// On success the key is rotated; the fresh key is returned alongside
    /// the user.
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<(User, String), DomainError> {
        require_field(&request.email, "email")?;
        require_field(&request.reset_key, "reset_key")?;
        require_field(&request.new_password, "new_password")?;
        require_field(&request.confirm_password, "confirm_password")?;

        if request.new_password != request.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }

        let user = self.repository.get_by_email(&request.email).await?;

        if user.reset_key() != Some(request.reset_key.as_str()) {
            return Err(DomainError::InvalidResetKey);
        }

        let password_hash = self.hasher.hash(&request.new_password)?;
        let next_key = generate_reset_key();

        self.repository
            .update_credentials(user.id(), &password_hash, &next_key)
            .await?;

        info!(user_id = user.id(), "password reset");

        let user = self.repository.get(user.id()).await?;
        Ok((user, next_key))
    }

    /// Change a password by proving knowledge of the current one.
    pub async fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        require_field(&request.email, "email")?;
        require_field(&request.current_password, "current_password")?;
        require_field(&request.new_password, "new_password")?;
        require_field(&request.confirm_password, "confirm_password")?;

        if request.new_password != request.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }

        let user = self
            .authenticate(&request.email, &request.current_password)
            .await?;

        let password_hash = self.hasher.hash(&request.new_password)?;
        let reset_key = user
            .reset_key()
            .map(str::to_string)
            .unwrap_or_else(generate_reset_key);

        self.repository
            .update_credentials(user.id(), &password_hash, &reset_key)
            .await?;

        info!(user_id = user.id(), "password changed");

        self.repository.get(user.id()).await
    }

    /// List users with the total collection size at query time.
    pub async fn list(
        &self,
        order: ListOrder,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), DomainError> {
        let users = self.repository.list(order, limit, offset).await?;
        let total = self.repository.count().await?;

        Ok((users, total))
    }
}

fn require_field(value: &str, field: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::missing_field(field));
    }
    Ok(())
}

fn generate_reset_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_KEY_LENGTH)
        .map(char::from)
        .collect()
}
