//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Column the user list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    Id,
    Email,
    CreatedAt,
}

impl OrderField {
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Ordering for the user list.
///
/// Parsed leniently from the `order` query parameter ("email desc",
/// "created_at", ...). Anything unrecognized falls back to ascending id, so
/// the parameter can never be used to smuggle SQL into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOrder {
    pub field: OrderField,
    pub descending: bool,
}

impl ListOrder {
    pub fn parse(order: &str) -> Self {
        let mut parts = order.split_whitespace();

        let field = match parts.next() {
            Some("id") => OrderField::Id,
            Some("email") => OrderField::Email,
            Some("created_at") => OrderField::CreatedAt,
            _ => return Self::default(),
        };

        let descending = matches!(parts.next(), Some("desc"));

        Self { field, descending }
    }
}

/// Repository trait for user storage.
///
/// Lookups fail with [`DomainError::UserNotFound`] when no row matches;
/// every other failure is a `Storage` error wrapped with the operation name.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by id.
    async fn get(&self, id: i64) -> Result<User, DomainError>;

    /// Get a user by email.
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Create a new user; the store assigns the id.
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Store a new password hash and reset key for an existing user.
    async fn update_credentials(
        &self,
        id: i64,
        password_hash: &str,
        reset_key: &str,
    ) -> Result<(), DomainError>;

    /// List users ordered by `order`, windowed by `(limit, offset)`.
    async fn list(
        &self,
        order: ListOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, DomainError>;

    /// Total number of users.
    async fn count(&self) -> Result<i64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_field_and_direction() {
        let order = ListOrder::parse("email desc");
        assert_eq!(order.field, OrderField::Email);
        assert!(order.descending);
    }

    #[test]
    fn test_parse_order_defaults_to_ascending() {
        let order = ListOrder::parse("created_at");
        assert_eq!(order.field, OrderField::CreatedAt);
        assert!(!order.descending);
    }

    #[test]
    fn test_parse_order_rejects_unknown_field() {
        let order = ListOrder::parse("password_hash; DROP TABLE users");
        assert_eq!(order, ListOrder::default());
    }

    #[test]
    fn test_parse_order_empty() {
        assert_eq!(ListOrder::parse(""), ListOrder::default());
    }
}
