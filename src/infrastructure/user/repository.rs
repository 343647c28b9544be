//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{ListOrder, NewUser, OrderField, User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of [`UserRepository`].
///
/// Used for development and tests; ids are assigned sequentially the way a
/// serial column would.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    /// Index for email -> user id lookup
    email_index: HashMap<String, i64>,
    next_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: i64) -> Result<User, DomainError> {
        let inner = self.inner.read().await;
        inner.users.get(&id).cloned().ok_or(DomainError::UserNotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let inner = self.inner.read().await;
        inner
            .email_index
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.email_index.contains_key(&new_user.email) {
            return Err(DomainError::storage(format!(
                "email '{}' already registered",
                new_user.email
            ))
            .in_operation("user.create"));
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let user = User::new(
            id,
            new_user.email.clone(),
            new_user.password_hash,
            Some(new_user.reset_key),
        );

        inner.email_index.insert(new_user.email, id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update_credentials(
        &self,
        id: i64,
        password_hash: &str,
        reset_key: &str,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        let user = inner.users.get_mut(&id).ok_or(DomainError::UserNotFound)?;
        user.set_password_hash(password_hash);
        user.set_reset_key(reset_key);

        Ok(())
    }

    async fn list(
        &self,
        order: ListOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, DomainError> {
        let inner = self.inner.read().await;

        let mut users: Vec<User> = inner.users.values().cloned().collect();

        users.sort_by(|a, b| {
            let ordering = match order.field {
                OrderField::Id => a.id().cmp(&b.id()),
                OrderField::Email => a.email().cmp(b.email()),
                OrderField::CreatedAt => a.created_at().cmp(&b.created_at()),
            };
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let offset = offset.max(0) as usize;
        let limit = limit.max(0) as usize;

        Ok(users.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            reset_key: "reset-key".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("a@example.com")).await.unwrap();
        let second = repo.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let repo = InMemoryUserRepository::new();

        let err = repo.get(42).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();

        let user = repo.get_by_email("a@example.com").await.unwrap();
        assert_eq!(user.email(), "a@example.com");

        let err = repo.get_by_email("missing@example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();

        let err = repo.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err.root_cause(), DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_update_credentials() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("a@example.com")).await.unwrap();

        repo.update_credentials(user.id(), "new-hash", "new-key")
            .await
            .unwrap();

        let updated = repo.get(user.id()).await.unwrap();
        assert_eq!(updated.password_hash(), "new-hash");
        assert_eq!(updated.reset_key(), Some("new-key"));
    }

    #[tokio::test]
    async fn test_update_credentials_missing_user() {
        let repo = InMemoryUserRepository::new();

        let err = repo.update_credentials(7, "hash", "key").await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_list_windows_and_orders() {
        let repo = InMemoryUserRepository::new();
        for email in ["c@example.com", "a@example.com", "b@example.com"] {
            repo.create(new_user(email)).await.unwrap();
        }

        let page = repo
            .list(ListOrder::parse("email"), 2, 0)
            .await
            .unwrap();
        let emails: Vec<&str> = page.iter().map(|u| u.email()).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);

        let rest = repo.list(ListOrder::parse("email"), 2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].email(), "c@example.com");
    }

    #[tokio::test]
    async fn test_list_descending() {
        let repo = InMemoryUserRepository::new();
        for email in ["a@example.com", "b@example.com"] {
            repo.create(new_user(email)).await.unwrap();
        }

        let page = repo
            .list(ListOrder::parse("email desc"), 20, 0)
            .await
            .unwrap();
        assert_eq!(page[0].email(), "b@example.com");
    }

    #[tokio::test]
    async fn test_count() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(new_user("a@example.com")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
