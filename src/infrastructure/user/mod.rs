//! User infrastructure: repositories, password hashing and the user service

pub mod password;
pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{ChangePasswordRequest, RegisterRequest, ResetPasswordRequest, UserService};
