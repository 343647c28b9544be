//! User domain
//!
//! Domain types for user accounts: the user entity, the repository trait the
//! storage implementations fulfill, and list ordering.

mod entity;
mod repository;

pub use entity::{NewUser, User};
pub use repository::{ListOrder, OrderField, UserRepository};
