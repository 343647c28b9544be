//! Domain layer - Core business logic and entities

pub mod error;
pub mod page;
pub mod user;

pub use error::DomainError;
pub use page::{next_page, prev_page, Page, DEFAULT_PAGE_LIMIT};
pub use user::{ListOrder, NewUser, OrderField, User, UserRepository};
