//! `retailgate-core`: shared domain building blocks.
//!
//! Identifiers, the domain error model and the entity trait. No
//! infrastructure concerns live here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, UserId};
