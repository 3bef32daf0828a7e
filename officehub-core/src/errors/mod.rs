//! Domain error types for officehub-core
//!
//! Every failure the helper layer and the domain operations can produce is an
//! [`EntityError`]. The variants follow the taxonomy callers rely on:
//!
//! - **Validation**: an empty or malformed input field
//! - **Duplicate**: a uniqueness violation among active entities
//! - **NotFound**: the entity is absent or filtered out by its state
//! - **Permission**: the caller's roles or location do not allow the action
//! - **Save**: the persistence layer rejected a write
//! - **AuxiliaryEffect**: a side effect failed after the primary save committed
//! - **PageOutOfRange**: a requested page lies beyond the available rows
//!
//! # GraphQL Integration
//!
//! When the `graphql` feature is enabled, errors convert to GraphQL errors
//! with a `code` extension through the [`ToGraphQLError`] trait.
//!
//! # Examples
//!
//! ```rust
//! use officehub::errors::EntityError;
//!
//! let err = EntityError::duplicate("Office", "Epic Tower");
//! assert_eq!(err.to_string(), "Office Epic Tower already exists");
//! assert!(!err.is_auxiliary());
//! ```

pub mod common;
pub mod entity;

pub use entity::EntityError;

#[cfg(feature = "graphql")]
pub use common::{ResultExt, ToGraphQLError};

/// Result type alias for entity operations
pub type EntityResult<T> = Result<T, EntityError>;
