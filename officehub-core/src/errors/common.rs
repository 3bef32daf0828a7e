//! GraphQL conversion for domain errors
//!
//! ```rust,ignore
//! use officehub::errors::{EntityError, ToGraphQLError};
//!
//! let err = EntityError::not_found("Office not found");
//! let graphql_err = err.to_graphql_error();
//! ```

#[cfg(feature = "graphql")]
use async_graphql::{Error as GraphQLError, ErrorExtensions};

#[cfg(feature = "graphql")]
use super::EntityError;

/// Convert domain errors to GraphQL errors with error codes
#[cfg(feature = "graphql")]
pub trait ToGraphQLError {
    /// Convert to GraphQL error with structured extensions
    fn to_graphql_error(&self) -> GraphQLError;
}

#[cfg(feature = "graphql")]
impl ToGraphQLError for EntityError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        if !self.is_client_error() {
            tracing::error!(code, error = %message, "request failed on the server side");
        }

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);
            e.set("statusCode", self.http_status_code());

            match self {
                EntityError::Duplicate { entity_type, value } => {
                    e.set("entityType", entity_type.as_str());
                    e.set("value", value.as_str());
                }
                EntityError::Save { entity_type, .. } => {
                    e.set("entityType", entity_type.as_str());
                }
                EntityError::PageOutOfRange { page, .. } => {
                    e.set("page", *page);
                }
                EntityError::AuxiliaryEffect(_) => {
                    e.set("committed", true);
                }
                _ => {}
            }
        })
    }
}

/// Extension trait for Result<T, EntityError> to convert errors to GraphQL errors
#[cfg(feature = "graphql")]
pub trait ResultExt<T> {
    fn to_graphql_result(self) -> Result<T, GraphQLError>;
}

#[cfg(feature = "graphql")]
impl<T> ResultExt<T> for Result<T, EntityError> {
    fn to_graphql_result(self) -> Result<T, GraphQLError> {
        self.map_err(|e| e.to_graphql_error())
    }
}
