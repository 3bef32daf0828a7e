use sea_orm::DbErr;
use thiserror::Error;

use crate::common::db_errors::DbErrorKind;

/// Errors raised by entity validation, persistence, lookup and authorisation
#[derive(Error, Debug)]
pub enum EntityError {
    /// A required field is empty or a value has the wrong shape
    #[error("{0}")]
    Validation(String),

    /// The uniqueness field value is already taken by an active entity
    #[error("{entity_type} {value} already exists")]
    Duplicate { entity_type: String, value: String },

    /// The entity does not exist or is not in a visible state
    #[error("{0}")]
    NotFound(String),

    /// The caller is not allowed to perform the action
    #[error("{0}")]
    Permission(String),

    /// The persistence layer rejected the write
    #[error("{entity_type} could not be saved: {source}")]
    Save {
        entity_type: String,
        #[source]
        source: DbErr,
    },

    /// A side effect failed after the entity was committed
    #[error("{0}")]
    AuxiliaryEffect(String),

    /// The requested page lies beyond the available rows
    #[error("No more {collection}")]
    PageOutOfRange { collection: String, page: u64 },

    /// A read against the database failed
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl EntityError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate(entity_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            value: value.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission(message.into())
    }

    pub fn save(entity_type: impl Into<String>, source: DbErr) -> Self {
        Self::Save {
            entity_type: entity_type.into(),
            source,
        }
    }

    pub fn auxiliary(message: impl Into<String>) -> Self {
        Self::AuxiliaryEffect(message.into())
    }

    pub fn page_out_of_range(collection: impl Into<String>, page: u64) -> Self {
        Self::PageOutOfRange {
            collection: collection.into(),
            page,
        }
    }

    /// Translate a failed write. A store-level unique violation is reported
    /// as a duplicate of `value`; everything else becomes a save error.
    pub fn from_write_err(entity_type: &str, value: &str, err: DbErr) -> Self {
        match DbErrorKind::from_db_err(&err) {
            DbErrorKind::UniqueViolation => Self::duplicate(entity_type, value),
            _ => Self::save(entity_type, err),
        }
    }

    /// Get error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Duplicate { .. } => "DUPLICATE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Permission(_) => "FORBIDDEN",
            Self::Save { .. } => "SAVE_FAILED",
            Self::AuxiliaryEffect(_) => "AUXILIARY_EFFECT_FAILED",
            Self::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP-equivalent status code
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Duplicate { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Permission(_) => 403,
            Self::Save { source, .. } => DbErrorKind::from_db_err(source).http_status_code(),
            Self::AuxiliaryEffect(_) => 502,
            Self::PageOutOfRange { .. } => 404,
            Self::Database(err) => DbErrorKind::from_db_err(err).http_status_code(),
        }
    }

    /// Auxiliary failures are the only kind that leave the primary operation
    /// committed.
    pub fn is_auxiliary(&self) -> bool {
        matches!(self, Self::AuxiliaryEffect(_))
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_type_and_value() {
        let err = EntityError::duplicate("Tag", "urgent");
        assert_eq!(err.to_string(), "Tag urgent already exists");
        assert_eq!(err.error_code(), "DUPLICATE");
        assert_eq!(err.http_status_code(), 409);
    }

    #[test]
    fn test_unique_violation_translates_to_duplicate() {
        let err = DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "UNIQUE constraint failed: offices.name".to_string(),
        ));
        let translated = EntityError::from_write_err("Office", "Epic Tower", err);
        assert!(matches!(translated, EntityError::Duplicate { .. }));
    }

    #[test]
    fn test_connection_failure_translates_to_save_error() {
        let err = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".to_string()));
        let translated = EntityError::from_write_err("Office", "Epic Tower", err);
        assert!(matches!(translated, EntityError::Save { .. }));
        assert_eq!(translated.http_status_code(), 503);
        assert!(!translated.is_client_error());
    }

    #[test]
    fn test_page_out_of_range_message() {
        let err = EntityError::page_out_of_range("offices", 5);
        assert_eq!(err.to_string(), "No more offices");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_only_auxiliary_is_auxiliary() {
        assert!(EntityError::auxiliary("Office created but Emails not Sent").is_auxiliary());
        assert!(!EntityError::permission("nope").is_auxiliary());
        assert!(!EntityError::validation("name is required").is_auxiliary());
    }
}
