//! Database error categorisation
//!
//! Write failures are categorised before they are translated into
//! [`EntityError`](crate::errors::EntityError) values, so that a store-level
//! unique index violation surfaces as a duplicate rather than a generic save
//! failure.
//!
//! ```rust
//! use officehub::common::db_errors::DbErrorKind;
//! use sea_orm::DbErr;
//!
//! let err = DbErr::RecordNotFound("office".to_string());
//! assert_eq!(DbErrorKind::from_db_err(&err), DbErrorKind::NotFound);
//! ```

use sea_orm::{DbErr, SqlErr};

/// Categories of database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Query returned no results
    NotFound,

    /// Unique constraint violation
    UniqueViolation,

    /// Foreign key constraint violation
    ForeignKeyViolation,

    /// Database connection error
    ConnectionError,

    /// Query or acquire timeout
    Timeout,

    /// Unknown/other database error
    Unknown,
}

impl DbErrorKind {
    /// Categorise a sea_orm database error
    pub fn from_db_err(err: &DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => return Self::UniqueViolation,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Self::ForeignKeyViolation,
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::ConnectionAcquire(_) => Self::Timeout,
            DbErr::Conn(inner) if inner.to_string().to_lowercase().contains("timeout") => {
                Self::Timeout
            }
            DbErr::Conn(_) => Self::ConnectionError,
            DbErr::Exec(inner) | DbErr::Query(inner) => {
                let msg = inner.to_string().to_lowercase();
                if msg.contains("unique") || msg.contains("duplicate") {
                    Self::UniqueViolation
                } else if msg.contains("foreign key") {
                    Self::ForeignKeyViolation
                } else if msg.contains("timeout") {
                    Self::Timeout
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    /// HTTP status code equivalent for this error kind
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::UniqueViolation => 409,
            Self::ForeignKeyViolation => 400,
            Self::ConnectionError => 503,
            Self::Timeout => 504,
            Self::Unknown => 500,
        }
    }
}
