//! Error types for the serenity-core storage layer.
//!
//! Every failure the backing mediums can produce collapses into one of
//! three recoverable categories; services above the store catch these,
//! log, and degrade to defaults rather than crashing the caller.

use thiserror::Error;

/// Storage-layer error taxonomy.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing medium cannot be opened or queried.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    /// A stored value is not valid for its expected shape.
    #[error("stored value for '{key}' is not valid: {message}")]
    Serialization { key: String, message: String },

    /// A record violated a data-model invariant.
    #[error("invalid {field}: {message}")]
    Constraint {
        field: &'static str,
        message: String,
    },
}

impl StorageError {
    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable {
            message: message.into(),
        }
    }

    pub(crate) fn serialization(key: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Serialization {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        StorageError::Constraint {
            field,
            message: message.into(),
        }
    }

    /// Whether this error reports a duplicate or otherwise invalid record,
    /// as opposed to a medium failure.
    pub fn is_constraint(&self) -> bool {
        matches!(self, StorageError::Constraint { .. })
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _)
                if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StorageError::constraint("id", "record already exists")
            }
            _ => StorageError::unavailable(err.to_string()),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::unavailable(err.to_string())
    }
}

/// Result type alias for StorageError
pub type Result<T, E = StorageError> = std::result::Result<T, E>;
