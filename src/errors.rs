//! Unified error types for `MarcomDesk`.
//!
//! One enum covers the whole taxonomy the application reports to callers:
//! validation, authorization, not-found, storage, rendering, and the
//! infrastructure failures wrapped from underlying crates. The HTTP layer maps
//! each variant to a status code; nothing here is ever retried automatically.

use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input. Carries the offending field so the caller
    /// gets field-level detail. No state is mutated.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the field that failed validation
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// The caller's role or ownership does not permit the requested
    /// operation. Reported distinctly from validation; no state is mutated.
    #[error("not permitted to {action}")]
    Unauthorized {
        /// The action that was refused
        action: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "document" or "inventory item"
        entity: &'static str,
        /// The identifier that failed to resolve
        id: String,
    },

    /// The document store failed to persist, load, or remove a file.
    #[error("storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// The letter renderer rejected or failed to render a letter.
    #[error("render error: {message}")]
    Render {
        /// What went wrong
        message: String,
    },

    /// Bad settings file or environment.
    #[error("configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database error from the underlying repository.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with a formatted message.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::Unauthorized`] with a formatted action.
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
