//! # Field Errors
//!
//! Errors raised synchronously to the caller of a field operation.
//! Validation failures are not among them: those are recorded in the
//! error registry and the write still completes.

use std::io;
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::validators::ConfigurationError;

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Field declaration errors
#[derive(Debug, Error)]
pub enum FieldError {
    // ==================
    // Configuration Errors
    // ==================

    /// Validator missing for the kind, or enum declared without allow-list
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Field spec is inconsistent
    #[error("Invalid field spec: {0}")]
    InvalidSpec(String),

    /// Field was used before a name was bound to it
    #[error("Field has not been bound to a name")]
    Unbound,

    /// Field already carries another name
    #[error("Field already bound to '{bound}', cannot rebind to '{requested}'")]
    NameAlreadyBound { bound: String, requested: String },

    /// Owner class declares the same field twice
    #[error("Field '{0}' is already declared")]
    DuplicateField(String),

    /// Owner class has no such field
    #[error("Unknown field '{field}' on {owner}")]
    UnknownField { owner: String, field: String },

    // ==================
    // Usage Errors
    // ==================

    /// Dispatch table called without arguments
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    // ==================
    // Loader Errors
    // ==================

    /// Class definition file could not be read
    #[error("Failed to read class definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Class definition file is not valid JSON for an owner class
    #[error("Malformed class definition '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FieldError {
    /// Whether this error reports a misconfigured field or owner class.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FieldError::Configuration(_)
                | FieldError::InvalidSpec(_)
                | FieldError::Unbound
                | FieldError::NameAlreadyBound { .. }
                | FieldError::DuplicateField(_)
                | FieldError::UnknownField { .. }
        )
    }
}
