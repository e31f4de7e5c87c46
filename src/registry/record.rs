//! A single recorded violation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field violation. Recorded in an [`ErrorRegistry`](super::ErrorRegistry),
/// never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Field the violation belongs to
    pub field: String,
    /// Human-readable description
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The "mandatory value missing" violation
    pub fn missing_mandatory(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!(
            "Field {} is mandatory. Ensure there are no missing values",
            field
        );
        Self { field, message }
    }
}
