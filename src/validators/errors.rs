//! Configuration errors raised by validators
//!
//! These are fatal for the call that hit them and are never recorded in an
//! error registry.

use thiserror::Error;

use super::kind::FieldKind;

/// Misconfiguration detected while validating
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The dispatch table has no validator for this kind
    #[error("No validation function registered for kind '{kind}'. Register one to handle this kind")]
    NoValidator { kind: FieldKind },

    /// An enum field was declared without an allow-list
    #[error("Enum list can not be empty. Provide the acceptable values for attribute {field}")]
    MissingEnumList { field: String },
}
