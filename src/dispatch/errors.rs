//! Dispatch errors

use thiserror::Error;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised by a dispatch table call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The argument pack was empty, so there was nothing to dispatch on
    #[error("At least one positional argument is required for dispatching")]
    NoArguments,
}
