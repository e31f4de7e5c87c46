//! Validation error registry
//!
//! Every violation found while writing a declared field lands here, keyed by
//! field name. Writes are never blocked by a violation; callers consult the
//! registry before trusting an object's state.
//!
//! A registry is an explicit context: each owner class is handed an
//! `Arc<ErrorRegistry>`, so tests can isolate their own.
//! [`ErrorRegistry::shared`] is the process-wide one.

mod record;
mod store;

pub use record::ValidationError;
pub use store::{ErrorRegistry, ErrorSnapshot};
