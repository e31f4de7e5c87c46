//! Append-only error registry shared by field declarations

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use super::record::ValidationError;

/// Owned copy of the registry contents, keyed by field name.
pub type ErrorSnapshot = BTreeMap<String, Vec<ValidationError>>;

/// Field name → violations, in insertion order per field.
///
/// Keys are kept sorted so dumps are deterministic. The only removal is
/// [`clear_errors`](Self::clear_errors).
#[derive(Debug, Default)]
pub struct ErrorRegistry {
    errors: Mutex<ErrorSnapshot>,
}

impl ErrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry for callers that do not thread their own.
    pub fn shared() -> Arc<ErrorRegistry> {
        static SHARED: OnceLock<Arc<ErrorRegistry>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(ErrorRegistry::new())))
    }

    fn lock(&self) -> MutexGuard<'_, ErrorSnapshot> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `error` under its own field name.
    pub fn append(&self, error: ValidationError) {
        tracing::warn!(field = %error.field, reason = %error.message, "validation failed");
        self.lock().entry(error.field.clone()).or_default().push(error);
    }

    /// Snapshot of every recorded violation.
    pub fn get_errors(&self) -> ErrorSnapshot {
        self.lock().clone()
    }

    /// Violations recorded for one field, oldest first.
    pub fn errors_for(&self, field: &str) -> Vec<ValidationError> {
        self.lock().get(field).cloned().unwrap_or_default()
    }

    /// Total number of violations across all fields.
    pub fn error_count(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear_errors(&self) {
        self.lock().clear();
    }

    /// Field name → messages, in insertion order.
    pub fn messages(&self) -> BTreeMap<String, Vec<String>> {
        self.lock()
            .iter()
            .map(|(field, errors)| {
                let messages = errors.iter().map(|e| e.message.clone()).collect();
                (field.clone(), messages)
            })
            .collect()
    }

    /// Dumps [`messages`](Self::messages) as JSON indented by four spaces.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.messages().serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
