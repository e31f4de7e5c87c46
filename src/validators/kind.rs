//! Validator kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared kind of a field. Each kind selects one validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 text with optional length bounds
    Text,
    /// Integral number with exclusive bounds
    Integer,
    /// Real number with exclusive bounds and optional decimal places cap
    Decimal,
    /// Calendar date, structured or parsed from text
    Date,
    /// Member of an allow-list
    Enum,
}

impl FieldKind {
    /// All kinds, in declaration order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Text,
        FieldKind::Integer,
        FieldKind::Decimal,
        FieldKind::Date,
        FieldKind::Enum,
    ];

    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::Enum => "enum",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::Text.type_name(), "text");
        assert_eq!(FieldKind::Integer.type_name(), "integer");
        assert_eq!(FieldKind::Decimal.type_name(), "decimal");
        assert_eq!(FieldKind::Date.type_name(), "date");
        assert_eq!(FieldKind::Enum.type_name(), "enum");
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let kind: FieldKind = serde_json::from_str("\"decimal\"").unwrap();
        assert_eq!(kind, FieldKind::Decimal);
        assert_eq!(serde_json::to_string(&FieldKind::Enum).unwrap(), "\"enum\"");
    }
}
