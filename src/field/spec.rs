//! Field configuration
//!
//! A [`FieldSpec`] carries the options a field is declared with. It can be
//! built in code or deserialized from a class definition file:
//!
//! ```json
//! { "kind": "integer", "min_value": 0, "max_value": 100, "required": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::validators::{Constraints, FieldKind, FieldValue};

/// Options of a declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Validator kind
    pub kind: FieldKind,

    /// Minimum text length, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum text length, inclusive. Decimal places cap on decimal fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Exclusive lower bound (default: unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    /// Exclusive upper bound (default: unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// Whether null is a violation
    #[serde(default)]
    pub required: bool,

    /// Date formats in chrono strftime syntax, tried in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_date_formats: Option<Vec<String>>,

    /// Allow-list of an enum field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_list: Option<Vec<FieldValue>>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            required: false,
            acceptable_date_formats: None,
            enum_list: None,
        }
    }

    /// An optional text field
    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    /// An optional integer field
    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// An optional decimal field
    pub fn decimal() -> Self {
        Self::new(FieldKind::Decimal)
    }

    /// An optional date field
    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    /// An optional enum field accepting `values`
    pub fn enumeration<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Self::new(FieldKind::Enum).enum_list(values)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptable_date_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    pub fn enum_list<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.enum_list = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Checks the spec is self-consistent.
    ///
    /// An enum spec without an allow-list passes here; it fails when a
    /// non-null value is validated.
    pub fn validate_structure(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(format!("min_length {} exceeds max_length {}", min, max));
            }
        }

        let constraints = self.constraints();
        if constraints.min_value.is_nan() || constraints.max_value.is_nan() {
            return Err("numeric bounds must not be NaN".into());
        }
        if constraints.min_value > constraints.max_value {
            return Err(format!(
                "min_value {} exceeds max_value {}",
                constraints.min_value, constraints.max_value
            ));
        }

        if let Some(formats) = &self.acceptable_date_formats {
            if formats.is_empty() {
                return Err("acceptable_date_formats must not be empty".into());
            }
        }

        Ok(())
    }

    /// Constraint set handed to validators.
    pub fn constraints(&self) -> Constraints {
        let defaults = Constraints::default();
        Constraints {
            min_length: self.min_length,
            max_length: self.max_length,
            min_value: self.min_value.unwrap_or(defaults.min_value),
            max_value: self.max_value.unwrap_or(defaults.max_value),
            acceptable_date_formats: self.acceptable_date_formats.clone(),
            enum_list: self.enum_list.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let spec = FieldSpec::text().min_length(1).max_length(6).required();
        assert_eq!(spec.kind, FieldKind::Text);
        assert_eq!(spec.min_length, Some(1));
        assert_eq!(spec.max_length, Some(6));
        assert!(spec.required);
    }

    #[test]
    fn test_unbounded_defaults() {
        let constraints = FieldSpec::integer().constraints();
        assert_eq!(constraints.min_value, f64::NEG_INFINITY);
        assert_eq!(constraints.max_value, f64::INFINITY);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "kind": "integer",
            "min_value": 0,
            "max_value": 100,
            "required": true
        }))
        .unwrap();
        assert_eq!(spec, FieldSpec::integer().min_value(0.0).max_value(100.0).required());
    }

    #[test]
    fn test_deserialize_enum_list() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "kind": "enum",
            "enum_list": ["brown", "red"]
        }))
        .unwrap();
        assert_eq!(spec, FieldSpec::enumeration(["brown", "red"]));
    }

    #[test]
    fn test_structure_rejects_inverted_bounds() {
        assert!(FieldSpec::text().min_length(5).max_length(2).validate_structure().is_err());
        assert!(FieldSpec::integer().min_value(10.0).max_value(1.0).validate_structure().is_err());
        assert!(FieldSpec::decimal().min_value(f64::NAN).validate_structure().is_err());
        let empty: Vec<String> = Vec::new();
        assert!(FieldSpec::date().date_formats(empty).validate_structure().is_err());
    }

    #[test]
    fn test_structure_allows_enum_without_list() {
        assert!(FieldSpec::new(FieldKind::Enum).validate_structure().is_ok());
    }
}
