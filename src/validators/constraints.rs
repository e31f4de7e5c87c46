//! Constraints passed to every validator call

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::value::{compare_int_float, FieldValue};

/// Date formats tried when a field configures none, in order
pub const DEFAULT_DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];

/// Constraint set of a field.
///
/// Not every validator reads every constraint. `max_length` doubles as the
/// decimal places cap for decimal fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: f64,
    pub max_value: f64,
    pub acceptable_date_formats: Option<Vec<String>>,
    pub enum_list: Option<Vec<FieldValue>>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_length: None,
            max_length: None,
            min_value: f64::NEG_INFINITY,
            max_value: f64::INFINITY,
            acceptable_date_formats: None,
            enum_list: None,
        }
    }
}

impl Constraints {
    /// Configured date formats, or [`DEFAULT_DATE_FORMATS`].
    pub fn date_formats(&self) -> Vec<&str> {
        match &self.acceptable_date_formats {
            Some(formats) => formats.iter().map(String::as_str).collect(),
            None => DEFAULT_DATE_FORMATS.to_vec(),
        }
    }

    /// Strict exclusive range check: `min_value < value < max_value`.
    pub fn in_range(&self, value: f64) -> bool {
        self.min_value < value && value < self.max_value
    }

    /// [`in_range`](Self::in_range) for integers, compared exactly.
    pub fn in_range_int(&self, value: i64) -> bool {
        compare_int_float(value, self.min_value) == Some(Ordering::Greater)
            && compare_int_float(value, self.max_value) == Some(Ordering::Less)
    }

    /// Range check for a numeric value. Integers never go through `f64`.
    pub fn contains_number(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Int(i) => self.in_range_int(*i),
            other => other.as_f64().is_some_and(|n| self.in_range(n)),
        }
    }
}
