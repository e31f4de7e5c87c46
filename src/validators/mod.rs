//! Type-specific validators
//!
//! A validator takes a [`ValidatorCall`] (kind, value, field name and
//! constraints) and returns a [`Verdict`]. Validators are registered into a
//! [`ValidatorTable`] keyed by [`FieldKind`]; [`standard_validators`]
//! registers one per kind.
//!
//! # Contracts
//!
//! - text: length in `[min_length, max_length]`, inclusive
//! - integer / decimal: `min_value < value < max_value`, exclusive
//! - decimal: `max_length` caps the number of decimal places
//! - date: first matching format wins, defaults to `%Y%m%d` then `%Y-%m-%d`
//! - enum: membership in the allow-list; a missing list is a
//!   [`ConfigurationError`], not a verdict

mod builtin;
mod constraints;
mod errors;
mod kind;
mod value;

pub use builtin::{
    no_validator, standard_validators, validate_date, validate_decimal, validate_enum,
    validate_integer, validate_text, ValidatorCall, ValidatorOutput, ValidatorTable, Verdict,
};
pub use constraints::{Constraints, DEFAULT_DATE_FORMATS};
pub use errors::ConfigurationError;
pub use kind::FieldKind;
pub use value::FieldValue;
