//! Built-in validators, one per [`FieldKind`]
//!
//! Every validator lets `Null` through; whether a field may be null is the
//! field declaration's concern, not the validator's.

use chrono::format::{self, ParseErrorKind, Parsed, StrftimeItems};
use std::sync::Arc;

use super::constraints::Constraints;
use super::errors::ConfigurationError;
use super::kind::FieldKind;
use super::value::FieldValue;
use crate::dispatch::{DispatchArgs, DispatchTable};
use crate::registry::ValidationError;

/// Argument pack of a validator call. The kind is the dispatch key.
#[derive(Debug, Clone)]
pub struct ValidatorCall {
    pub kind: FieldKind,
    pub value: FieldValue,
    pub field_name: String,
    pub constraints: Arc<Constraints>,
}

impl ValidatorCall {
    pub fn new(
        kind: FieldKind,
        value: FieldValue,
        field_name: impl Into<String>,
        constraints: Arc<Constraints>,
    ) -> Self {
        Self {
            kind,
            value,
            field_name: field_name.into(),
            constraints,
        }
    }

    fn fail(&self, message: String) -> ValidatorOutput {
        Ok(Verdict::Fail(ValidationError::new(&self.field_name, message)))
    }
}

impl DispatchArgs for ValidatorCall {
    type Key = FieldKind;

    fn dispatch_key(&self) -> Option<&FieldKind> {
        Some(&self.kind)
    }
}

/// Outcome of a validator that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(ValidationError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(err) => Some(err),
        }
    }

    /// The `(success, error-or-empty)` pair.
    pub fn into_parts(self) -> (bool, Option<ValidationError>) {
        match self {
            Verdict::Pass => (true, None),
            Verdict::Fail(err) => (false, Some(err)),
        }
    }
}

/// What a validator returns: a verdict, or a configuration error.
pub type ValidatorOutput = Result<Verdict, ConfigurationError>;

/// Dispatch table from field kind to validator.
pub type ValidatorTable = DispatchTable<ValidatorCall, ValidatorOutput>;

/// Default handler of a validator table: the kind has no validator.
pub fn no_validator(call: &ValidatorCall) -> ValidatorOutput {
    Err(ConfigurationError::NoValidator { kind: call.kind })
}

/// Builds a table with every built-in validator registered.
pub fn standard_validators() -> ValidatorTable {
    let table = ValidatorTable::named(
        "validate",
        "Validates a value against the constraints of its field kind",
        no_validator,
    );
    for kind in FieldKind::ALL {
        let validator: fn(&ValidatorCall) -> ValidatorOutput = match kind {
            FieldKind::Text => validate_text,
            FieldKind::Integer => validate_integer,
            FieldKind::Decimal => validate_decimal,
            FieldKind::Date => validate_date,
            FieldKind::Enum => validate_enum,
        };
        table.register_fn(kind, validator);
    }
    table
}

pub fn validate_text(call: &ValidatorCall) -> ValidatorOutput {
    let name = &call.field_name;
    let value = &call.value;
    if value.is_null() {
        return Ok(Verdict::Pass);
    }
    let Some(text) = value.as_text() else {
        return call.fail(format!("Field {} must be text. Invalid value: {}", name, value));
    };

    let len = text.chars().count();
    if let Some(min) = call.constraints.min_length {
        if len < min {
            return call.fail(format!(
                "Field {} must have at least {} characters. Invalid value: {}",
                name, min, value
            ));
        }
    }
    if let Some(max) = call.constraints.max_length {
        if len > max {
            return call.fail(format!(
                "Field {} cannot have more than {} characters. Invalid value: {}",
                name, max, value
            ));
        }
    }
    Ok(Verdict::Pass)
}

pub fn validate_integer(call: &ValidatorCall) -> ValidatorOutput {
    let name = &call.field_name;
    let value = &call.value;
    if value.is_null() {
        return Ok(Verdict::Pass);
    }
    if !value.is_integral() {
        return call.fail(format!("{} must be an integer. Invalid value: {}", name, value));
    }
    if !call.constraints.contains_number(value) {
        return call.fail(range_message(name, &call.constraints, value));
    }
    Ok(Verdict::Pass)
}

pub fn validate_decimal(call: &ValidatorCall) -> ValidatorOutput {
    let name = &call.field_name;
    let value = &call.value;
    if value.is_null() {
        return Ok(Verdict::Pass);
    }
    if value.as_f64().is_none() {
        return call.fail(format!("{} must be a number. Invalid value: {}", name, value));
    }
    if !call.constraints.contains_number(value) {
        return call.fail(range_message(name, &call.constraints, value));
    }
    if let Some(places) = call.constraints.max_length {
        if decimal_places(value) > places {
            return call.fail(format!(
                "{} must have at most {} decimal places. Invalid value: {}",
                name, places, value
            ));
        }
    }
    Ok(Verdict::Pass)
}

pub fn validate_date(call: &ValidatorCall) -> ValidatorOutput {
    let name = &call.field_name;
    let value = &call.value;
    let text = match value {
        FieldValue::Null | FieldValue::Date(_) | FieldValue::DateTime(_) => return Ok(Verdict::Pass),
        FieldValue::Text(text) => text,
        _ => return call.fail(format!("{} must be a date. Invalid value: {}", name, value)),
    };

    let formats = call.constraints.date_formats();
    if formats.iter().any(|fmt| parses_as(text, fmt)) {
        return Ok(Verdict::Pass);
    }
    call.fail(format!(
        "{} must match one of the formats: {}. Invalid value: {}",
        name,
        formats.join(", "),
        value
    ))
}

pub fn validate_enum(call: &ValidatorCall) -> ValidatorOutput {
    let name = &call.field_name;
    let value = &call.value;
    if value.is_null() {
        return Ok(Verdict::Pass);
    }
    let allowed = call
        .constraints
        .enum_list
        .as_ref()
        .ok_or_else(|| ConfigurationError::MissingEnumList { field: name.clone() })?;

    if allowed.iter().any(|candidate| candidate.matches(value)) {
        return Ok(Verdict::Pass);
    }
    let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    call.fail(format!(
        "Acceptable values for attribute {} are [{}]. Invalid value: {}",
        name,
        listed.join(", "),
        value
    ))
}

fn range_message(name: &str, constraints: &Constraints, value: &FieldValue) -> String {
    format!(
        "{} must be between {} and {}. Bottom and upper bounds exclusive. Invalid value: {}",
        name, constraints.min_value, constraints.max_value, value
    )
}

/// Length of the fractional part in the shortest textual form.
fn decimal_places(value: &FieldValue) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// Whether `text` matches `fmt` as a whole.
///
/// A format may name only part of a date (`%Y-%m`) or only a time of day
/// (`%H:%M`). Parts it names are checked against the calendar; parts it
/// leaves out are not required.
fn parses_as(text: &str, fmt: &str) -> bool {
    let mut parsed = Parsed::new();
    if format::parse(&mut parsed, text, StrftimeItems::new(fmt)).is_err() {
        return false;
    }
    match parsed.to_naive_date() {
        Ok(_) => true,
        Err(err) => err.kind() == ParseErrorKind::NotEnough,
    }
}
