//! Registry Invariant Tests
//!
//! - The JSON dump lists exactly the fields with violations
//! - Messages keep insertion order
//! - Registries passed to different classes stay isolated

use fieldcheck::field::{FieldSpec, Instance, OwnerClass};
use fieldcheck::registry::{ErrorRegistry, ValidationError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// Dump Tests
// =============================================================================

/// Re-parsing the dump yields the failing fields and their ordered messages.
#[test]
fn test_dump_reparses_to_recorded_messages() {
    let registry = Arc::new(ErrorRegistry::new());
    let mut class = OwnerClass::new("Item", Arc::clone(&registry));
    class.declare("code", FieldSpec::text().max_length(3)).unwrap();
    class.declare("count", FieldSpec::integer().min_value(0.0)).unwrap();
    class.declare("note", FieldSpec::text()).unwrap();

    let owner = Instance::new();
    class.set(&owner, "code", "ABCD").unwrap();
    class.set(&owner, "count", -1).unwrap();
    class.set(&owner, "code", "ABCDE").unwrap();
    class.set(&owner, "note", "fine").unwrap();

    let parsed: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&registry.to_json().unwrap()).unwrap();

    assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["code", "count"]);
    assert_eq!(parsed["code"].len(), 2);
    assert!(parsed["code"][0].ends_with("Invalid value: ABCD"));
    assert!(parsed["code"][1].ends_with("Invalid value: ABCDE"));
    assert_eq!(parsed["count"].len(), 1);
}

/// The dump is indented and stable across calls.
#[test]
fn test_dump_is_stable() {
    let registry = ErrorRegistry::new();
    registry.append(ValidationError::new("b", "second field"));
    registry.append(ValidationError::new("a", "first field"));

    let first = registry.to_json().unwrap();
    assert_eq!(first, registry.to_json().unwrap());
    assert!(first.contains("\n    \"a\""));

    let value: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["a"][0], "first field");
}

// =============================================================================
// Isolation Tests
// =============================================================================

#[test]
fn test_registries_are_isolated() {
    let left = Arc::new(ErrorRegistry::new());
    let right = Arc::new(ErrorRegistry::new());

    let mut a = OwnerClass::new("A", Arc::clone(&left));
    a.declare("n", FieldSpec::integer().max_value(1.0)).unwrap();
    let mut b = OwnerClass::new("B", Arc::clone(&right));
    b.declare("n", FieldSpec::integer().max_value(1.0)).unwrap();

    a.set(&Instance::new(), "n", 5).unwrap();

    assert_eq!(left.error_count(), 1);
    assert!(right.is_empty());
}

/// Same field name across classes shares one bucket in a shared registry.
#[test]
fn test_shared_registry_buckets_by_field_name() {
    let registry = Arc::new(ErrorRegistry::new());
    let mut a = OwnerClass::new("A", Arc::clone(&registry));
    a.declare("n", FieldSpec::integer().max_value(1.0)).unwrap();
    let mut b = OwnerClass::new("B", Arc::clone(&registry));
    b.declare("n", FieldSpec::integer().max_value(1.0)).unwrap();

    a.set(&Instance::new(), "n", 5).unwrap();
    b.set(&Instance::new(), "n", 6).unwrap();

    let errors = registry.errors_for("n");
    assert_eq!(errors.len(), 2);
    assert!(errors[0].message.ends_with("5"));
    assert!(errors[1].message.ends_with("6"));
}
