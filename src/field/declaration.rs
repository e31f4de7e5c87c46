//! Validated field declaration
//!
//! Write path of [`FieldDeclaration::set`]:
//! 1. Null on a required field: record the "mandatory" violation the first
//!    time this declaration sees one, store the null, done.
//! 2. Otherwise dispatch on the field kind.
//! 3. Record the violation, if any.
//! 4. Store the value, valid or not.
//!
//! Configuration errors abort the write before anything is stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use super::errors::{FieldError, FieldResult};
use super::instance::{Instance, InstanceId, InstanceToken, Teardown};
use super::spec::FieldSpec;
use crate::registry::{ErrorRegistry, ValidationError};
use crate::validators::{
    standard_validators, Constraints, FieldKind, FieldValue, ValidatorCall, ValidatorTable,
    Verdict,
};

/// One stored value and a non-owning reference to its owner
#[derive(Debug)]
struct StoredValue {
    owner: Weak<InstanceToken>,
    value: FieldValue,
}

/// Per-instance values of one declaration
#[derive(Debug, Default)]
struct ValueStore {
    entries: Mutex<HashMap<InstanceId, StoredValue>>,
}

impl ValueStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<InstanceId, StoredValue>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(self: &Arc<Self>, instance: &Instance, value: FieldValue) {
        let hook: Weak<ValueStore> = Arc::downgrade(self);
        instance.attach(hook);
        let entry = StoredValue {
            owner: instance.back_reference(),
            value,
        };
        self.lock().insert(instance.id(), entry);
    }
}

impl Teardown for ValueStore {
    fn teardown(&self, id: InstanceId) {
        if self.lock().remove(&id).is_some() {
            tracing::debug!(instance = %id, "purged field value");
        }
    }
}

/// Constraints, a name and a value store for one attribute, shared by every
/// instance of the owner type.
#[derive(Debug)]
pub struct FieldDeclaration {
    spec: FieldSpec,
    constraints: Arc<Constraints>,
    name: OnceLock<String>,
    missing_logged: AtomicBool,
    store: Arc<ValueStore>,
    validators: Arc<ValidatorTable>,
    registry: Arc<ErrorRegistry>,
}

impl FieldDeclaration {
    /// Creates an unnamed declaration validated by the built-in validators.
    pub fn new(spec: FieldSpec, registry: Arc<ErrorRegistry>) -> FieldResult<Self> {
        Self::with_validators(spec, Arc::new(standard_validators()), registry)
    }

    /// Creates an unnamed declaration validated through `validators`.
    pub fn with_validators(
        spec: FieldSpec,
        validators: Arc<ValidatorTable>,
        registry: Arc<ErrorRegistry>,
    ) -> FieldResult<Self> {
        spec.validate_structure().map_err(FieldError::InvalidSpec)?;
        Ok(Self {
            constraints: Arc::new(spec.constraints()),
            spec,
            name: OnceLock::new(),
            missing_logged: AtomicBool::new(false),
            store: Arc::new(ValueStore::default()),
            validators,
            registry,
        })
    }

    /// Binds the attribute name. Binding the same name again is a no-op.
    pub fn bind_name(&self, name: &str) -> FieldResult<()> {
        let bound = self.name.get_or_init(|| name.to_string());
        if bound != name {
            return Err(FieldError::NameAlreadyBound {
                bound: bound.clone(),
                requested: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }

    fn bound_name(&self) -> FieldResult<&str> {
        self.name().ok_or(FieldError::Unbound)
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    /// Whether the one-shot "mandatory value missing" violation was recorded.
    pub fn missing_logged(&self) -> bool {
        self.missing_logged.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> &Arc<ErrorRegistry> {
        &self.registry
    }

    /// Value stored for `instance`, or `None` if it was never written.
    pub fn get(&self, instance: &Instance) -> Option<FieldValue> {
        self.store
            .lock()
            .get(&instance.id())
            .map(|entry| entry.value.clone())
    }

    /// Checks `value` without recording or storing anything.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the field is unbound, its kind has
    /// no validator, or it is an enum without allow-list.
    pub fn validate(&self, value: &FieldValue) -> FieldResult<Verdict> {
        let name = self.bound_name()?;
        if value.is_null() && self.spec.required {
            return Ok(Verdict::Fail(ValidationError::missing_mandatory(name)));
        }

        let call = ValidatorCall::new(
            self.kind(),
            value.clone(),
            name,
            Arc::clone(&self.constraints),
        );
        let verdict = self.validators.call(&call)??;
        Ok(verdict)
    }

    /// Validates and stores `value` for `instance`.
    ///
    /// The value is stored even when it fails validation; the violation is
    /// appended to the registry instead. A null on a required field is
    /// recorded only the first time any instance writes one through this
    /// declaration. The returned verdict always describes this write.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate). Nothing is stored on error.
    pub fn set(&self, instance: &Instance, value: impl Into<FieldValue>) -> FieldResult<Verdict> {
        let value = value.into();
        let verdict = self.validate(&value)?;

        if value.is_null() && self.spec.required {
            if !self.missing_logged.swap(true, Ordering::SeqCst) {
                if let Some(error) = verdict.error() {
                    self.registry.append(error.clone());
                }
            }
        } else if let Some(error) = verdict.error() {
            self.registry.append(error.clone());
        }

        tracing::debug!(
            field = self.name().unwrap_or_default(),
            instance = %instance.id(),
            valid = verdict.is_pass(),
            "stored field value"
        );
        self.store.insert(instance, value);
        Ok(verdict)
    }

    /// Whether `instance` has a stored entry.
    pub fn contains(&self, instance: &Instance) -> bool {
        self.store.lock().contains_key(&instance.id())
    }

    /// Number of stored entries.
    pub fn store_len(&self) -> usize {
        self.store.lock().len()
    }

    /// Drops entries whose owner is gone. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut entries = self.store.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.owner.strong_count() > 0);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(name: &str, spec: FieldSpec) -> (Arc<ErrorRegistry>, FieldDeclaration) {
        let registry = Arc::new(ErrorRegistry::new());
        let field = FieldDeclaration::new(spec, Arc::clone(&registry)).unwrap();
        field.bind_name(name).unwrap();
        (registry, field)
    }

    #[test]
    fn test_unwritten_is_absent_not_null() {
        let (_registry, field) = declare("nickname", FieldSpec::text());
        let owner = Instance::new();
        assert_eq!(field.get(&owner), None);

        field.set(&owner, FieldValue::Null).unwrap();
        assert_eq!(field.get(&owner), Some(FieldValue::Null));
    }

    #[test]
    fn test_invalid_value_is_stored_and_recorded() {
        let (registry, field) = declare("first_name", FieldSpec::text().min_length(1).max_length(6));
        let owner = Instance::new();

        let verdict = field.set(&owner, "Ioannis").unwrap();
        assert!(!verdict.is_pass());
        assert_eq!(field.get(&owner), Some(FieldValue::from("Ioannis")));
        assert_eq!(registry.errors_for("first_name").len(), 1);
    }

    #[test]
    fn test_rewrite_revalidates() {
        let (registry, field) = declare("age", FieldSpec::integer().min_value(0.0).max_value(100.0));
        let owner = Instance::new();

        field.set(&owner, 101).unwrap();
        field.set(&owner, 30).unwrap();
        assert_eq!(field.get(&owner), Some(FieldValue::Int(30)));
        assert_eq!(registry.errors_for("age").len(), 1);
        assert_eq!(field.store_len(), 1);
    }

    #[test]
    fn test_missing_mandatory_logged_once_per_declaration() {
        let (registry, field) = declare("last_name", FieldSpec::text().required());
        let first = Instance::new();
        let second = Instance::new();

        let verdict = field.set(&first, FieldValue::Null).unwrap();
        assert!(!verdict.is_pass());
        assert!(field.missing_logged());

        let verdict = field.set(&second, FieldValue::Null).unwrap();
        assert!(!verdict.is_pass());

        assert_eq!(registry.errors_for("last_name").len(), 1);
        assert_eq!(field.get(&second), Some(FieldValue::Null));
    }

    #[test]
    fn test_optional_null_is_silent() {
        let (registry, field) = declare("eye_color", FieldSpec::enumeration(["brown"]));
        let owner = Instance::new();
        assert!(field.set(&owner, FieldValue::Null).unwrap().is_pass());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_configuration_error_aborts_write() {
        let (registry, field) = declare("eye_color", FieldSpec::new(FieldKind::Enum));
        let owner = Instance::new();

        let err = field.set(&owner, "rose").unwrap_err();
        assert!(matches!(err, FieldError::Configuration(_)));
        assert_eq!(field.get(&owner), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_validator_propagates() {
        let registry = Arc::new(ErrorRegistry::new());
        let empty = Arc::new(ValidatorTable::new(crate::validators::no_validator));
        let field = FieldDeclaration::with_validators(FieldSpec::text(), empty, registry).unwrap();
        field.bind_name("title").unwrap();

        let err = field.set(&Instance::new(), "x").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unbound_field_refuses_writes() {
        let field = FieldDeclaration::new(FieldSpec::text(), Arc::new(ErrorRegistry::new())).unwrap();
        assert!(matches!(field.set(&Instance::new(), "x"), Err(FieldError::Unbound)));
    }

    #[test]
    fn test_name_binds_once() {
        let (_registry, field) = declare("age", FieldSpec::integer());
        assert!(field.bind_name("age").is_ok());
        assert!(matches!(
            field.bind_name("years"),
            Err(FieldError::NameAlreadyBound { .. })
        ));
        assert_eq!(field.name(), Some("age"));
    }

    #[test]
    fn test_inconsistent_spec_rejected() {
        let result = FieldDeclaration::new(
            FieldSpec::text().min_length(4).max_length(3),
            Arc::new(ErrorRegistry::new()),
        );
        assert!(matches!(result, Err(FieldError::InvalidSpec(_))));
    }

    #[test]
    fn test_drop_purges_entry() {
        let (_registry, field) = declare("age", FieldSpec::integer());
        let keep = Instance::new();
        let gone = Instance::new();
        field.set(&keep, 1).unwrap();
        field.set(&gone, 2).unwrap();
        assert_eq!(field.store_len(), 2);

        drop(gone);
        assert_eq!(field.store_len(), 1);
        assert!(field.contains(&keep));
    }

    #[test]
    fn test_drop_purges_every_declaration_written() {
        let (_registry, age) = declare("age", FieldSpec::integer());
        let (_registry, name) = declare("name", FieldSpec::text());
        let owner = Instance::new();
        age.set(&owner, 1).unwrap();
        age.set(&owner, 2).unwrap();
        name.set(&owner, "Eric").unwrap();

        drop(owner);
        assert_eq!(age.store_len(), 0);
        assert_eq!(name.store_len(), 0);
    }

    #[test]
    fn test_validate_has_no_side_effects() {
        let (registry, field) = declare("age", FieldSpec::integer().min_value(0.0).max_value(10.0));
        let verdict = field.validate(&FieldValue::Int(50)).unwrap();
        assert!(!verdict.is_pass());
        assert!(registry.is_empty());
        assert_eq!(field.store_len(), 0);
    }

    #[test]
    fn test_prune_keeps_live_entries() {
        let (_registry, field) = declare("age", FieldSpec::integer());
        let owner = Instance::new();
        field.set(&owner, 1).unwrap();
        assert_eq!(field.prune(), 0);
        assert_eq!(field.store_len(), 1);
    }
}
