//! Owner class definitions
//!
//! An [`OwnerClass`] owns the declarations of one owner type. It binds each
//! field's name once, at declaration time, and all of them share one
//! validator table and one error registry.
//!
//! Class definitions can be loaded from JSON files:
//!
//! ```json
//! {
//!   "name": "Person",
//!   "fields": {
//!     "first_name": { "kind": "text", "min_length": 1, "max_length": 6, "required": true },
//!     "age": { "kind": "integer", "min_value": 0, "max_value": 100 }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::declaration::FieldDeclaration;
use super::errors::{FieldError, FieldResult};
use super::instance::Instance;
use super::spec::FieldSpec;
use crate::registry::ErrorRegistry;
use crate::validators::{standard_validators, FieldValue, ValidatorTable, Verdict};

/// Serialized form of an owner class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerClassSpec {
    /// Owner type name
    pub name: String,
    /// Field specs by field name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSpec>,
}

/// The declared fields of one owner type.
#[derive(Debug)]
pub struct OwnerClass {
    name: String,
    fields: BTreeMap<String, Arc<FieldDeclaration>>,
    validators: Arc<ValidatorTable>,
    registry: Arc<ErrorRegistry>,
}

impl OwnerClass {
    /// Creates an owner class using the built-in validators.
    pub fn new(name: impl Into<String>, registry: Arc<ErrorRegistry>) -> Self {
        Self::with_validators(name, Arc::new(standard_validators()), registry)
    }

    pub fn with_validators(
        name: impl Into<String>,
        validators: Arc<ValidatorTable>,
        registry: Arc<ErrorRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
            validators,
            registry,
        }
    }

    /// Builds an owner class from its serialized form.
    pub fn from_spec(spec: OwnerClassSpec, registry: Arc<ErrorRegistry>) -> FieldResult<Self> {
        let mut class = Self::new(spec.name, registry);
        for (field_name, field_spec) in spec.fields {
            class.declare(&field_name, field_spec)?;
        }
        Ok(class)
    }

    /// Loads a class definition file.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::Io` if the file cannot be read,
    /// `FieldError::Malformed` if it is not a valid definition, and
    /// `FieldError::InvalidSpec` if a field spec is inconsistent.
    pub fn load(path: &Path, registry: Arc<ErrorRegistry>) -> FieldResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| FieldError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let spec: OwnerClassSpec =
            serde_json::from_str(&content).map_err(|source| FieldError::Malformed {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_spec(spec, registry)
    }

    /// Declares a field and binds its name.
    pub fn declare(&mut self, field_name: &str, spec: FieldSpec) -> FieldResult<Arc<FieldDeclaration>> {
        if self.fields.contains_key(field_name) {
            return Err(FieldError::DuplicateField(field_name.to_string()));
        }

        let field = FieldDeclaration::with_validators(
            spec,
            Arc::clone(&self.validators),
            Arc::clone(&self.registry),
        )?;
        field.bind_name(field_name)?;

        let field = Arc::new(field);
        self.fields.insert(field_name.to_string(), Arc::clone(&field));
        Ok(field)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration itself, for class-level introspection.
    pub fn field(&self, field_name: &str) -> Option<&Arc<FieldDeclaration>> {
        self.fields.get(field_name)
    }

    /// Declared fields, by name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Arc<FieldDeclaration>)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn registry(&self) -> &Arc<ErrorRegistry> {
        &self.registry
    }

    pub fn validators(&self) -> &Arc<ValidatorTable> {
        &self.validators
    }

    fn require(&self, field_name: &str) -> FieldResult<&Arc<FieldDeclaration>> {
        self.fields.get(field_name).ok_or_else(|| FieldError::UnknownField {
            owner: self.name.clone(),
            field: field_name.to_string(),
        })
    }

    /// Reads a field of `instance`.
    pub fn get(&self, instance: &Instance, field_name: &str) -> FieldResult<Option<FieldValue>> {
        Ok(self.require(field_name)?.get(instance))
    }

    /// Writes a field of `instance`. See [`FieldDeclaration::set`].
    pub fn set(
        &self,
        instance: &Instance,
        field_name: &str,
        value: impl Into<FieldValue>,
    ) -> FieldResult<Verdict> {
        self.require(field_name)?.set(instance, value)
    }

    /// The serialized form of this class.
    pub fn to_spec(&self) -> OwnerClassSpec {
        OwnerClassSpec {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.spec().clone()))
                .collect(),
        }
    }
}
