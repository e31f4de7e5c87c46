//! Validated field declarations
//!
//! A [`FieldDeclaration`] attaches typed constraints to one named attribute
//! of an owner type. Owner types embed an [`Instance`] and compose the
//! declaration's `get`/`set` into their own accessors:
//!
//! ```ignore
//! struct Person {
//!     instance: Instance,
//! }
//!
//! impl Person {
//!     fn set_age(&self, class: &OwnerClass, age: i64) -> FieldResult<Verdict> {
//!         class.set(&self.instance, "age", age)
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! - Every write is validated; violations are recorded, never raised
//! - Every write is stored, valid or not
//! - At most one stored entry per live instance
//! - Dropping an instance purges its entries
//! - A field name is bound once

mod declaration;
mod errors;
mod instance;
mod owner;
mod spec;

pub use declaration::FieldDeclaration;
pub use errors::{FieldError, FieldResult};
pub use instance::{Instance, InstanceId, InstanceToken};
pub use owner::{OwnerClass, OwnerClassSpec};
pub use spec::FieldSpec;
