//! Keyed call routing
//!
//! A [`DispatchTable`] picks one handler per call from the value of the
//! first argument:
//! - exact key match if a handler was registered for it
//! - the default handler otherwise
//!
//! # Registry view
//!
//! [`DispatchTable::get_registry`] returns a live read-through view. A
//! registration performed after the view was obtained is visible through it.

mod errors;
mod table;

pub use errors::{DispatchError, DispatchResult};
pub use table::{DispatchArgs, DispatchTable, Handler, RegistryView};
