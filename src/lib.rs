//! fieldcheck - Typed field declarations validated through a keyed dispatch table
//!
//! Modules, leaves first:
//! - `dispatch`: call routing by first argument, with a default handler
//! - `validators`: one validator per field kind, registered in a dispatch table
//! - `registry`: append-only record of validation violations
//! - `field`: field declarations, owner instances and owner classes

pub mod dispatch;
pub mod field;
pub mod registry;
pub mod validators;
