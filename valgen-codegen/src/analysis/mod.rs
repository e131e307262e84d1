//! Declaration analysis.
//!
//! Analysis runs in two passes over a parsed file. The first builds a
//! [`DeclIndex`] of every annotated type so that field classification can
//! tell which local types have a generated `Validate` method. The second
//! collects fields, rules and enumeration values into IR declarations.

mod collect;
mod enums;
mod index;
mod shape;

pub use collect::Collector;
pub use enums::extract;
pub use index::{DeclIndex, DeclKind, annotated_specs};
pub use shape::{classify, is_nested};
