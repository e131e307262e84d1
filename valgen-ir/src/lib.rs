//! Intermediate representation types for the valgen generator.
//!
//! These types sit between the source front-end and the language emitter:
//!
//! ```text
//! *.go (source) → valgen-source (parsing) → valgen-ir (declarations) → valgen-codegen-go
//! ```
//!
//! The IR is language-agnostic: a [`Record`] is a type with fields, an
//! [`Enumeration`] is a scalar type with a closed set of values, and a
//! [`Check`] is one guarded comparison a [`ValidationRule`] renders.

mod check;
mod decl;
mod serde_helpers;
mod shape;

pub use check::{Bound, Check, CmpOp, Condition, Failure, Operand, ValidationRule};
pub use decl::{
    AllowedValues, Declaration, DeclarationKind, Enumeration, Field, FileInfo, Literal, Record,
    ScalarKind,
};
pub use shape::{TypeRef, TypeShape};
