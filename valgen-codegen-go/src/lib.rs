//! Go emitter for valgen.
//!
//! Lowers a [`FileInfo`](valgen_ir::FileInfo) into a small Go syntax tree
//! and renders it into a companion `X_validate.go` file of `Validate() error`
//! methods.

mod generator;
mod lower;

pub mod ast;

pub use ast::{Expr, Func, GoFile, Receiver, SimpleStmt, Stmt};
pub use generator::{GeneratedModule, Generator};
pub use lower::lower;
