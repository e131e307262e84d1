//! Go syntax tree for generated validation code.
//!
//! Only the constructs generated methods use are modeled. Every node renders
//! through [`Renderable`](valgen_codegen::builder::Renderable) or `Display`.

mod expr;
mod file;
mod func;
mod stmt;

pub use expr::{Expr, quote};
pub use file::GoFile;
pub use func::{Func, Receiver};
pub use stmt::{SimpleStmt, Stmt};
