//! Per-file compilation pipeline.
//!
//! A [`Pipeline`] takes one source file from text to a
//! [`FileInfo`](valgen_ir::FileInfo):
//!
//! - Explicit phase boundaries (parse → index → collect → lint)
//! - Plugin hooks before and after each phase
//! - Diagnostics collected on the [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use valgen_codegen::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let mut ctx = pipeline.run(path, src, &config, &registry)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let info = ctx.take_info()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::{Plugin, TracingPlugin};
pub use runner::Pipeline;
