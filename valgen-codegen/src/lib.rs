//! Declaration analysis and shared code generation utilities for valgen.
//!
//! This crate turns a parsed source file into a [`valgen_ir::FileInfo`] and
//! provides the language-agnostic pieces emitters build on.
//!
//! # Module Organization
//!
//! - [`analysis`] - Declaration index, type-shape classifier, enum extractor, field collector
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`pipeline`] - Phase orchestration, plugins and diagnostics

pub mod analysis;
pub mod builder;
mod error;
pub mod pipeline;

pub use error::Error;
