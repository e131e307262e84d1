//! Core utilities and types for the valgen generator.
//!
//! This crate provides file writing, configuration and naming helpers
//! shared by the rest of the workspace.

mod config;
mod file;
mod utils;

// Configuration
pub use config::{CONFIG_FILE, Config};
// File operations
pub use file::{GeneratedFile, WriteResult};
// String utilities
pub use utils::{normalize_key, to_snake_case};
