//! Lint trait for collected declarations.

use valgen_ir::FileInfo;

use crate::pipeline::Diagnostic;

#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A lint that checks the collected declarations of one file.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the declarations and add any diagnostics.
    fn check(&self, info: &FileInfo, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
