//! Compilation context passed through pipeline phases.

use std::path::PathBuf;

use eyre::{OptionExt, Result};
use valgen_core::Config;
use valgen_ir::FileInfo;
use valgen_rules::RuleRegistry;
use valgen_source::SourceContext;
use valgen_source::ast::SourceFile;

use super::diagnostic::{Diagnostic, Severity};
use crate::analysis::DeclIndex;

/// State of one file as it moves through the phases.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    pub path: PathBuf,
    /// Source text and display name, for error snippets.
    pub source: SourceContext,
    pub config: &'a Config,
    pub registry: &'a RuleRegistry,
    /// Syntax tree (populated by ParsePhase).
    pub file: Option<SourceFile>,
    /// Annotated declarations (populated by IndexPhase).
    pub index: Option<DeclIndex>,
    /// Collected declarations (populated by CollectPhase).
    pub info: Option<FileInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        config: &'a Config,
        registry: &'a RuleRegistry,
    ) -> Self {
        let path = path.into();
        let source = SourceContext::new(src, path.display().to_string());
        Self {
            path,
            source,
            config,
            registry,
            file: None,
            index: None,
            info: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the collected file info out of the context.
    ///
    /// # Errors
    ///
    /// Fails if CollectPhase has not run.
    pub fn take_info(&mut self) -> Result<FileInfo> {
        self.info
            .take()
            .ok_or_eyre("file info not set - did CollectPhase run?")
    }
}
