//! Lint phase - warns about declarations that generate suspicious code.

mod base;
pub mod lints;

use eyre::{OptionExt, Result, bail};
pub use base::{Lint, LintInfo};
pub use lints::{ContradictoryBoundsLint, EmptyEnumLint, RuleTargetLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that runs configurable lints over the collected declarations.
pub struct LintPhase {
    lints: Vec<Box<dyn Lint>>,
}

impl LintPhase {
    /// A lint phase with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(ContradictoryBoundsLint),
                Box::new(RuleTargetLint),
                Box::new(EmptyEnumLint),
            ],
        }
    }

    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for LintPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for LintPhase {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn description(&self) -> &'static str {
        "Check collected declarations for likely mistakes"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let info = ctx.info.as_ref().ok_or_eyre("file info not set - did CollectPhase run?")?;
        for lint in &self.lints {
            lint.check(info, &mut ctx.diagnostics);
        }

        // Warnings never block generation
        if ctx.has_errors() {
            bail!("lint failed with {} error(s)", ctx.error_count());
        }
        Ok(())
    }
}
