//! Index phase - first pass over the declarations.

use eyre::{OptionExt, Result};

use crate::analysis::DeclIndex;
use crate::pipeline::{CompilationContext, Phase};

pub struct IndexPhase;

impl Phase for IndexPhase {
    fn name(&self) -> &'static str {
        "index"
    }

    fn description(&self) -> &'static str {
        "Find annotated struct and scalar declarations"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let file = ctx.file.as_ref().ok_or_eyre("syntax tree not set - did ParsePhase run?")?;
        let index = DeclIndex::build(file, &ctx.config.type_marker, &mut ctx.diagnostics);
        tracing::debug!(file = %ctx.path.display(), declarations = index.len(), "indexed");
        ctx.index = Some(index);
        Ok(())
    }
}
