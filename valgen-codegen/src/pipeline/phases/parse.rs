//! Parse phase - source text to syntax tree.

use eyre::{Report, Result};

use crate::pipeline::{CompilationContext, Phase};

pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Tokenize the source and parse type and constant declarations"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let file = valgen_source::parse(&ctx.source).map_err(|err| Report::new(*err))?;
        ctx.file = Some(file);
        Ok(())
    }
}
