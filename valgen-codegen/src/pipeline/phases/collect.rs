//! Collect phase - second pass, producing the file's IR.

use eyre::{OptionExt, Report, Result};
use valgen_ir::FileInfo;

use crate::analysis::Collector;
use crate::pipeline::{CompilationContext, Phase};

pub struct CollectPhase;

impl Phase for CollectPhase {
    fn name(&self) -> &'static str {
        "collect"
    }

    fn description(&self) -> &'static str {
        "Collect fields, rules and enumeration values"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let file = ctx.file.as_ref().ok_or_eyre("syntax tree not set - did ParsePhase run?")?;
        let index = ctx.index.as_ref().ok_or_eyre("index not set - did IndexPhase run?")?;

        let collector = Collector::new(&ctx.source, ctx.config, ctx.registry, index);
        let declarations = collector
            .collect(file, &mut ctx.diagnostics)
            .map_err(|err| Report::new(*err))?;

        let mut info = FileInfo::new(&ctx.path, &file.package.name);
        info.declarations = declarations;
        ctx.info = Some(info);
        Ok(())
    }
}
