use clap::Args;
use eyre::Result;
use valgen_rules::RuleRegistry;

use super::InputArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.input.config()?;
        let report = ops::explain(
            self.input.root().to_path_buf(),
            config,
            &RuleRegistry::default(),
        );
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
