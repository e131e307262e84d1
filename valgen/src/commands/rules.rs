use clap::Args;
use eyre::Result;
use valgen_rules::RuleRegistry;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RulesCommand {}

impl RulesCommand {
    pub fn run(&self) -> Result<()> {
        ops::rules(&RuleRegistry::default()).render(&mut TerminalOutput::new());
        Ok(())
    }
}
