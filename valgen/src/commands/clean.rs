use clap::Args;
use eyre::Result;

use super::InputArgs;
use crate::{
    ops::{self, clean::CleanOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.input.config()?;
        let report = ops::clean(CleanOptions {
            root: self.input.root(),
            config: &config,
            dry_run: self.dry_run,
        })?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
