use clap::Args;
use eyre::Result;

use super::InputArgs;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Number of files processed in parallel (defaults to one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.input.config()?;
        let report = ops::generate(GenerateOptions {
            root: self.input.root(),
            config: &config,
            dry_run: self.dry_run,
            jobs: self.jobs,
        })?;

        report.render(&mut TerminalOutput::new());

        if report.has_failures() {
            std::process::exit(1);
        }
        Ok(())
    }
}
