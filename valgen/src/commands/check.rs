use clap::Args;
use eyre::{Context, Result};

use super::InputArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the analyzed declarations as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.input.config()?;
        let report = ops::check(self.input.root(), &config)?;

        if self.json {
            println!("{}", report.to_json().wrap_err("failed to serialize report")?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
