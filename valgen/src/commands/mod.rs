mod check;
mod clean;
mod completions;
mod explain;
mod generate;
mod rules;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use generate::GenerateCommand;
use rules::RulesCommand;
use valgen_core::Config;

#[derive(Parser)]
#[command(name = "valgen")]
#[command(version)]
#[command(about = "Generate Validate() methods for annotated Go types")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Rules(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate validation files next to annotated sources
    Generate(GenerateCommand),

    /// Analyze sources and list what would be validated
    Check(CheckCommand),

    /// Remove generated files whose source no longer has annotations
    Clean(CleanCommand),

    /// List the available validation rules
    Rules(RulesCommand),

    /// Show the pipeline phases, lints and effective configuration
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Input root and configuration flags shared by the file-walking commands.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Source file or directory to process
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to valgen.toml (defaults to <PATH>/valgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Package qualifier never validated recursively (repeatable)
    #[arg(long = "ignore-package", value_name = "PKG")]
    pub ignore_packages: Vec<String>,
}

impl InputArgs {
    /// Load the configuration file and apply command-line overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::open(path)?,
            None => Config::discover(&self.path)?,
        };
        for package in &self.ignore_packages {
            if !config.ignore_packages.contains(package) {
                config.ignore_packages.push(package.clone());
            }
        }
        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.path
    }
}
