//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an output target.

mod check;
mod clean;
mod explain;
mod generate;
mod output;
mod rules;

pub use check::{CheckReport, CheckedFile};
pub use clean::CleanReport;
pub use explain::{ExplainReport, NamedItem};
pub use generate::{FileReport, FileStatus, GenerateReport};
pub use output::{Report, TerminalOutput};
pub use rules::{ParamEntry, RuleEntry, RulesReport};
