//! Built-in pipeline phases.
//!
//! - [`ParsePhase`] - tokenizes and parses the source text
//! - [`IndexPhase`] - indexes annotated declarations
//! - [`CollectPhase`] - collects fields, rules and enumeration values
//! - [`LintPhase`] - checks collected declarations for likely mistakes

mod collect;
mod index;
mod lint;
mod parse;

pub use collect::CollectPhase;
pub use index::IndexPhase;
pub use lint::{ContradictoryBoundsLint, EmptyEnumLint, Lint, LintInfo, LintPhase, RuleTargetLint};
pub use parse::ParsePhase;
