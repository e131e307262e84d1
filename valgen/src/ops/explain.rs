//! Explain operation - pipeline and configuration overview.

use std::path::PathBuf;

use valgen_codegen::pipeline::{Pipeline, phases::LintPhase};
use valgen_core::Config;
use valgen_rules::RuleRegistry;

use crate::reports::{ExplainReport, NamedItem};

/// Describe what a run over `root` would do with `config`.
pub fn explain(root: PathBuf, config: Config, registry: &RuleRegistry) -> ExplainReport {
    let phases = Pipeline::new()
        .phase_info()
        .into_iter()
        .map(|p| NamedItem::new(p.name, p.description))
        .collect();
    let lints = LintPhase::new()
        .lint_info()
        .into_iter()
        .map(|l| NamedItem::new(l.name, l.description))
        .collect();
    let rules = registry
        .rules()
        .map(|r| NamedItem::new(r.name, r.summary))
        .collect();

    ExplainReport {
        root,
        config,
        phases,
        lints,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_lists_phases_in_order() {
        let report = explain(PathBuf::from("."), Config::default(), &RuleRegistry::default());
        let phases: Vec<_> = report.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(phases, vec!["parse", "index", "collect", "lint"]);
        assert_eq!(report.lints.len(), 3);
        assert_eq!(report.rules.len(), 2);
    }
}
