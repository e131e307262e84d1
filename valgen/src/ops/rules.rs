//! Rules operation - describe the registered rule kinds.

use valgen_rules::RuleRegistry;

use crate::reports::{ParamEntry, RuleEntry, RulesReport};

pub fn rules(registry: &RuleRegistry) -> RulesReport {
    let rules = registry
        .rules()
        .map(|info| RuleEntry {
            name: info.name.to_string(),
            summary: info.summary.to_string(),
            params: info
                .params
                .iter()
                .map(|p| ParamEntry {
                    name: p.name.to_string(),
                    kind: p.kind.to_string(),
                    description: p.description.to_string(),
                })
                .collect(),
        })
        .collect();
    RulesReport { rules }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules() {
        let report = rules(&RuleRegistry::default());
        let names: Vec<_> = report.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["length", "range"]);

        let range = &report.rules[1];
        let exclusive_min = range
            .params
            .iter()
            .find(|p| p.name == "exclusive_min")
            .unwrap();
        assert_eq!(exclusive_min.kind, "decimal");
    }
}
