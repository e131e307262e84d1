//! Lint for bounds that no value can satisfy.

use valgen_ir::{Bound, CmpOp, FileInfo, Operand};

use super::super::Lint;
use super::field_checks;
use crate::pipeline::Diagnostic;

/// Warns when the combined bounds on a field reject every value, e.g.
/// `range(max=5, exclusive_min=100)`.
///
/// The generated checks are kept as written; this only reports them.
pub struct ContradictoryBoundsLint;

#[derive(Debug, Clone, Copy)]
struct Edge {
    value: f64,
    strict: bool,
}

/// The values a set of checks lets through.
#[derive(Debug, Default)]
struct Interval {
    lower: Option<Edge>,
    upper: Option<Edge>,
}

impl Interval {
    fn raise(&mut self, edge: Edge) {
        let keep = self.lower.is_some_and(|cur| {
            cur.value > edge.value || (cur.value == edge.value && cur.strict)
        });
        if !keep {
            self.lower = Some(edge);
        }
    }

    fn cap(&mut self, edge: Edge) {
        let keep = self.upper.is_some_and(|cur| {
            cur.value < edge.value || (cur.value == edge.value && cur.strict)
        });
        if !keep {
            self.upper = Some(edge);
        }
    }

    /// Narrow by a failing condition `operand <op> bound`.
    fn exclude(&mut self, op: CmpOp, bound: f64) {
        let inclusive = Edge {
            value: bound,
            strict: false,
        };
        let strict = Edge {
            value: bound,
            strict: true,
        };
        match op {
            CmpOp::Lt => self.raise(inclusive),
            CmpOp::Le => self.raise(strict),
            CmpOp::Gt => self.cap(inclusive),
            CmpOp::Ge => self.cap(strict),
            CmpOp::Ne => {
                self.raise(inclusive);
                self.cap(inclusive);
            }
        }
    }

    fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) => {
                lo.value > hi.value || (lo.value == hi.value && (lo.strict || hi.strict))
            }
            _ => false,
        }
    }
}

impl Lint for ContradictoryBoundsLint {
    fn name(&self) -> &'static str {
        "contradictory-bounds"
    }

    fn description(&self) -> &'static str {
        "Bounds on a field that reject every value"
    }

    fn check(&self, info: &FileInfo, diagnostics: &mut Vec<Diagnostic>) {
        for (record_name, record) in info.records() {
            for field in &record.fields {
                let checks = field_checks(field);
                let mut length = Interval::default();
                let mut value = Interval::default();

                for check in &checks {
                    let bound = match check.condition.bound {
                        Bound::Int(b) => b as f64,
                        Bound::Float(b) => b,
                    };
                    let interval = match check.condition.operand {
                        Operand::Len(_) => &mut length,
                        Operand::Value(_) => &mut value,
                    };
                    interval.exclude(check.condition.op, bound);
                }

                for (what, interval) in [("length", &length), ("value", &value)] {
                    if !interval.is_empty() {
                        continue;
                    }
                    let rules: Vec<String> = field.rules.iter().map(ToString::to_string).collect();
                    diagnostics.push(
                        Diagnostic::warning(
                            "lint",
                            format!(
                                "no {} of '{}' satisfies {}; every value fails",
                                what,
                                field.name,
                                rules.join(" and ")
                            ),
                        )
                        .at(format!("{}.{}", record_name, field.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use valgen_ir::{Declaration, Field, Record, TypeRef, TypeShape};
    use valgen_rules::RuleRegistry;

    use super::*;

    fn lint(rules: &[(&str, &str)]) -> Vec<Diagnostic> {
        let registry = RuleRegistry::default();
        let mut field = Field::new(
            "Node",
            TypeShape::optional(TypeShape::direct(TypeRef::local("int"))),
        );
        field.rules = rules
            .iter()
            .map(|(name, raw)| registry.construct(name, raw).unwrap())
            .collect();

        let mut info = FileInfo::new("node.go", "v1");
        info.declarations.push(Declaration::record(
            "NodeSpec",
            Record {
                fields: vec![field],
            },
        ));

        let mut diagnostics = Vec::new();
        ContradictoryBoundsLint.check(&info, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_max_below_exclusive_min() {
        let diagnostics = lint(&[("range", "max=5, exclusive_min=100")]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert_eq!(diagnostics[0].location.as_deref(), Some("NodeSpec.Node"));
        assert!(diagnostics[0].message.contains("range(max=5, exclusive_min=100)"));
    }

    #[test]
    fn test_touching_bounds() {
        assert!(lint(&[("range", "min=5, max=5")]).is_empty());
        assert_eq!(lint(&[("range", "min=5, exclusive_max=5")]).len(), 1);
        assert_eq!(lint(&[("range", "exclusive_min=5, max=5")]).len(), 1);
    }

    #[test]
    fn test_bounds_across_rules() {
        assert_eq!(lint(&[("range", "min=10"), ("range", "max=3")]).len(), 1);
        assert!(lint(&[("range", "min=1"), ("range", "max=3")]).is_empty());
    }

    #[test]
    fn test_length_equal_outside_range() {
        assert_eq!(lint(&[("length", "min=3, equal=2")]).len(), 1);
        assert_eq!(lint(&[("length", "equal=2"), ("length", "equal=3")]).len(), 1);
        assert!(lint(&[("length", "min=1, max=4, equal=2")]).is_empty());
    }

    #[test]
    fn test_length_and_value_are_separate() {
        // length bounds never constrain the value itself
        assert!(lint(&[("length", "min=10"), ("range", "max=3")]).is_empty());
    }
}
