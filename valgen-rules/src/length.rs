use std::fmt;

use valgen_ir::{Bound, Check, CmpOp, Condition, Failure, Operand, ValidationRule};

use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::registry::{ParamKind, ParamSpec, RuleInfo};
use crate::write_params;

/// Cardinality constraint on strings and collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Length {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub equal: Option<i64>,
    pub message: Option<String>,
    pub code: Option<String>,
}

impl Length {
    pub const NAME: &'static str = "length";

    pub const INFO: RuleInfo = RuleInfo {
        name: Self::NAME,
        summary: "length of a string, slice or map",
        params: &[
            ParamSpec::new("min", ParamKind::Integer, "fails when len < min"),
            ParamSpec::new("max", ParamKind::Integer, "fails when len > max"),
            ParamSpec::new("equal", ParamKind::Integer, "fails when len != equal"),
            ParamSpec::new("message", ParamKind::Text, "replaces the default message"),
            ParamSpec::new("code", ParamKind::Text, "prefixes the message with [code]"),
        ],
    };

    pub fn from_attributes(attrs: &AttributeSet) -> Result<Self> {
        let mut rule = Length::default();
        for attr in attrs.iter() {
            match attr.normalized_key() {
                "min" => rule.min = Some(attr.int(Self::NAME)?),
                "max" => rule.max = Some(attr.int(Self::NAME)?),
                "equal" => rule.equal = Some(attr.int(Self::NAME)?),
                "message" => rule.message = Some(attr.text(Self::NAME)?),
                "code" => rule.code = Some(attr.text(Self::NAME)?),
                _ => tracing::debug!(rule = Self::NAME, key = %attr.key, "ignoring unknown attribute"),
            }
        }
        Ok(rule)
    }

    fn check(&self, access: &str, op: CmpOp, bound: i64, default: String) -> Check {
        Check {
            condition: Condition {
                operand: Operand::Len(access.to_string()),
                op,
                bound: Bound::Int(bound),
            },
            failure: Failure::new(self.message.as_deref(), default, self.code.as_deref()),
        }
    }
}

impl ValidationRule for Length {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, display_name: &str, access: &str) -> Vec<Check> {
        let mut checks = Vec::new();
        if let Some(min) = self.min {
            let message = format!("{} length must be at least {}", display_name, min);
            checks.push(self.check(access, CmpOp::Lt, min, message));
        }
        if let Some(max) = self.max {
            let message = format!("{} length must be at most {}", display_name, max);
            checks.push(self.check(access, CmpOp::Gt, max, message));
        }
        if let Some(equal) = self.equal {
            let message = format!("{} length must be exactly {}", display_name, equal);
            checks.push(self.check(access, CmpOp::Ne, equal, message));
        }
        checks
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers = [("min", self.min), ("max", self.max), ("equal", self.equal)];
        let numbers = numbers
            .iter()
            .filter_map(|(key, value)| value.map(|v| (*key, v.to_string())));
        write_params(f, Self::NAME, numbers, &self.message, &self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(raw: &str) -> Length {
        Length::from_attributes(&AttributeSet::parse(raw)).unwrap()
    }

    #[test]
    fn test_decode() {
        let rule = length("min=4, max=5, message=\"too short\", flavor=x");
        assert_eq!(rule.min, Some(4));
        assert_eq!(rule.max, Some(5));
        assert_eq!(rule.equal, None);
        assert_eq!(rule.message.as_deref(), Some("too short"));
    }

    #[test]
    fn test_render_one_check_per_bound() {
        let checks = length("min=4, max=5").render("Node", "*r.Node");
        assert_eq!(checks.len(), 2);

        assert_eq!(checks[0].condition.operand, Operand::Len("*r.Node".into()));
        assert_eq!(checks[0].condition.op, CmpOp::Lt);
        assert_eq!(checks[0].condition.bound, Bound::Int(4));
        assert_eq!(checks[0].failure.message, "Node length must be at least 4");
        assert!(checks[0].failure.report_actual);

        assert_eq!(checks[1].condition.op, CmpOp::Gt);
        assert_eq!(checks[1].failure.message, "Node length must be at most 5");
    }

    #[test]
    fn test_each_violation_fails_exactly_one_check() {
        let checks = length("min=4, max=5").render("Node", "v");
        let fails = |len: i64| {
            checks
                .iter()
                .filter(|c| {
                    let Bound::Int(bound) = c.condition.bound else {
                        return false;
                    };
                    match c.condition.op {
                        CmpOp::Lt => len < bound,
                        CmpOp::Gt => len > bound,
                        _ => false,
                    }
                })
                .count()
        };
        assert_eq!(fails(3), 1);
        assert_eq!(fails(4), 0);
        assert_eq!(fails(5), 0);
        assert_eq!(fails(6), 1);
    }

    #[test]
    fn test_equal_and_code() {
        let checks = length("equal=2, code=E42").render("Endpoints", "r.Endpoints");
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].condition.op, CmpOp::Ne);
        assert_eq!(checks[0].failure.message, "Endpoints length must be exactly 2");
        assert_eq!(checks[0].failure.code.as_deref(), Some("E42"));
    }

    #[test]
    fn test_no_bounds_no_checks() {
        assert!(length("").render("Node", "r.Node").is_empty());
        assert!(length("message=\"x\"").render("Node", "r.Node").is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(length("max=5, min=4").to_string(), "length(min=4, max=5)");
        assert_eq!(
            length("equal=2, code=\"E1\"").to_string(),
            "length(equal=2, code=\"E1\")"
        );

        let quoted = length(r#"min=1, message="say \"hi\"""#);
        assert_eq!(quoted.message.as_deref(), Some(r#"say "hi""#));
        assert_eq!(quoted.to_string(), r#"length(min=1, message="say \"hi\"")"#);
    }
}
