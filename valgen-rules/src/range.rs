use std::fmt;

use valgen_ir::{Bound, Check, CmpOp, Condition, Failure, Operand, ValidationRule};

use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::registry::{ParamKind, ParamSpec, RuleInfo};
use crate::write_params;

/// Numeric bounds on a value.
///
/// `min`/`max` are inclusive, `exclusive_min`/`exclusive_max` strict. All
/// four may be combined; each renders its own check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub exclusive_min: Option<f64>,
    pub exclusive_max: Option<f64>,
    pub message: Option<String>,
    pub code: Option<String>,
}

impl Range {
    pub const NAME: &'static str = "range";

    pub const INFO: RuleInfo = RuleInfo {
        name: Self::NAME,
        summary: "numeric bounds on a value",
        params: &[
            ParamSpec::new("min", ParamKind::Decimal, "fails when value < min"),
            ParamSpec::new("max", ParamKind::Decimal, "fails when value > max"),
            ParamSpec::new("exclusive_min", ParamKind::Decimal, "fails when value <= exclusive_min"),
            ParamSpec::new("exclusive_max", ParamKind::Decimal, "fails when value >= exclusive_max"),
            ParamSpec::new("message", ParamKind::Text, "replaces the default message"),
            ParamSpec::new("code", ParamKind::Text, "prefixes the message with [code]"),
        ],
    };

    pub fn from_attributes(attrs: &AttributeSet) -> Result<Self> {
        let mut rule = Range::default();
        for attr in attrs.iter() {
            match attr.normalized_key() {
                "min" => rule.min = Some(attr.decimal(Self::NAME)?),
                "max" => rule.max = Some(attr.decimal(Self::NAME)?),
                "exclusivemin" => rule.exclusive_min = Some(attr.decimal(Self::NAME)?),
                "exclusivemax" => rule.exclusive_max = Some(attr.decimal(Self::NAME)?),
                "message" => rule.message = Some(attr.text(Self::NAME)?),
                "code" => rule.code = Some(attr.text(Self::NAME)?),
                _ => tracing::debug!(rule = Self::NAME, key = %attr.key, "ignoring unknown attribute"),
            }
        }
        Ok(rule)
    }
}

impl ValidationRule for Range {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, display_name: &str, access: &str) -> Vec<Check> {
        let bounds = [
            (self.min, CmpOp::Lt, "must be at least"),
            (self.max, CmpOp::Gt, "must be at most"),
            (self.exclusive_min, CmpOp::Le, "must be greater than"),
            (self.exclusive_max, CmpOp::Ge, "must be less than"),
        ];

        bounds
            .into_iter()
            .filter_map(|(value, op, phrase)| {
                let bound = Bound::Float(value?);
                let message = format!("{} {} {}", display_name, phrase, bound);
                Some(Check {
                    condition: Condition {
                        operand: Operand::Value(access.to_string()),
                        op,
                        bound,
                    },
                    failure: Failure::new(self.message.as_deref(), message, self.code.as_deref()),
                })
            })
            .collect()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers = [
            ("min", self.min),
            ("max", self.max),
            ("exclusive_min", self.exclusive_min),
            ("exclusive_max", self.exclusive_max),
        ];
        let numbers = numbers
            .iter()
            .filter_map(|(key, value)| value.map(|v| (*key, Bound::Float(v).to_string())));
        write_params(f, Self::NAME, numbers, &self.message, &self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(raw: &str) -> Range {
        Range::from_attributes(&AttributeSet::parse(raw)).unwrap()
    }

    /// Evaluate the rendered checks against `value`, returning failing messages.
    fn failures(checks: &[Check], value: f64) -> Vec<&str> {
        checks
            .iter()
            .filter(|c| {
                let bound = match c.condition.bound {
                    Bound::Float(b) => b,
                    Bound::Int(b) => b as f64,
                };
                match c.condition.op {
                    CmpOp::Lt => value < bound,
                    CmpOp::Le => value <= bound,
                    CmpOp::Gt => value > bound,
                    CmpOp::Ge => value >= bound,
                    CmpOp::Ne => value != bound,
                }
            })
            .map(|c| c.failure.message.as_str())
            .collect()
    }

    #[test]
    fn test_exclusive_min_is_strict() {
        let checks = range("exclusive_min=100").render("Node", "r.Node");
        assert_eq!(failures(&checks, 100.0), vec!["Node must be greater than 100"]);
        assert!(failures(&checks, 100.5).is_empty());
    }

    #[test]
    fn test_exclusive_max_is_strict() {
        let checks = range("exclusiveMax=10").render("Port", "r.Port");
        assert_eq!(failures(&checks, 10.0).len(), 1);
        assert!(failures(&checks, 9.0).is_empty());
    }

    #[test]
    fn test_contradictory_bounds_preserved() {
        let checks = range("min=4, max=5, exclusive_min=100").render("Node", "*r.Node");
        assert_eq!(checks.len(), 3);

        // 4 and 5 pass the inclusive bounds but not the exclusive one
        assert_eq!(failures(&checks, 4.0), vec!["Node must be greater than 100"]);
        assert_eq!(failures(&checks, 5.0), vec!["Node must be greater than 100"]);
        // above 100 only max fails
        assert_eq!(failures(&checks, 101.0), vec!["Node must be at most 5"]);
    }

    #[test]
    fn test_custom_message_does_not_report_actual() {
        let checks = range("max=5, message=\"too big\"").render("Node", "r.Node");
        assert_eq!(checks[0].failure.message, "too big");
        assert!(!checks[0].failure.report_actual);
    }

    #[test]
    fn test_decimal_bounds_in_messages() {
        let checks = range("min=0.5").render("Ratio", "r.Ratio");
        assert_eq!(checks[0].failure.message, "Ratio must be at least 0.5");
        assert_eq!(checks[0].condition.bound, Bound::Float(0.5));
    }

    #[test]
    fn test_invalid_value() {
        let err = Range::from_attributes(&AttributeSet::parse("min=four")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'four' for range.min: expected a number"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            range("min=4, max=5, exclusive_min=100").to_string(),
            "range(min=4, max=5, exclusive_min=100)"
        );
    }
}
