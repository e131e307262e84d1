//! Validation rules and the checks they render.
//!
//! A [`ValidationRule`] never produces text directly. It renders a list of
//! [`Check`]s, each a single comparison that fails the value when it holds,
//! and the language emitter decides how a check is printed.

use std::fmt;

use serde::Serialize;

/// A typed constraint attached to a field.
///
/// Rules are immutable once constructed. Each bound that is set renders one
/// independent [`Check`]; a rule with no bounds renders nothing.
pub trait ValidationRule: fmt::Debug + fmt::Display + Send + Sync {
    /// Registry name of the rule kind (e.g. `length`).
    fn name(&self) -> &'static str;

    /// Render the checks for a field.
    ///
    /// `display_name` is used in failure messages, `access` is the
    /// target-language expression reading the field value.
    fn render(&self, display_name: &str, access: &str) -> Vec<Check>;
}

/// What a check compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "of", content = "access", rename_all = "snake_case")]
pub enum Operand {
    /// Cardinality of the value (string length, element count).
    Len(String),
    /// The value itself.
    Value(String),
}

impl Operand {
    /// The access expression the operand reads.
    pub fn access(&self) -> &str {
        match self {
            Operand::Len(access) | Operand::Value(access) => access,
        }
    }
}

/// Comparison operator of a failing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
}

impl CmpOp {
    /// Operator symbol shared by C-family languages.
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Ne => "!=",
        }
    }
}

/// A numeric bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Bound {
    /// Whole numbers print without a fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(v) => write!(f, "{}", v),
            Bound::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.0}", v),
            Bound::Float(v) => write!(f, "{}", v),
        }
    }
}

/// A condition that, when true, means the value is invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub operand: Operand,
    pub op: CmpOp,
    pub bound: Bound,
}

/// The failure reported when a condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Human-readable message.
    pub message: String,
    /// Optional classification code.
    pub code: Option<String>,
    /// Whether the actual value is appended to the message at runtime.
    pub report_actual: bool,
}

impl Failure {
    /// A custom message or the generated default.
    pub fn new(custom: Option<&str>, default: String, code: Option<&str>) -> Self {
        Self {
            message: custom.map(str::to_string).unwrap_or(default),
            code: code.map(str::to_string),
            report_actual: custom.is_none(),
        }
    }
}

/// One guarded check rendered by a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub condition: Condition,
    pub failure: Failure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_display() {
        assert_eq!(Bound::Int(4).to_string(), "4");
        assert_eq!(Bound::Float(100.0).to_string(), "100");
        assert_eq!(Bound::Float(-3.0).to_string(), "-3");
        assert_eq!(Bound::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_failure_custom_message() {
        let failure = Failure::new(Some("too short"), "x length must be at least 4".into(), None);
        assert_eq!(failure.message, "too short");
        assert!(!failure.report_actual);

        let failure = Failure::new(None, "x length must be at least 4".into(), Some("E1"));
        assert_eq!(failure.message, "x length must be at least 4");
        assert_eq!(failure.code.as_deref(), Some("E1"));
        assert!(failure.report_actual);
    }

    #[test]
    fn test_cmp_op_symbol() {
        assert_eq!(CmpOp::Le.symbol(), "<=");
        assert_eq!(CmpOp::Ne.symbol(), "!=");
    }
}
