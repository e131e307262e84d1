//! Lint for rules applied to a type they cannot check.

use valgen_ir::{Bound, Check, DeclarationKind, Field, FileInfo, Operand, ScalarKind, TypeRef, TypeShape};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns about length rules on numbers, range rules on strings or
/// collections, and fractional range bounds on integers. The generated
/// comparison would not compile.
pub struct RuleTargetLint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Text,
    Integer,
    Float,
    Collection,
    Unknown,
}

impl Target {
    fn of(field: &Field, info: &FileInfo) -> Self {
        let (_, shape) = field.shape.peel_optional();
        match shape {
            TypeShape::Sequence(_) | TypeShape::Mapping(_) => Target::Collection,
            TypeShape::Direct(TypeRef::Local { name }) => {
                let scalar = ScalarKind::from_builtin(name).or_else(|| {
                    info.get(name).and_then(|decl| match &decl.kind {
                        DeclarationKind::Enumeration(e) => Some(e.base),
                        DeclarationKind::Record(_) => None,
                    })
                });
                match scalar {
                    Some(ScalarKind::Text) => Target::Text,
                    Some(ScalarKind::Integer) => Target::Integer,
                    Some(ScalarKind::Float) => Target::Float,
                    None => Target::Unknown,
                }
            }
            _ => Target::Unknown,
        }
    }
}

impl Lint for RuleTargetLint {
    fn name(&self) -> &'static str {
        "rule-target"
    }

    fn description(&self) -> &'static str {
        "Length rules on numbers, range rules on strings and collections, fractional bounds on integers"
    }

    fn check(&self, info: &FileInfo, diagnostics: &mut Vec<Diagnostic>) {
        for (record_name, record) in info.records() {
            for field in &record.fields {
                if field.rules.is_empty() {
                    continue;
                }
                let target = Target::of(field, info);
                if target == Target::Unknown {
                    continue;
                }

                for rule in &field.rules {
                    let checks = rule.render(&field.name, "v");
                    let message = if checks.iter().any(|check| mismatch(check, target)) {
                        format!("rule {} does not apply to '{}' of type {}", rule, field.name, field.shape)
                    } else if target == Target::Integer && checks.iter().any(fractional) {
                        format!(
                            "rule {} has a fractional bound but '{}' is of integer type {}",
                            rule, field.name, field.shape
                        )
                    } else {
                        continue;
                    };
                    diagnostics.push(
                        Diagnostic::warning("lint", message).at(format!("{}.{}", record_name, field.name)),
                    );
                }
            }
        }
    }
}

fn mismatch(check: &Check, target: Target) -> bool {
    matches!(
        (&check.condition.operand, target),
        (Operand::Len(_), Target::Integer | Target::Float)
            | (Operand::Value(_), Target::Text | Target::Collection)
    )
}

/// A bound that no integer value can be compared against in Go.
fn fractional(check: &Check) -> bool {
    matches!(check.condition.bound, Bound::Float(v) if v.fract() != 0.0)
}

#[cfg(test)]
mod tests {
    use valgen_ir::{AllowedValues, Declaration, Enumeration, Record};
    use valgen_rules::RuleRegistry;

    use super::*;

    fn lint(shape: TypeShape, rule: (&str, &str)) -> Vec<Diagnostic> {
        let registry = RuleRegistry::default();
        let mut field = Field::new("F", shape);
        field.rules.push(registry.construct(rule.0, rule.1).unwrap());

        let mut info = FileInfo::new("t.go", "v1");
        info.declarations.push(Declaration::enumeration(
            "Level",
            Enumeration {
                base: ScalarKind::Text,
                underlying: "string".into(),
                allowed: AllowedValues::new(),
            },
        ));
        info.declarations
            .push(Declaration::record("T", Record { fields: vec![field] }));

        let mut diagnostics = Vec::new();
        RuleTargetLint.check(&info, &mut diagnostics);
        diagnostics
    }

    fn local(name: &str) -> TypeShape {
        TypeShape::direct(TypeRef::local(name))
    }

    #[test]
    fn test_length_on_number() {
        let diagnostics = lint(TypeShape::optional(local("int32")), ("length", "max=3"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "rule length(max=3) does not apply to 'F' of type optional<int32>"
        );
    }

    #[test]
    fn test_range_on_text_and_collections() {
        assert_eq!(lint(local("string"), ("range", "min=1")).len(), 1);
        assert_eq!(lint(local("Level"), ("range", "min=1")).len(), 1);
        assert_eq!(lint(TypeShape::sequence(local("int")), ("range", "min=1")).len(), 1);
    }

    #[test]
    fn test_matching_targets() {
        assert!(lint(local("string"), ("length", "min=1")).is_empty());
        assert!(lint(TypeShape::mapping(local("int")), ("length", "min=1")).is_empty());
        assert!(lint(TypeShape::optional(local("float64")), ("range", "max=1.5")).is_empty());
        assert!(lint(TypeShape::direct(TypeRef::external("pkg", "Size")), ("length", "min=1")).is_empty());
    }

    #[test]
    fn test_fractional_bound_on_integer() {
        let diagnostics = lint(local("int"), ("range", "min=0.5"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "rule range(min=0.5) has a fractional bound but 'F' is of integer type int"
        );
        assert_eq!(lint(TypeShape::optional(local("uint8")), ("range", "exclusive_max=9.9")).len(), 1);
    }

    #[test]
    fn test_whole_bounds_on_integer() {
        assert!(lint(local("int"), ("range", "min=1, max=100")).is_empty());
        assert!(lint(local("float32"), ("range", "min=0.5")).is_empty());
    }
}
