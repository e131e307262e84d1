//! Built-in lints.

mod contradictory_bounds;
mod empty_enum;
mod rule_target;

pub use contradictory_bounds::ContradictoryBoundsLint;
pub use empty_enum::EmptyEnumLint;
pub use rule_target::RuleTargetLint;

use valgen_ir::{Check, Field};

/// Rendered checks of every rule on a field, against a placeholder access.
fn field_checks(field: &Field) -> Vec<Check> {
    field
        .rules
        .iter()
        .flat_map(|rule| rule.render(&field.name, "v"))
        .collect()
}
