//! Lint for enumerations without values.

use valgen_ir::FileInfo;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Warns about enumerations with no constants in the file; their
/// generated `Validate` rejects every value.
pub struct EmptyEnumLint;

impl Lint for EmptyEnumLint {
    fn name(&self) -> &'static str {
        "empty-enum"
    }

    fn description(&self) -> &'static str {
        "Enumerations with no allowed values"
    }

    fn check(&self, info: &FileInfo, diagnostics: &mut Vec<Diagnostic>) {
        for (name, enumeration) in info.enumerations() {
            if enumeration.allowed.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        "lint",
                        format!("enumeration '{}' has no constants; every value is rejected", name),
                    )
                    .at(name),
                );
            }
        }
    }
}
