//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;
use valgen_codegen::pipeline::Diagnostic;
use valgen_ir::{Declaration, DeclarationKind, Field};

use super::output::{Output, Report};

/// Report data from analyzing sources without generating.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckReport {
    pub files: Vec<CheckedFile>,
}

/// Analysis result of one source file.
#[derive(Debug, Serialize)]
pub struct CheckedFile {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    /// Whether every file analyzed without errors.
    pub fn is_valid(&self) -> bool {
        self.files.iter().all(|f| f.error.is_none())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        let mut declarations = 0;
        for file in &self.files {
            let path = file.path.display().to_string();
            if let Some(error) = &file.error {
                out.error(&format!("failed to process {}", path));
                out.preformatted(error);
                continue;
            }
            if file.declarations.is_empty() {
                continue;
            }

            out.section(&path);
            for declaration in &file.declarations {
                render_declaration(out, declaration);
            }
            for diagnostic in &file.diagnostics {
                out.warning(&format!("{}: {}", path, diagnostic));
            }
            out.newline();
            declarations += file.declarations.len();
        }

        let failed = self.files.iter().filter(|f| f.error.is_some()).count();
        if failed == 0 {
            out.preformatted(&format!(
                "✓ {} files checked, {} annotated declarations",
                self.files.len(),
                declarations
            ));
        } else {
            out.preformatted(&format!("✗ {} of {} files failed", failed, self.files.len()));
        }
    }
}

fn render_declaration(out: &mut dyn Output, declaration: &Declaration) {
    match &declaration.kind {
        DeclarationKind::Record(record) => {
            out.list_item(&format!("{} (record)", declaration.name));
            for field in &record.fields {
                out.detail(&field.name, &describe_field(field));
            }
        }
        DeclarationKind::Enumeration(enumeration) => {
            let values: Vec<&str> = enumeration.allowed.iter().map(|l| l.spelling()).collect();
            out.list_item(&format!(
                "{} (enumeration of {}): {}",
                declaration.name,
                enumeration.underlying,
                values.join(", ")
            ));
        }
    }
}

fn describe_field(field: &Field) -> String {
    let mut parts = vec![field.shape.to_string()];
    parts.extend(field.rules.iter().map(ToString::to_string));
    if field.nested {
        parts.push("nested".to_string());
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use valgen_ir::{Enumeration, Literal, Record, ScalarKind, TypeRef, TypeShape};
    use valgen_rules::Length;

    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> CheckReport {
        let mut node = Field::new(
            "Node",
            TypeShape::optional(TypeShape::direct(TypeRef::local("string"))),
        );
        node.rules.push(Arc::new(Length {
            min: Some(4),
            ..Length::default()
        }));
        let mut location = Field::new(
            "Location",
            TypeShape::optional(TypeShape::direct(TypeRef::local("Location"))),
        );
        location.nested = true;

        let level = Enumeration {
            base: ScalarKind::Text,
            underlying: "string".into(),
            allowed: [Literal::Text("\"L1\"".into())].into_iter().collect(),
        };

        CheckReport {
            files: vec![CheckedFile {
                path: "v1/types.go".into(),
                declarations: vec![
                    Declaration::enumeration("Level", level),
                    Declaration::record(
                        "NodeSpec",
                        Record {
                            fields: vec![node, location],
                        },
                    ),
                ],
                diagnostics: Vec::new(),
                error: None,
            }],
        }
    }

    #[test]
    fn test_render_declarations() {
        let text = BufferOutput::render(&report());
        assert!(text.contains("v1/types.go:"));
        assert!(text.contains("  - Level (enumeration of string): \"L1\""));
        assert!(text.contains("  - NodeSpec (record)"));
        assert!(text.contains("      Node: optional<string> | length(min=4)"));
        assert!(text.contains("      Location: optional<Location> | nested"));
        assert!(text.ends_with("✓ 1 files checked, 2 annotated declarations"));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        let file = &json[0];
        assert_eq!(file["path"], "v1/types.go");
        assert_eq!(file["declarations"][0]["name"], "Level");
        assert_eq!(file["declarations"][0]["kind"], "enumeration");
        assert_eq!(file["declarations"][1]["fields"][0]["rules"][0], "length(min=4)");
        assert!(file.get("error").is_none());
    }
}
