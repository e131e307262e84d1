//! Explain command report data structures.

use std::path::PathBuf;

use valgen_core::Config;

use super::output::{Output, Report};

/// Report data describing the pipeline and effective configuration.
#[derive(Debug)]
pub struct ExplainReport {
    /// Input root.
    pub root: PathBuf,
    /// Effective configuration.
    pub config: Config,
    pub phases: Vec<NamedItem>,
    pub lints: Vec<NamedItem>,
    pub rules: Vec<NamedItem>,
}

/// A named pipeline element with its description.
#[derive(Debug)]
pub struct NamedItem {
    pub name: String,
    pub description: String,
}

impl NamedItem {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("valgen pipeline");
        out.newline();

        out.key_value("Input", &self.root.display().to_string());
        out.key_value_indented("Type marker", &self.config.type_marker);
        out.key_value_indented("Field marker", &self.config.field_marker);
        out.key_value_indented(
            "Output",
            &format!("<name>{}.{}", self.config.output_suffix, self.config.extension),
        );
        out.key_value_indented("Skipped directories", &list(&self.config.skip_dirs));
        out.key_value_indented("Ignored packages", &list(&self.config.ignore_packages));
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Rules");
        for rule in &self.rules {
            out.list_item(&format!("{}: {}", rule.name, rule.description));
        }
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_config_and_phases() {
        let report = ExplainReport {
            root: "apis".into(),
            config: Config::default(),
            phases: vec![NamedItem::new("parse", "parse Go source")],
            lints: Vec::new(),
            rules: vec![NamedItem::new("length", "length of a string, slice or map")],
        };
        let text = BufferOutput::render(&report);
        assert!(text.contains("Input: apis"));
        assert!(text.contains("  Output: <name>_validate.go"));
        assert!(text.contains("  Skipped directories: vendor, testdata"));
        assert!(text.contains("  Ignored packages: (none)"));
        assert!(text.contains("  1. parse - parse Go source"));
        assert!(text.contains("  - length: length of a string, slice or map"));
    }
}
