//! Check operation - analyze sources without writing anything.

use std::path::Path;

use eyre::Result;
use rayon::prelude::*;
use valgen_core::Config;
use valgen_rules::RuleRegistry;

use super::{analyze, discover, display_path, render_error};
use crate::reports::{CheckReport, CheckedFile};

/// Execute the check operation.
///
/// Runs the analysis pipeline on every source file and returns the collected
/// declarations and diagnostics.
pub fn check(root: &Path, config: &Config) -> Result<CheckReport> {
    let sources = discover::sources(root, config)?;
    let registry = RuleRegistry::default();

    let mut files: Vec<CheckedFile> = sources
        .par_iter()
        .map(|path| {
            let display = display_path(root, path);
            match analyze(path, config, &registry) {
                Ok(analysis) => CheckedFile {
                    path: display,
                    declarations: analysis.info.declarations,
                    diagnostics: analysis.diagnostics,
                    error: None,
                },
                Err(err) => CheckedFile {
                    path: display,
                    declarations: Vec::new(),
                    diagnostics: Vec::new(),
                    error: Some(render_error(&err)),
                },
            }
        })
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(CheckReport { files })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use valgen_ir::DeclarationKind;

    use super::*;

    #[test]
    fn test_check_lists_declarations_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("levels.go"),
            r#"package v1

// +generate:validate
type Level string

const (
	LevelL1 Level = "L1"
	LevelL2 Level = "L2"
)

// +generate:validate
type Link struct {
	Level *Level
	// +validate(range(min=1, max=5))
	// +validate(range(min=10))
	Cost int
}
"#,
        )
        .unwrap();

        let report = check(temp.path(), &Config::default()).unwrap();
        assert!(!temp.path().join("levels_validate.go").exists());
        assert!(report.is_valid());

        let file = &report.files[0];
        assert_eq!(file.path, Path::new("levels.go"));
        assert_eq!(file.declarations.len(), 2);
        assert!(matches!(file.declarations[0].kind, DeclarationKind::Enumeration(_)));
        // min=10 contradicts max=5
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].location.as_deref(), Some("Link.Cost"));
    }

    #[test]
    fn test_check_reports_errors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.go"), "package v1\n\ntype A struct {\n").unwrap();

        let report = check(temp.path(), &Config::default()).unwrap();
        assert!(!report.is_valid());
        assert!(report.files[0].error.is_some());
    }
}
