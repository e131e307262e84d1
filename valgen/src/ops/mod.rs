//! Core operations.
//!
//! This module contains the business logic for valgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod discover;
pub mod explain;
pub mod generate;
pub mod rules;

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use miette::GraphicalReportHandler;
use valgen_codegen::pipeline::{Diagnostic, Pipeline, TracingPlugin};
use valgen_core::Config;
use valgen_ir::FileInfo;
use valgen_rules::RuleRegistry;

pub use check::check;
pub use clean::clean;
pub use explain::explain;
pub use generate::generate;
pub use rules::rules;

/// A source file after the analysis pipeline.
#[derive(Debug)]
pub struct Analysis {
    pub info: FileInfo,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read and analyze one source file.
pub fn analyze(path: &Path, config: &Config, registry: &RuleRegistry) -> Result<Analysis> {
    let src = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;

    let mut ctx = Pipeline::new()
        .plugin(TracingPlugin)
        .run(path, src, config, registry)?;
    let diagnostics = std::mem::take(&mut ctx.diagnostics);
    let info = ctx.take_info()?;
    Ok(Analysis { info, diagnostics })
}

/// Render a per-file failure.
///
/// Syntax and directive errors are drawn with their source snippet; other
/// errors print their cause chain.
pub fn render_error(err: &eyre::Report) -> String {
    if let Some(diagnostic) = err.downcast_ref::<valgen_source::Error>() {
        return render_diagnostic(diagnostic);
    }
    if let Some(diagnostic) = err.downcast_ref::<valgen_codegen::Error>() {
        return render_diagnostic(diagnostic);
    }
    format!("{:#}", err)
}

fn render_diagnostic(diagnostic: &dyn miette::Diagnostic) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, diagnostic) {
        Ok(()) => out,
        Err(_) => diagnostic.to_string(),
    }
}

/// Path relative to `root` for display, or the path itself.
pub fn display_path(root: &Path, path: &Path) -> PathBuf {
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_analyze_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("types.go");
        fs::write(
            &path,
            "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(length(min=1))\n\tName string\n}\n",
        )
        .unwrap();

        let analysis = analyze(&path, &Config::default(), &RuleRegistry::default()).unwrap();
        assert_eq!(analysis.info.path, path);
        assert_eq!(analysis.info.declarations.len(), 1);
        assert!(analysis.diagnostics.is_empty());
    }

    #[test]
    fn test_directive_error_renders_snippet() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("types.go");
        fs::write(
            &path,
            "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(email())\n\tMail string\n}\n",
        )
        .unwrap();

        let err = analyze(&path, &Config::default(), &RuleRegistry::default()).unwrap_err();
        let rendered = render_error(&err);
        assert!(rendered.contains("invalid directive on A.Mail"));
        assert!(rendered.contains("+validate(email())"));
    }

    #[test]
    fn test_missing_file_renders_chain() {
        let err = analyze(
            Path::new("/nonexistent/types.go"),
            &Config::default(),
            &RuleRegistry::default(),
        )
        .unwrap_err();
        assert!(render_error(&err).starts_with("failed to read '/nonexistent/types.go'"));
    }

    #[test]
    fn test_display_path() {
        let root = Path::new("/work/apis");
        assert_eq!(
            display_path(root, Path::new("/work/apis/v1/types.go")),
            PathBuf::from("v1/types.go")
        );
        assert_eq!(
            display_path(root, Path::new("/elsewhere/types.go")),
            PathBuf::from("/elsewhere/types.go")
        );
    }
}
