//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from removing orphaned generated files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Deleted (or, in a dry run, deletable) files.
    pub deleted: Vec<PathBuf>,
    /// Generated files kept because their source failed to analyze.
    pub kept: Vec<(PathBuf, String)>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        for (path, error) in &self.kept {
            out.warning(&format!("keeping {}: its source could not be analyzed", path.display()));
            out.preformatted(error);
        }

        if self.deleted.is_empty() {
            out.preformatted("No orphaned files found.");
            return;
        }

        out.section(if self.dry_run { "Would delete" } else { "Deleted" });
        for path in &self.deleted {
            out.removed_item(&path.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_dry_run() {
        let report = CleanReport {
            dry_run: true,
            deleted: vec!["gone_validate.go".into()],
            kept: Vec::new(),
        };
        assert_eq!(
            BufferOutput::render(&report),
            "Would delete:\n  - gone_validate.go"
        );
    }

    #[test]
    fn test_render_nothing_to_do() {
        let report = CleanReport {
            dry_run: false,
            deleted: Vec::new(),
            kept: Vec::new(),
        };
        assert_eq!(BufferOutput::render(&report), "No orphaned files found.");
    }
}
