//! Clean operation - remove orphaned generated files.

use std::path::Path;

use eyre::{Context, Result};
use valgen_core::Config;
use valgen_rules::RuleRegistry;

use super::{analyze, discover, display_path, render_error};
use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Source file or directory.
    pub root: &'a Path,
    pub config: &'a Config,
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
///
/// A generated file is orphaned when its source is gone or no longer has
/// annotated declarations. Files whose source fails to analyze are kept.
pub fn clean(opts: CleanOptions) -> Result<CleanReport> {
    let registry = RuleRegistry::default();
    let mut report = CleanReport {
        dry_run: opts.dry_run,
        deleted: Vec::new(),
        kept: Vec::new(),
    };

    for generated in discover::generated(opts.root, opts.config)? {
        let display = display_path(opts.root, &generated);
        let Some(source) = opts.config.source_path(&generated) else {
            continue;
        };

        let orphaned = if source.is_file() {
            match analyze(&source, opts.config, &registry) {
                Ok(analysis) => analysis.info.is_empty(),
                Err(err) => {
                    report.kept.push((display, render_error(&err)));
                    continue;
                }
            }
        } else {
            true
        };
        if !orphaned {
            continue;
        }

        if !opts.dry_run {
            std::fs::remove_file(&generated)
                .wrap_err_with(|| format!("failed to remove '{}'", generated.display()))?;
            tracing::info!(path = %generated.display(), "removed orphaned file");
        }
        report.deleted.push(display);
    }

    Ok(report)
}
