//! Generate operation - write validation companions for every source file.

use std::path::Path;

use eyre::{Context, Result};
use rayon::prelude::*;
use valgen_codegen_go::Generator;
use valgen_core::{Config, GeneratedFile, WriteResult};
use valgen_rules::RuleRegistry;

use super::{analyze, discover, display_path, render_error};
use crate::reports::{FileReport, FileStatus, GenerateReport};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Source file or directory.
    pub root: &'a Path,
    pub config: &'a Config,
    /// Whether to render without writing files.
    pub dry_run: bool,
    /// Worker threads; `None` uses the global pool.
    pub jobs: Option<usize>,
}

/// Execute the generate operation.
///
/// Files are processed in parallel and independently: a file that fails
/// is reported and leaves its companion untouched, the others proceed.
pub fn generate(opts: GenerateOptions) -> Result<GenerateReport> {
    let sources = discover::sources(opts.root, opts.config)?;
    let registry = RuleRegistry::default();
    let generator = Generator::new(opts.config);

    let run = || {
        sources
            .par_iter()
            .map(|path| generate_file(path, &opts, &registry, &generator))
            .collect::<Vec<_>>()
    };
    let mut files = match opts.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .wrap_err("failed to start worker threads")?
            .install(run),
        None => run(),
    };
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(GenerateReport {
        dry_run: opts.dry_run,
        files,
    })
}

fn generate_file(
    path: &Path,
    opts: &GenerateOptions,
    registry: &RuleRegistry,
    generator: &Generator,
) -> FileReport {
    let mut report = FileReport::new(display_path(opts.root, path));

    let analysis = match analyze(path, opts.config, registry) {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!(path = %path.display(), "generation failed");
            report.status = FileStatus::Failed(render_error(&err));
            return report;
        }
    };
    report.warnings = analysis
        .diagnostics
        .iter()
        .filter(|d| d.severity.is_warning())
        .map(ToString::to_string)
        .collect();

    if analysis.info.is_empty() {
        return report;
    }

    let output = display_path(opts.root, &opts.config.output_path(path));
    report.status = if opts.dry_run {
        FileStatus::Preview {
            output,
            content: generator.render(&analysis.info).render(),
        }
    } else {
        match generator.generate(&analysis.info) {
            Ok(Some(WriteResult::Written)) => FileStatus::Written(output),
            Ok(Some(WriteResult::Unchanged)) => FileStatus::Unchanged,
            Ok(None) => FileStatus::NoAnnotations,
            Err(err) => FileStatus::Failed(render_error(&err)),
        }
    };
    report
}
