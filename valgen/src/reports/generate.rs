//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// One entry per source file, sorted by path.
    pub files: Vec<FileReport>,
}

/// What happened to one source file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Non-fatal diagnostics, one line each.
    pub warnings: Vec<String>,
}

impl FileReport {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::NoAnnotations,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum FileStatus {
    /// No annotated declarations; nothing generated.
    NoAnnotations,
    Written(PathBuf),
    /// Output already had the exact content.
    Unchanged,
    /// Dry-run output.
    Preview { output: PathBuf, content: String },
    /// Rendered error; the companion file was left untouched.
    Failed(String),
}

impl GenerateReport {
    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.status, FileStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            for warning in &file.warnings {
                out.warning(&format!("{}: {}", file.path.display(), warning));
            }
        }

        for file in &self.files {
            if let FileStatus::Failed(message) = &file.status {
                out.error(&format!("failed to process {}", file.path.display()));
                out.preformatted(message);
            }
        }

        if self.dry_run {
            self.render_preview(out);
        } else {
            self.render_written(out);
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output) {
        let written: Vec<_> = self
            .files
            .iter()
            .filter_map(|f| match &f.status {
                FileStatus::Written(output) => Some(output),
                _ => None,
            })
            .collect();
        if !written.is_empty() {
            out.section("Generated");
            for output in written {
                out.added_item(&output.display().to_string());
            }
            out.newline();
        }

        let summary = format!(
            "{} written, {} unchanged, {} failed, {} without annotations",
            self.count(|s| matches!(s, FileStatus::Written(_))),
            self.count(|s| matches!(s, FileStatus::Unchanged)),
            self.count(|s| matches!(s, FileStatus::Failed(_))),
            self.count(|s| matches!(s, FileStatus::NoAnnotations)),
        );
        out.key_value("Summary", &summary);
    }

    fn render_preview(&self, out: &mut dyn Output) {
        let mut previews = 0;
        for file in &self.files {
            if let FileStatus::Preview { output, content } = &file.status {
                out.divider(&output.display().to_string());
                out.preformatted(content);
                previews += 1;
            }
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", previews));
    }
}
