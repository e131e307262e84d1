use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the path the file is written to
    fn path(&self) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any previous content
    fn write(&self) -> Result<WriteResult> {
        write_file(&self.path(), &self.render())
    }
}

fn write_file(path: &Path, content: &str) -> Result<WriteResult> {
    // Byte-identical output is left alone so mtimes stay stable between runs
    if std::fs::read(path).is_ok_and(|existing| existing == content.as_bytes()) {
        return Ok(WriteResult::Unchanged);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the exact content
    Unchanged,
}
