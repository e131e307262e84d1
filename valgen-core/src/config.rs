//! Generator configuration loaded from `valgen.toml`.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the input root.
pub const CONFIG_FILE: &str = "valgen.toml";

/// Generator configuration.
///
/// Every key is optional; missing keys fall back to [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Doc comment line that opts a type declaration into generation.
    pub type_marker: String,

    /// Prefix of a field directive, e.g. `+validate` in `+validate(length(min=1))`.
    pub field_marker: String,

    /// Source file extension without the dot.
    pub extension: String,

    /// Suffix appended to the file stem of generated files.
    pub output_suffix: String,

    /// First line of every generated file.
    pub header: String,

    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,

    /// Package qualifiers whose types are never validated recursively.
    pub ignore_packages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_marker: "+generate:validate".to_string(),
            field_marker: "+validate".to_string(),
            extension: "go".to_string(),
            output_suffix: "_validate".to_string(),
            header: "// Code generated by valgen. DO NOT EDIT.".to_string(),
            skip_dirs: vec!["vendor".to_string(), "testdata".to_string()],
            ignore_packages: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("invalid valgen configuration")
    }

    /// Load a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::from_toml(&content).wrap_err_with(|| format!("in '{}'", path.display()))
    }

    /// Load `valgen.toml` from `root` if present, otherwise the defaults.
    ///
    /// `root` may be a directory or a single source file.
    pub fn discover(root: &Path) -> Result<Self> {
        match Self::locate(root) {
            Some(path) => Self::open(path),
            None => Ok(Self::default()),
        }
    }

    fn locate(root: &Path) -> Option<PathBuf> {
        let dir = if root.is_dir() { root } else { root.parent()? };
        let candidate = dir.join(CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    }

    /// Path of the companion file generated for `source`.
    ///
    /// `types.go` becomes `types_validate.go` in the same directory.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{}{}.{}", stem, self.output_suffix, self.extension))
    }

    /// Source file a generated companion was produced from.
    ///
    /// Inverse of [`Config::output_path`]; `None` if `generated` is not named
    /// like a companion file.
    pub fn source_path(&self, generated: &Path) -> Option<PathBuf> {
        let suffix = format!("{}.{}", self.output_suffix, self.extension);
        let name = generated.file_name()?.to_str()?;
        let stem = name.strip_suffix(&suffix).filter(|stem| !stem.is_empty())?;
        Some(generated.with_file_name(format!("{}.{}", stem, self.extension)))
    }

    /// Whether `path` has the configured source extension.
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }

    /// Whether `path` is named like a generated companion file.
    pub fn is_generated_name(&self, path: &Path) -> bool {
        let suffix = format!("{}.{}", self.output_suffix, self.extension);
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(&suffix))
    }

    /// Whether `content` starts with the generated-file header.
    pub fn has_header(&self, content: &str) -> bool {
        content.lines().next().map(str::trim_end) == Some(self.header.as_str())
    }
}
