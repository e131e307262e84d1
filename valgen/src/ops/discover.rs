//! Source and generated file discovery.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use valgen_core::Config;
use walkdir::{DirEntry, WalkDir};

/// Source files under `root`, sorted by path.
///
/// `root` may be a single file. Files starting with the generated header are
/// left out; a hand-written file that merely carries the output suffix is kept.
pub fn sources(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let files = candidates(root, config)?
        .into_iter()
        .filter(|path| !starts_with_header(path, config))
        .collect::<Vec<_>>();
    tracing::info!(root = %root.display(), files = files.len(), "discovered sources");
    Ok(files)
}

/// Generated companion files under `root`: named with the output suffix and
/// starting with the generated header.
pub fn generated(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    Ok(candidates(root, config)?
        .into_iter()
        .filter(|path| config.is_generated_name(path) && starts_with_header(path, config))
        .collect())
}

fn candidates(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(config
            .is_source(root)
            .then(|| root.to_path_buf())
            .into_iter()
            .collect());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry, config));
    for entry in walker {
        let entry = entry.wrap_err_with(|| format!("failed to walk '{}'", root.display()))?;
        if entry.file_type().is_file() && config.is_source(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_excluded_dir(entry: &DirEntry, config: &Config) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let excluded = name.starts_with('.') || config.skip_dirs.iter().any(|dir| *dir == name);
    if excluded {
        tracing::debug!(dir = %entry.path().display(), "skipping directory");
    }
    excluded
}

fn starts_with_header(path: &Path, config: &Config) -> bool {
    std::fs::read_to_string(path).is_ok_and(|content| config.has_header(&content))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_sources_skip_generated_and_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let header = Config::default().header;
        touch(root, "apis/v1/types.go", "package v1\n");
        touch(root, "apis/v1/types_validate.go", &format!("{}\n\npackage v1\n", header));
        touch(root, "apis/v1/zz_generated.go", &format!("{}\npackage v1\n", header));
        touch(root, "apis/v1/README.md", "docs");
        touch(root, "vendor/dep/dep.go", "package dep\n");
        touch(root, "testdata/bad.go", "package broken\n");
        touch(root, ".git/hooks/x.go", "package x\n");
        touch(root, "main.go", "package main\n");

        let config = Config::default();
        let files = sources(root, &config).unwrap();
        assert_eq!(names(root, &files), vec!["apis/v1/types.go", "main.go"]);

        let generated = generated(root, &config).unwrap();
        assert_eq!(names(root, &generated), vec!["apis/v1/types_validate.go"]);
    }

    #[test]
    fn test_single_file_root() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "types.go", "package v1\n");
        touch(temp.path(), "notes.txt", "");

        let config = Config::default();
        let file = temp.path().join("types.go");
        assert_eq!(sources(&file, &config).unwrap(), vec![file.clone()]);
        assert!(sources(&temp.path().join("notes.txt"), &config).unwrap().is_empty());
    }

    #[test]
    fn test_custom_skip_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "gen/a.go", "package gen\n");
        touch(temp.path(), "vendor/b.go", "package vendor\n");

        let config = Config {
            skip_dirs: vec!["gen".into()],
            ..Config::default()
        };
        let files = sources(temp.path(), &config).unwrap();
        assert_eq!(names(temp.path(), &files), vec!["vendor/b.go"]);
    }

    #[test]
    fn test_hand_written_suffix_file_is_a_source() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let annotated = "package v1

// +generate:validate
type Rule struct{}
";
        touch(root, "v1/policy_validate.go", annotated);

        let config = Config::default();
        let files = sources(root, &config).unwrap();
        assert_eq!(names(root, &files), vec!["v1/policy_validate.go"]);
        assert!(generated(root, &config).unwrap().is_empty());
    }
}
