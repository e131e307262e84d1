use std::path::PathBuf;

use eyre::Result;
use valgen_core::{Config, GeneratedFile, WriteResult};
use valgen_ir::FileInfo;

use crate::{ast::GoFile, lower::lower};

/// Go emitter for validation methods.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    config: &'a Config,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the companion module of `info` without touching the disk.
    pub fn render(&self, info: &FileInfo) -> GeneratedModule {
        GeneratedModule {
            path: self.config.output_path(&info.path),
            file: lower(info, &self.config.header),
        }
    }

    /// Render and write the companion module of `info`.
    ///
    /// Files without annotated declarations produce nothing and return `None`.
    pub fn generate(&self, info: &FileInfo) -> Result<Option<WriteResult>> {
        if info.is_empty() {
            tracing::debug!(path = %info.path.display(), "no annotated declarations");
            return Ok(None);
        }

        let module = self.render(info);
        let result = module.write()?;
        tracing::debug!(
            path = %module.path.display(),
            routines = module.file.funcs.len(),
            ?result,
            "generated module"
        );
        Ok(Some(result))
    }
}

/// The generated `_validate` file of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    path: PathBuf,
    file: GoFile,
}

impl GeneratedModule {
    pub fn file(&self) -> &GoFile {
        &self.file
    }

    /// Receiver type names in emission order.
    pub fn routines(&self) -> impl Iterator<Item = &str> {
        self.file.funcs.iter().map(|f| f.receiver.type_name.as_str())
    }

    pub fn imports(&self) -> &[String] {
        &self.file.imports
    }
}

impl GeneratedFile for GeneratedModule {
    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn render(&self) -> String {
        self.file.render()
    }
}
