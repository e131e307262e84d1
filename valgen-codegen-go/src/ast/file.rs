//! A complete Go source file.

use valgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Func, quote};

/// Header, package clause, imports and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct GoFile {
    pub header: String,
    pub package: String,
    /// Import paths, sorted.
    pub imports: Vec<String>,
    pub funcs: Vec<Func>,
}

impl GoFile {
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.build()
    }

    fn import_fragments(&self) -> Vec<CodeFragment> {
        match self.imports.as_slice() {
            [] => Vec::new(),
            [single] => vec![CodeFragment::line(format!("import {}", quote(single)))],
            many => vec![CodeFragment::block(
                "import (",
                many.iter().map(|path| CodeFragment::line(quote(path))).collect(),
                Some(")".to_string()),
            )],
        }
    }
}

impl Renderable for GoFile {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = vec![
            CodeFragment::line(&self.header),
            CodeFragment::blank(),
            CodeFragment::line(format!("package {}", self.package)),
        ];

        let imports = self.import_fragments();
        if !imports.is_empty() {
            fragments.push(CodeFragment::blank());
            fragments.extend(imports);
        }

        for func in &self.funcs {
            fragments.push(CodeFragment::blank());
            fragments.extend(func.to_fragments());
        }
        fragments
    }
}
