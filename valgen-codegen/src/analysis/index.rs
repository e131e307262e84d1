use indexmap::IndexMap;
use valgen_ir::ScalarKind;
use valgen_source::ast::{SourceFile, TypeExpr, TypeSpec};

use crate::pipeline::Diagnostic;

/// What an annotated type generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Record,
    Enumeration(ScalarKind),
}

/// Annotated types of one file, in source order.
#[derive(Debug, Clone, Default)]
pub struct DeclIndex {
    decls: IndexMap<String, DeclKind>,
}

impl DeclIndex {
    /// Index every type spec annotated with `marker`.
    ///
    /// Annotated types that cannot be generated for (generic types, aliases,
    /// anything that is neither a struct nor a scalar) are reported as
    /// warnings and left out.
    pub fn build(file: &SourceFile, marker: &str, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut decls = IndexMap::new();

        for spec in annotated_specs(file, marker) {
            let name = spec.name.name.as_str();
            let unsupported = |reason: &str| {
                Diagnostic::warning("index", format!("'{}' {}; no validation generated", name, reason))
                    .at(name)
            };

            if spec.generic {
                diagnostics.push(unsupported("has type parameters"));
                continue;
            }
            if spec.alias {
                diagnostics.push(unsupported("is a type alias"));
                continue;
            }

            let kind = match &spec.ty {
                TypeExpr::Struct(_) => DeclKind::Record,
                ty => match ty.as_local_name().and_then(ScalarKind::from_builtin) {
                    Some(base) => DeclKind::Enumeration(base),
                    None => {
                        diagnostics.push(unsupported("is neither a struct nor a scalar type"));
                        continue;
                    }
                },
            };
            tracing::trace!(name, ?kind, "indexed declaration");
            decls.insert(name.to_string(), kind);
        }

        Self { decls }
    }

    pub fn get(&self, name: &str) -> Option<DeclKind> {
        self.decls.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DeclKind)> {
        self.decls.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Type specs carrying `marker` on their own doc or on the group's doc.
pub fn annotated_specs<'a>(
    file: &'a SourceFile,
    marker: &'a str,
) -> impl Iterator<Item = &'a TypeSpec> + 'a {
    file.type_decls().flat_map(move |decl| {
        let group_marked = decl.doc.as_ref().is_some_and(|doc| doc.has_line(marker));
        decl.specs.iter().filter(move |spec| {
            group_marked || spec.doc.as_ref().is_some_and(|doc| doc.has_line(marker))
        })
    })
}
