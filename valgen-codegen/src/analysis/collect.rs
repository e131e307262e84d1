//! Second analysis pass: fields, rules and enumeration values.

use std::sync::Arc;

use valgen_core::Config;
use valgen_ir::{Declaration, Enumeration, Field, Record, ValidationRule};
use valgen_rules::{Directive, RuleRegistry, is_directive, parse_directive};
use valgen_source::SourceContext;
use valgen_source::ast::{FieldDecl, SourceFile, StructType, TypeExpr, TypeSpec};

use super::enums;
use super::index::{DeclIndex, DeclKind, annotated_specs};
use super::shape::{classify, is_nested};
use crate::error::{Error, Result};
use crate::pipeline::Diagnostic;

/// Turns the indexed declarations of one file into IR declarations.
pub struct Collector<'a> {
    source: &'a SourceContext,
    config: &'a Config,
    registry: &'a RuleRegistry,
    index: &'a DeclIndex,
}

impl<'a> Collector<'a> {
    pub fn new(
        source: &'a SourceContext,
        config: &'a Config,
        registry: &'a RuleRegistry,
        index: &'a DeclIndex,
    ) -> Self {
        Self {
            source,
            config,
            registry,
            index,
        }
    }

    /// Collect every indexed declaration in source order.
    ///
    /// A malformed or unsupported directive fails the whole file.
    pub fn collect(
        &self,
        file: &SourceFile,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();

        for spec in annotated_specs(file, &self.config.type_marker) {
            let name = spec.name.name.as_str();
            let declaration = match (self.index.get(name), &spec.ty) {
                (Some(DeclKind::Record), TypeExpr::Struct(st)) => {
                    Declaration::record(name, self.record(name, st)?)
                }
                (Some(DeclKind::Enumeration(base)), ty) => {
                    let (allowed, warnings) = enums::extract(name, file.const_decls());
                    diagnostics.extend(warnings);
                    tracing::debug!(name, values = allowed.len(), "collected enumeration");
                    Declaration::enumeration(
                        name,
                        Enumeration {
                            base,
                            underlying: underlying(spec, ty),
                            allowed,
                        },
                    )
                }
                _ => continue,
            };
            declarations.push(declaration);
        }

        Ok(declarations)
    }

    fn record(&self, name: &str, st: &StructType) -> Result<Record> {
        let mut record = Record::default();

        for decl in &st.fields {
            if decl.is_embedded() {
                tracing::debug!(record = name, "skipping embedded field");
                continue;
            }
            let Some(rules) = self.rules(name, decl)? else {
                continue;
            };

            let shape = classify(&decl.ty);
            let nested = is_nested(&shape, self.index, &self.config.ignore_packages);
            for ident in &decl.names {
                record.fields.push(Field {
                    name: ident.name.clone(),
                    shape: shape.clone(),
                    rules: rules.clone(),
                    nested,
                });
            }
        }

        tracing::debug!(name, fields = record.fields.len(), "collected record");
        Ok(record)
    }

    /// Rules from the field's doc comment, or `None` if the field is skipped.
    fn rules(
        &self,
        record: &str,
        decl: &FieldDecl,
    ) -> Result<Option<Vec<Arc<dyn ValidationRule>>>> {
        let Some(doc) = &decl.doc else {
            return Ok(Some(Vec::new()));
        };
        let marker = self.config.field_marker.as_str();
        let directives: Vec<_> = doc
            .comments
            .iter()
            .filter(|c| is_directive(c.body(), marker))
            .collect();

        // skip wins over every other directive, well-formed or not
        let skipped = directives
            .iter()
            .any(|c| parse_directive(c.body()).is_ok_and(|d| d == Directive::Skip));
        if skipped {
            tracing::debug!(record, field = %field_label(decl), "field skipped");
            return Ok(None);
        }

        let mut rules = Vec::new();
        for comment in directives {
            let body = comment.body();
            let rule = match parse_directive(body) {
                Ok(Directive::Rule { name, attributes }) => self.registry.construct(name, attributes),
                Ok(Directive::Skip) => continue,
                Err(err) => Err(err),
            };
            match rule {
                Ok(rule) => rules.push(rule),
                Err(source) => {
                    return Err(Error::directive(
                        self.source,
                        comment.span,
                        record,
                        &field_label(decl),
                        body,
                        source,
                    ));
                }
            }
        }
        Ok(Some(rules))
    }
}

/// Aliased type spelling, e.g. `string` in `type Level string`.
fn underlying(spec: &TypeSpec, ty: &TypeExpr) -> String {
    ty.as_local_name()
        .map(str::to_string)
        .unwrap_or_else(|| spec.name.name.clone())
}

fn field_label(decl: &FieldDecl) -> String {
    decl.names
        .iter()
        .map(|ident| ident.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use valgen_ir::{DeclarationKind, Literal, ScalarKind, TypeRef, TypeShape};
    use valgen_source::parse;

    use super::*;

    fn collect(src: &str) -> Result<(Vec<Declaration>, Vec<Diagnostic>)> {
        collect_with(src, &Config::default())
    }

    fn collect_with(src: &str, config: &Config) -> Result<(Vec<Declaration>, Vec<Diagnostic>)> {
        let ctx = SourceContext::new(src, "types.go");
        let file = parse(&ctx).unwrap();
        let registry = RuleRegistry::default();
        let mut diagnostics = Vec::new();
        let index = DeclIndex::build(&file, &config.type_marker, &mut diagnostics);
        let decls = Collector::new(&ctx, config, &registry, &index).collect(&file, &mut diagnostics)?;
        Ok((decls, diagnostics))
    }

    fn record(decls: &[Declaration], name: &str) -> Record {
        match decls.iter().find(|d| d.name == name).map(|d| &d.kind) {
            Some(DeclarationKind::Record(r)) => r.clone(),
            _ => panic!("no record {}", name),
        }
    }

    const NODE: &str = r#"package v1

// +generate:validate
type NodeSpec struct {
	// Node name.
	// +validate(length(min=4, max=5))
	// +validate(range(max=5, exclusive_min=100))
	Node *string `json:"node,omitempty"`

	// +validate(length(equal=2, message="need two"))
	Endpoints []Endpoint `json:"endpoints"`

	Labels map[string]*Endpoint

	Meta metav1.ObjectMeta

	// +validate(range(min=1))
	// +validate(skip)
	Internal int

	Count, Limit int32 // +validate(range(min=1))

	Endpoint
}

// +generate:validate
type Endpoint struct {
	Address string
}
"#;

    #[test]
    fn test_record_fields() {
        let (decls, diagnostics) = collect(NODE).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(decls.len(), 2);

        let spec = record(&decls, "NodeSpec");
        let names: Vec<_> = spec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Node", "Endpoints", "Labels", "Meta", "Count", "Limit"]);

        let node = &spec.fields[0];
        assert_eq!(node.shape, TypeShape::optional(TypeShape::direct(TypeRef::local("string"))));
        assert!(!node.nested);
        let rules: Vec<String> = node.rules.iter().map(ToString::to_string).collect();
        assert_eq!(rules, vec!["length(min=4, max=5)", "range(max=5, exclusive_min=100)"]);

        let endpoints = &spec.fields[1];
        assert!(endpoints.nested);
        assert_eq!(endpoints.rules.len(), 1);

        assert!(spec.fields[2].nested);
        assert!(spec.fields[2].rules.is_empty());
        assert!(spec.fields[3].nested);
    }

    #[test]
    fn test_trailing_comments_are_not_directives() {
        let (decls, _) = collect(NODE).unwrap();
        let spec = record(&decls, "NodeSpec");
        let count = spec.fields.iter().find(|f| f.name == "Count").unwrap();
        assert!(count.rules.is_empty());
        assert!(!count.nested);
    }

    #[test]
    fn test_skip_drops_field() {
        let (decls, _) = collect(NODE).unwrap();
        let spec = record(&decls, "NodeSpec");
        assert!(spec.fields.iter().all(|f| f.name != "Internal"));
    }

    #[test]
    fn test_skip_wins_over_broken_directive() {
        let (decls, _) = collect(
            "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(email())\n\t// +validate(skip)\n\tX string\n}\n",
        )
        .unwrap();
        assert!(record(&decls, "A").fields.is_empty());
    }

    #[test]
    fn test_multiple_names_share_rules() {
        let (decls, _) = collect(
            "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(range(min=1))\n\tX, Y int\n}\n",
        )
        .unwrap();
        let fields = record(&decls, "A").fields;
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.rules.len() == 1));
    }

    #[test]
    fn test_enumeration() {
        let (decls, _) = collect(
            r#"package v1

// +generate:validate
type Level string

const (
	LevelL1 Level = "L1"
	LevelL2 Level = "L2"
)
"#,
        )
        .unwrap();

        let DeclarationKind::Enumeration(level) = &decls[0].kind else {
            panic!("expected enumeration");
        };
        assert_eq!(level.base, ScalarKind::Text);
        assert_eq!(level.underlying, "string");
        assert_eq!(
            level.allowed.iter().cloned().collect::<Vec<_>>(),
            vec![Literal::Text(r#""L1""#.into()), Literal::Text(r#""L2""#.into())]
        );
    }

    #[test]
    fn test_unsupported_rule_fails_file() {
        let src = "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(email(strict=true))\n\tMail string\n}\n";
        let err = collect(src).unwrap_err();
        let Error::Directive {
            declaration,
            field,
            directive,
            source,
            span,
            ..
        } = *err;
        assert_eq!(declaration, "A");
        assert_eq!(field, "Mail");
        assert_eq!(directive, "+validate(email(strict=true))");
        assert_eq!(
            source,
            valgen_rules::Error::UnsupportedRule {
                name: "email".into()
            }
        );
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "// +validate(email(strict=true))");
    }

    #[test]
    fn test_malformed_directive_fails_file() {
        let src = "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(length\n\tName string\n}\n";
        let err = collect(src).unwrap_err();
        assert!(err.to_string().contains("malformed annotation"));

        let src = "package v1\n\n// +generate:validate\ntype A struct {\n\t// +validate(length(min=x))\n\tName string\n}\n";
        let err = collect(src).unwrap_err();
        assert!(err.to_string().starts_with("invalid directive on A.Name"));
    }

    #[test]
    fn test_custom_markers_and_ignored_packages() {
        let config = Config {
            type_marker: "+gen".into(),
            field_marker: "+check".into(),
            ignore_packages: vec!["metav1".into()],
            ..Config::default()
        };
        let (decls, _) = collect_with(
            "package v1\n\n// +gen\ntype A struct {\n\t// +check(length(max=3))\n\t// +validate(length(max=1))\n\tName string\n\tMeta metav1.ObjectMeta\n}\n",
            &config,
        )
        .unwrap();
        let fields = record(&decls, "A").fields;
        assert_eq!(fields[0].rules.len(), 1);
        assert_eq!(fields[0].rules[0].to_string(), "length(max=3)");
        assert!(!fields[1].nested);
    }
}
