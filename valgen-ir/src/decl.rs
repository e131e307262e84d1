use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::check::ValidationRule;
use crate::serde_helpers::serialize_rules;
use crate::shape::TypeShape;

/// Everything collected from one source file.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub package: String,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            declarations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Record(record) => Some((d.name.as_str(), record)),
            DeclarationKind::Enumeration(_) => None,
        })
    }

    pub fn enumerations(&self) -> impl Iterator<Item = (&str, &Enumeration)> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Enumeration(e) => Some((d.name.as_str(), e)),
            DeclarationKind::Record(_) => None,
        })
    }
}

/// An annotated type declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn record(name: impl Into<String>, record: Record) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Record(record),
        }
    }

    pub fn enumeration(name: impl Into<String>, enumeration: Enumeration) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Enumeration(enumeration),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationKind {
    Record(Record),
    Enumeration(Enumeration),
}

/// A structured type with named fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    pub fields: Vec<Field>,
}

/// One field of a record.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,
    pub shape: TypeShape,
    #[serde(serialize_with = "serialize_rules")]
    pub rules: Vec<Arc<dyn ValidationRule>>,
    /// Whether the field's value (or its elements) is validated recursively.
    pub nested: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            rules: Vec::new(),
            nested: false,
        }
    }
}

/// Category of the predeclared scalar an enumeration aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Integer,
    Float,
}

impl ScalarKind {
    /// Classify a predeclared type name.
    ///
    /// Returns `None` for anything that is not a string or numeric scalar.
    pub fn from_builtin(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ScalarKind::Text),
            "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16"
            | "uint32" | "uint64" | "uintptr" | "byte" | "rune" => Some(ScalarKind::Integer),
            "float32" | "float64" => Some(ScalarKind::Float),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Text => write!(f, "text"),
            ScalarKind::Integer => write!(f, "integer"),
            ScalarKind::Float => write!(f, "float"),
        }
    }
}

/// A scalar alias restricted to a closed set of values.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    pub base: ScalarKind,
    /// Source spelling of the aliased type (`string`, `int64`, ...).
    pub underlying: String,
    pub allowed: AllowedValues,
}

/// A constant value, carrying its source spelling.
///
/// Text literals keep their quotes (`"L1"` or a raw string), so the
/// spelling can be emitted back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Text(String),
    /// Integer spelling, including char literals and counter values.
    Int(String),
    Float(String),
}

impl Literal {
    pub fn spelling(&self) -> &str {
        match self {
            Literal::Text(s) | Literal::Int(s) | Literal::Float(s) => s,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Ordered set of allowed enumeration values.
///
/// Duplicates are dropped on insert; the first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedValues(Vec<Literal>);

impl AllowedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, literal: Literal) {
        if !self.0.contains(&literal) {
            self.0.push(literal);
        }
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.0.contains(literal)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Literal> for AllowedValues {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        let mut values = AllowedValues::new();
        for literal in iter {
            values.push(literal);
        }
        values
    }
}

impl<'a> IntoIterator for &'a AllowedValues {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::TypeRef;

    #[test]
    fn test_allowed_values_dedup_keeps_order() {
        let values: AllowedValues = [r#""L1""#, r#""L2""#, r#""L1""#, r#""L1L2""#]
            .into_iter()
            .map(|s| Literal::Text(s.to_string()))
            .collect();

        let texts: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(texts, vec![r#""L1""#, r#""L2""#, r#""L1L2""#]);
        assert!(values.contains(&Literal::Text(r#""L2""#.into())));
        assert!(!values.contains(&Literal::Text(r#""L3""#.into())));
    }

    #[test]
    fn test_scalar_kind_from_builtin() {
        assert_eq!(ScalarKind::from_builtin("string"), Some(ScalarKind::Text));
        assert_eq!(ScalarKind::from_builtin("uint16"), Some(ScalarKind::Integer));
        assert_eq!(ScalarKind::from_builtin("rune"), Some(ScalarKind::Integer));
        assert_eq!(ScalarKind::from_builtin("float64"), Some(ScalarKind::Float));
        assert_eq!(ScalarKind::from_builtin("bool"), None);
        assert_eq!(ScalarKind::from_builtin("Duration"), None);
    }

    #[test]
    fn test_file_info_partitions_declarations() {
        let mut info = FileInfo::new("types.go", "v1");
        info.declarations.push(Declaration::enumeration(
            "AdminState",
            Enumeration {
                base: ScalarKind::Text,
                underlying: "string".into(),
                allowed: AllowedValues::new(),
            },
        ));
        let mut record = Record::default();
        record
            .fields
            .push(Field::new("Name", TypeShape::direct(TypeRef::local("string"))));
        info.declarations.push(Declaration::record("NodeSpec", record));

        assert_eq!(info.enumerations().count(), 1);
        let records: Vec<_> = info.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "NodeSpec");
        assert_eq!(records[0].1.fields.len(), 1);
        assert!(info.get("AdminState").is_some());
    }
}
