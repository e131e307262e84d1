//! Structural classification of field types.

use std::fmt;

use serde::Serialize;

/// The shape of a field's declared type.
///
/// Containers wrap their element (or map value) shape; unwrapping stops at
/// the first [`TypeShape::Direct`] layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "of", rename_all = "snake_case")]
pub enum TypeShape {
    /// Nullable value; absence is always valid.
    Optional(Box<TypeShape>),
    /// Ordered collection of elements.
    Sequence(Box<TypeShape>),
    /// Associative container; only values are validated.
    Mapping(Box<TypeShape>),
    /// A non-container type reference.
    Direct(TypeRef),
}

/// A reference to a named (or unnamed) type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ref", rename_all = "snake_case")]
pub enum TypeRef {
    /// Unqualified identifier, declared in the same file or predeclared.
    Local { name: String },
    /// Identifier qualified by another package.
    External { package: String, name: String },
    /// Anything else (inline struct, interface, function, channel).
    Opaque { text: String },
}

impl TypeRef {
    pub fn local(name: impl Into<String>) -> Self {
        TypeRef::Local { name: name.into() }
    }

    pub fn external(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::External {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        TypeRef::Opaque { text: text.into() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Local { name } => write!(f, "{}", name),
            TypeRef::External { package, name } => write!(f, "{}.{}", package, name),
            TypeRef::Opaque { text } => write!(f, "{}", text),
        }
    }
}

impl TypeShape {
    pub fn optional(inner: TypeShape) -> Self {
        TypeShape::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeShape) -> Self {
        TypeShape::Sequence(Box::new(inner))
    }

    pub fn mapping(inner: TypeShape) -> Self {
        TypeShape::Mapping(Box::new(inner))
    }

    pub fn direct(ty: TypeRef) -> Self {
        TypeShape::Direct(ty)
    }

    /// The innermost type reference.
    pub fn leaf(&self) -> &TypeRef {
        match self {
            TypeShape::Optional(inner) | TypeShape::Sequence(inner) | TypeShape::Mapping(inner) => {
                inner.leaf()
            }
            TypeShape::Direct(ty) => ty,
        }
    }

    /// Whether the outermost layer is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeShape::Optional(_))
    }

    /// Strip leading optional layers, returning how many were removed.
    pub fn peel_optional(&self) -> (usize, &TypeShape) {
        let mut depth = 0;
        let mut shape = self;
        while let TypeShape::Optional(inner) = shape {
            depth += 1;
            shape = inner;
        }
        (depth, shape)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Optional(inner) => write!(f, "optional<{}>", inner),
            TypeShape::Sequence(inner) => write!(f, "sequence<{}>", inner),
            TypeShape::Mapping(inner) => write!(f, "mapping<{}>", inner),
            TypeShape::Direct(ty) => write!(f, "{}", ty),
        }
    }
}
