//! Declaration-level syntax tree.
//!
//! Only what generation needs is modeled: type and constant declarations.
//! Imports, variables and function bodies are skipped by the parser.

use crate::token::{CommentGroup, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub package: Ident,
    pub decls: Vec<Decl>,
    pub comments: Vec<CommentGroup>,
}

impl SourceFile {
    pub fn type_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Type(decl) => Some(decl),
            Decl::Const(_) => None,
        })
    }

    pub fn const_decls(&self) -> impl Iterator<Item = &ConstDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Const(decl) => Some(decl),
            Decl::Type(_) => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Decl {
    Type(TypeDecl),
    Const(ConstDecl),
}

/// `type X ...` or `type ( ... )`.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub doc: Option<CommentGroup>,
    pub grouped: bool,
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: Ident,
    /// Declared with type parameters (`type List[T any] ...`).
    pub generic: bool,
    /// Alias declaration (`type A = B`).
    pub alias: bool,
    pub ty: TypeExpr,
}

/// `const X ...` or `const ( ... )`.
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub doc: Option<CommentGroup>,
    pub grouped: bool,
    pub specs: Vec<ConstSpec>,
}

#[derive(Debug, Clone)]
pub struct ConstSpec {
    pub doc: Option<CommentGroup>,
    /// 0-based position within the enclosing declaration.
    pub index: usize,
    pub names: Vec<Ident>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Str,
    Int,
    Float,
    Imag,
    Char,
}

/// A basic literal; `value` is the source spelling, sign included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

/// A constant expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Lit(BasicLit),
    Ident(Ident),
    /// Any compound expression, kept as source text.
    Other { text: String, span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Lit(lit) => lit.span,
            Expr::Ident(ident) => ident.span,
            Expr::Other { span, .. } => *span,
        }
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name` or `pkg.Name`.
    Named {
        package: Option<Ident>,
        name: Ident,
    },
    Pointer {
        elem: Box<TypeExpr>,
        span: Span,
    },
    Slice {
        elem: Box<TypeExpr>,
        span: Span,
    },
    Array {
        len: String,
        elem: Box<TypeExpr>,
        span: Span,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
        span: Span,
    },
    Struct(StructType),
    /// Interface, function, channel or generic instantiation.
    Opaque {
        text: String,
        span: Span,
    },
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named { package, name } => match package {
                Some(pkg) => pkg.span.to(name.span),
                None => name.span,
            },
            TypeExpr::Pointer { span, .. }
            | TypeExpr::Slice { span, .. }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Map { span, .. }
            | TypeExpr::Opaque { span, .. } => *span,
            TypeExpr::Struct(st) => st.span,
        }
    }

    /// Unqualified identifier name, if this is one.
    pub fn as_local_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named {
                package: None,
                name,
            } => Some(&name.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

/// One field line of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub doc: Option<CommentGroup>,
    /// Empty for embedded fields.
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}
