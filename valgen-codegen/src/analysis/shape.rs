//! Type-shape classification.

use valgen_ir::{TypeRef, TypeShape};
use valgen_source::ast::TypeExpr;

use super::index::DeclIndex;

/// Structural shape of a declared field type.
///
/// Pointers become optional, slices and arrays sequences, maps mappings of
/// their value type. Inline structs and everything the parser keeps as
/// source text are opaque.
pub fn classify(ty: &TypeExpr) -> TypeShape {
    match ty {
        TypeExpr::Pointer { elem, .. } => TypeShape::optional(classify(elem)),
        TypeExpr::Slice { elem, .. } | TypeExpr::Array { elem, .. } => {
            TypeShape::sequence(classify(elem))
        }
        TypeExpr::Map { value, .. } => TypeShape::mapping(classify(value)),
        TypeExpr::Named {
            package: None,
            name,
        } => TypeShape::direct(TypeRef::local(&name.name)),
        TypeExpr::Named {
            package: Some(package),
            name,
        } => TypeShape::direct(TypeRef::external(&package.name, &name.name)),
        TypeExpr::Struct(_) => TypeShape::direct(TypeRef::opaque("struct{...}")),
        TypeExpr::Opaque { text, .. } => TypeShape::direct(TypeRef::opaque(text)),
    }
}

/// Whether values of `shape` are validated by calling their own `Validate`.
///
/// Local types qualify only when annotated in the same file. Types from
/// other packages are assumed to carry a `Validate` method unless their
/// package is in `ignore_packages`.
pub fn is_nested(shape: &TypeShape, index: &DeclIndex, ignore_packages: &[String]) -> bool {
    match shape.leaf() {
        TypeRef::Local { name } => index.contains(name),
        TypeRef::External { package, .. } => !ignore_packages.iter().any(|p| p == package),
        TypeRef::Opaque { .. } => false,
    }
}
