//! Reconstruction of enumeration value sets from constant declarations.

use valgen_ir::{AllowedValues, Literal};
use valgen_source::ast::{BasicLit, ConstDecl, ConstSpec, Expr, LitKind};

use crate::pipeline::Diagnostic;

/// Collect the constant values declared with type `name`.
///
/// Inside each `const` group, a spec with an explicit type sets the current
/// type, a spec with neither type nor values repeats the previous one, and
/// an untyped spec with values ends the repetition. `iota` evaluates to the
/// spec's index within its group; implicit specs keep counting only while
/// the last explicit value was `iota`. Expressions that are neither a literal
/// nor `iota` are reported and left out.
pub fn extract<'a>(
    name: &str,
    decls: impl IntoIterator<Item = &'a ConstDecl>,
) -> (AllowedValues, Vec<Diagnostic>) {
    let mut allowed = AllowedValues::new();
    let mut diagnostics = Vec::new();

    for decl in decls {
        let mut current: Option<&str> = None;
        let mut counting = false;

        for spec in &decl.specs {
            match (&spec.ty, spec.values.is_empty()) {
                (Some(ty), _) => current = ty.as_local_name(),
                (None, false) => current = None,
                (None, true) => {}
            }
            if current != Some(name) {
                counting = false;
                continue;
            }

            if spec.values.is_empty() {
                if counting {
                    allowed.push(counter(spec));
                }
                continue;
            }

            for (constant, value) in spec.names.iter().zip(&spec.values) {
                match value {
                    Expr::Ident(ident) if ident.name == "iota" => {
                        allowed.push(counter(spec));
                        counting = true;
                    }
                    Expr::Lit(lit) if lit.kind != LitKind::Imag => {
                        allowed.push(literal(lit));
                        counting = false;
                    }
                    other => {
                        counting = false;
                        let text = match other {
                            Expr::Lit(lit) => lit.value.as_str(),
                            Expr::Ident(ident) => ident.name.as_str(),
                            Expr::Other { text, .. } => text.as_str(),
                        };
                        tracing::debug!(constant = %constant.name, expr = text, "unevaluated constant");
                        diagnostics.push(
                            Diagnostic::warning(
                                "collect",
                                format!(
                                    "cannot evaluate constant '{}' ({}); it is not an allowed value of '{}'",
                                    constant.name, text, name
                                ),
                            )
                            .at(format!("{}.{}", name, constant.name)),
                        );
                    }
                }
            }
        }
    }

    (allowed, diagnostics)
}

fn counter(spec: &ConstSpec) -> Literal {
    Literal::Int(spec.index.to_string())
}

fn literal(lit: &BasicLit) -> Literal {
    match lit.kind {
        LitKind::Str => Literal::Text(lit.value.clone()),
        LitKind::Float => Literal::Float(lit.value.clone()),
        LitKind::Int | LitKind::Char | LitKind::Imag => Literal::Int(lit.value.clone()),
    }
}
