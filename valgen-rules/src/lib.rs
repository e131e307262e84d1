//! Validation rules for valgen.
//!
//! A field directive such as `+validate(range(min=1, exclusive_max=65536))`
//! is split by [`parse_directive`], its attribute text decoded by
//! [`AttributeSet`], and the rule built through the [`RuleRegistry`].

mod attributes;
mod directive;
mod error;
mod length;
mod range;
mod registry;

use std::fmt;

pub use attributes::{Attribute, AttributeSet};
pub use directive::{Directive, SKIP, is_directive, parse_directive};
pub use error::{Error, Result};
pub use length::Length;
pub use range::Range;
pub use registry::{ParamKind, ParamSpec, RuleConstructor, RuleInfo, RuleRegistry};

/// Write `name(k=v, ..., message="..", code="..")`.
/// Double-quoted spelling that `Attribute::text` reads back.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn write_params<'a>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    numbers: impl Iterator<Item = (&'a str, String)>,
    message: &Option<String>,
    code: &Option<String>,
) -> fmt::Result {
    let texts = [("message", message), ("code", code)];
    let texts = texts
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, quote(v))));

    let params: Vec<String> = numbers
        .chain(texts)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    write!(f, "{}({})", name, params.join(", "))
}
