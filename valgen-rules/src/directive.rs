//! Field directive syntax: `+validate(rule(key=value, ...))`.

use crate::error::{Error, Result};

/// Reserved rule name that excludes a field from generation.
pub const SKIP: &str = "skip";

/// A parsed field directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Skip,
    Rule {
        name: &'a str,
        /// Raw attribute text, handed verbatim to the registry.
        attributes: &'a str,
    },
}

/// Whether a comment body is a directive introduced by `marker`.
pub fn is_directive(body: &str, marker: &str) -> bool {
    body.trim()
        .strip_prefix(marker)
        .is_some_and(|rest| rest.starts_with('('))
}

/// Parse a directive comment body such as `+validate(length(min=1))`.
pub fn parse_directive(text: &str) -> Result<Directive<'_>> {
    let malformed = || Error::MalformedAnnotation {
        text: text.trim().to_string(),
    };

    let (Some(open), Some(close)) = (text.find('('), text.rfind(')')) else {
        return Err(malformed());
    };
    if open > close {
        return Err(malformed());
    }

    let content = &text[open + 1..close];
    let (name, attributes) = match content.split_once('(') {
        Some((name, rest)) => (name.trim(), rest.strip_suffix(')').unwrap_or(rest)),
        None => (content.trim(), ""),
    };

    if name.is_empty() {
        return Err(malformed());
    }
    if name == SKIP {
        return Ok(Directive::Skip);
    }
    Ok(Directive::Rule { name, attributes })
}
