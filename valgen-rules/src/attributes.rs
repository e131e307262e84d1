//! The `key=value, ...` attribute mini-language.

use indexmap::IndexMap;
use valgen_core::normalize_key;

use crate::error::{Error, Result};

/// One `key=value` pair as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
    normalized: String,
}

impl Attribute {
    /// Key with case, underscores and dashes folded away.
    pub fn normalized_key(&self) -> &str {
        &self.normalized
    }

    fn invalid(&self, rule: &'static str, expected: &'static str) -> Error {
        Error::InvalidValue {
            rule,
            key: self.key.clone(),
            value: self.value.clone(),
            expected,
        }
    }

    pub fn int(&self, rule: &'static str) -> Result<i64> {
        self.value
            .replace('_', "")
            .parse::<i64>()
            .map_err(|_| self.invalid(rule, "an integer"))
    }

    pub fn decimal(&self, rule: &'static str) -> Result<f64> {
        match self.value.replace('_', "").parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid(rule, "a number")),
        }
    }

    /// String value with surrounding quotes removed.
    ///
    /// Double-quoted values have their escapes resolved; backquoted values
    /// are raw.
    pub fn text(&self, rule: &'static str) -> Result<String> {
        let value = self.value.as_str();
        let quoted = ['"', '`']
            .into_iter()
            .find(|q| value.len() >= 2 && value.starts_with(*q) && value.ends_with(*q));
        match quoted {
            Some('"') => unescape(&value[1..value.len() - 1])
                .ok_or_else(|| self.invalid(rule, "a quoted string")),
            Some(_) => Ok(value[1..value.len() - 1].to_string()),
            None if value.contains(['"', '`']) => Err(self.invalid(rule, "a quoted string")),
            None => Ok(value.to_string()),
        }
    }
}

/// Attributes of one directive, keyed by normalized name.
///
/// A repeated key keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, Attribute>,
}

impl AttributeSet {
    /// Parse raw attribute text.
    ///
    /// Pairs are split on top-level commas (quotes and parentheses are
    /// respected) and each pair on its first `=`. Pairs without `=` are
    /// dropped.
    pub fn parse(raw: &str) -> Self {
        let mut entries = IndexMap::new();
        for pair in split_top_level(raw) {
            let Some((key, value)) = pair.split_once('=') else {
                if !pair.trim().is_empty() {
                    tracing::debug!(pair = pair.trim(), "skipping attribute without '='");
                }
                continue;
            };
            let key = key.trim();
            let normalized = normalize_key(key);
            entries.insert(
                normalized.clone(),
                Attribute {
                    key: key.to_string(),
                    value: value.trim().to_string(),
                    normalized,
                },
            );
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.entries.get(&normalize_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `\"`, `\\`, `\n` and `\t`; other escapes are kept as written.
///
/// `None` when the closing quote itself was escaped.
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' && q == '"' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let attrs = AttributeSet::parse("min = 4, max=5,equal= 2");
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("min").unwrap().int("length").unwrap(), 4);
        assert_eq!(attrs.get("MAX").unwrap().value, "5");
        assert_eq!(attrs.get("equal").unwrap().int("length").unwrap(), 2);
    }

    #[test]
    fn test_key_spellings_are_equal() {
        for raw in ["exclusive_min=100", "exclusiveMin=100", "ExclusiveMin=100"] {
            let attrs = AttributeSet::parse(raw);
            let attr = attrs.get("exclusive_min").unwrap();
            assert_eq!(attr.normalized_key(), "exclusivemin");
            assert_eq!(attr.decimal("range").unwrap(), 100.0);
        }
    }

    #[test]
    fn test_quoted_commas_and_parens() {
        let attrs = AttributeSet::parse(r#"min=1, message="a, b (c)", code="E1""#);
        assert_eq!(attrs.len(), 3);
        assert_eq!(
            attrs.get("message").unwrap().text("length").unwrap(),
            "a, b (c)"
        );
        assert_eq!(attrs.get("code").unwrap().text("length").unwrap(), "E1");
    }

    #[test]
    fn test_escapes_in_double_quotes() {
        let attrs = AttributeSet::parse(r#"message="say \"hi\", c:\\tmp", code=`raw \"`"#);
        assert_eq!(attrs.len(), 2);
        assert_eq!(
            attrs.get("message").unwrap().text("length").unwrap(),
            r#"say "hi", c:\tmp"#
        );
        assert_eq!(attrs.get("code").unwrap().text("length").unwrap(), r#"raw \""#);
    }

    #[test]
    fn test_escaped_closing_quote_is_invalid() {
        let attrs = AttributeSet::parse(r#"message="trailing\""#);
        assert!(attrs.get("message").unwrap().text("length").is_err());
    }

    #[test]
    fn test_pairs_without_equals_are_dropped() {
        let attrs = AttributeSet::parse("min=1, strict, ,");
        assert_eq!(attrs.len(), 1);
        assert!(AttributeSet::parse("").is_empty());
    }

    #[test]
    fn test_invalid_values() {
        let attrs = AttributeSet::parse("min=abc, max=1.5, message=\"open");
        assert!(matches!(
            attrs.get("min").unwrap().int("length"),
            Err(Error::InvalidValue { expected: "an integer", .. })
        ));
        assert!(attrs.get("max").unwrap().int("length").is_err());
        assert_eq!(attrs.get("max").unwrap().decimal("range").unwrap(), 1.5);
        assert!(attrs.get("message").unwrap().text("length").is_err());
    }

    #[test]
    fn test_last_value_wins() {
        let attrs = AttributeSet::parse("min=1, Min=2");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("min").unwrap().int("length").unwrap(), 2);
    }
}
