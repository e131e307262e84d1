use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use valgen_core::to_snake_case;
use valgen_ir::ValidationRule;

use crate::attributes::AttributeSet;
use crate::error::{Error, Result};
use crate::length::Length;
use crate::range::Range;

/// Builds a rule from its decoded attributes.
pub type RuleConstructor = fn(&AttributeSet) -> Result<Arc<dyn ValidationRule>>;

/// Kind a rule parameter is decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Decimal,
    Text,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Integer => write!(f, "integer"),
            ParamKind::Decimal => write!(f, "decimal"),
            ParamKind::Text => write!(f, "string"),
        }
    }
}

/// A named rule parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

/// Metadata describing a registered rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamSpec],
}

#[derive(Debug, Clone, Copy)]
struct RuleEntry {
    info: RuleInfo,
    construct: RuleConstructor,
}

/// Name → constructor table for rule kinds.
///
/// Built once and shared read-only; lookups are case-insensitive on the
/// snake_case form of the name.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: IndexMap<String, RuleEntry>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Register a rule kind, replacing any kind with the same name.
    pub fn register(&mut self, info: RuleInfo, construct: RuleConstructor) {
        self.rules
            .insert(normalize_name(info.name), RuleEntry { info, construct });
    }

    pub fn lookup(&self, name: &str) -> Option<RuleConstructor> {
        self.rules.get(&normalize_name(name)).map(|e| e.construct)
    }

    /// Decode `raw` attribute text and construct the named rule.
    pub fn construct(&self, name: &str, raw: &str) -> Result<Arc<dyn ValidationRule>> {
        let construct = self.lookup(name).ok_or_else(|| Error::UnsupportedRule {
            name: name.trim().to_string(),
        })?;
        let attrs = AttributeSet::parse(raw);
        tracing::trace!(rule = name, attributes = attrs.len(), "constructing rule");
        construct(&attrs)
    }

    /// Registered rule kinds in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleInfo> {
        self.rules.values().map(|e| &e.info)
    }
}

impl Default for RuleRegistry {
    /// Registry with the built-in `length` and `range` rules.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Length::INFO, |attrs| {
            Ok(Arc::new(Length::from_attributes(attrs)?))
        });
        registry.register(Range::INFO, |attrs| {
            Ok(Arc::new(Range::from_attributes(attrs)?))
        });
        registry
    }
}

fn normalize_name(name: &str) -> String {
    to_snake_case(name.trim())
}

#[cfg(test)]
mod tests {
    use valgen_ir::Check;

    use super::*;

    #[test]
    fn test_default_rules() {
        let registry = RuleRegistry::default();
        let names: Vec<_> = registry.rules().map(|r| r.name).collect();
        assert_eq!(names, vec!["length", "range"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = RuleRegistry::default();
        assert!(registry.lookup("length").is_some());
        assert!(registry.lookup("Length").is_some());
        assert!(registry.lookup("Range").is_some());
        assert!(registry.lookup("email").is_none());
    }

    #[test]
    fn test_construct() {
        let registry = RuleRegistry::default();
        let rule = registry.construct("length", "min=4, max=5").unwrap();
        assert_eq!(rule.name(), "length");
        assert_eq!(rule.to_string(), "length(min=4, max=5)");
    }

    #[test]
    fn test_unsupported_rule() {
        let err = RuleRegistry::default().construct("email", "").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedRule {
                name: "email".into()
            }
        );
    }

    #[derive(Debug)]
    struct NotEmpty;

    impl fmt::Display for NotEmpty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "not_empty()")
        }
    }

    impl ValidationRule for NotEmpty {
        fn name(&self) -> &'static str {
            "not_empty"
        }

        fn render(&self, display_name: &str, access: &str) -> Vec<Check> {
            Length {
                min: Some(1),
                ..Length::default()
            }
            .render(display_name, access)
        }
    }

    #[test]
    fn test_register_new_kind() {
        let mut registry = RuleRegistry::default();
        registry.register(
            RuleInfo {
                name: "not_empty",
                summary: "non-empty collection",
                params: &[],
            },
            |_| Ok(Arc::new(NotEmpty)),
        );

        let rule = registry.construct("NotEmpty", "").unwrap();
        assert_eq!(rule.render("Name", "r.Name").len(), 1);
        // existing kinds are untouched
        assert!(registry.construct("length", "min=1").is_ok());
        assert_eq!(registry.rules().count(), 3);
    }
}
