//! Go expressions.

use std::fmt;

/// A Go expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    /// Source text emitted as is (numbers, `nil`, access paths).
    Raw(String),
    /// String literal, quoted on render.
    Str(String),
    Selector(Box<Expr>, String),
    Deref(Box<Expr>),
    Not(Box<Expr>),
    Call { func: Box<Expr>, args: Vec<Expr> },
    Index(Box<Expr>, Box<Expr>),
    Binary(Box<Expr>, &'static str, Box<Expr>),
    /// `map[K]struct{}{a: {}, b: {}}`
    Set { key_type: String, keys: Vec<String> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn str(text: impl Into<String>) -> Self {
        Expr::Str(text.into())
    }

    pub fn nil() -> Self {
        Expr::Raw("nil".to_string())
    }

    /// `pkg.Func(args...)` or `f(args...)`.
    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Expr::Selector(Box::new(self), name.into())
    }

    pub fn method(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::call(self.field(name), args)
    }

    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn index(self, key: Expr) -> Self {
        Expr::Index(Box::new(self), Box::new(key))
    }

    pub fn binary(self, op: &'static str, rhs: Expr) -> Self {
        Expr::Binary(Box::new(self), op, Box::new(rhs))
    }

    pub fn not_nil(self) -> Self {
        self.binary("!=", Expr::nil())
    }

    fn is_unary_or_binary(&self) -> bool {
        matches!(self, Expr::Deref(_) | Expr::Not(_) | Expr::Binary(..))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) | Expr::Raw(name) => f.write_str(name),
            Expr::Str(text) => f.write_str(&quote(text)),
            // selectors bind tighter than `*`
            Expr::Selector(base, name) if base.is_unary_or_binary() => {
                write!(f, "({}).{}", base, name)
            }
            Expr::Selector(base, name) => write!(f, "{}.{}", base, name),
            Expr::Deref(inner) => write!(f, "*{}", inner),
            Expr::Not(inner) if inner.is_unary_or_binary() => write!(f, "!({})", inner),
            Expr::Not(inner) => write!(f, "!{}", inner),
            Expr::Call { func, args } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", func, args.join(", "))
            }
            Expr::Index(base, key) => write!(f, "{}[{}]", base, key),
            Expr::Binary(lhs, op, rhs) => write!(f, "{} {} {}", lhs, op, rhs),
            Expr::Set { key_type, keys } => {
                let entries: Vec<String> = keys.iter().map(|k| format!("{}: {{}}", k)).collect();
                write!(f, "map[{}]struct{{}}{{{}}}", key_type, entries.join(", "))
            }
        }
    }
}

/// Quote `text` as a Go interpreted string literal.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r() -> Expr {
        Expr::ident("r")
    }

    #[test]
    fn test_selector_and_deref() {
        assert_eq!(r().field("Node").to_string(), "r.Node");
        assert_eq!(r().field("Node").deref().to_string(), "*r.Node");
        assert_eq!(
            r().field("Node").deref().method("Validate", vec![]).to_string(),
            "(*r.Node).Validate()"
        );
    }

    #[test]
    fn test_calls_and_comparisons() {
        let len = Expr::call(Expr::ident("len"), vec![r().field("Node").deref()]);
        assert_eq!(len.binary("<", Expr::raw("4")).to_string(), "len(*r.Node) < 4");
        assert_eq!(Expr::ident("ok").not().to_string(), "!ok");
        assert_eq!(r().field("Spec").not_nil().to_string(), "r.Spec != nil");
    }

    #[test]
    fn test_set_literal() {
        let set = Expr::Set {
            key_type: "string".into(),
            keys: vec![r#""L1""#.into(), r#""L2""#.into()],
        };
        assert_eq!(set.to_string(), r#"map[string]struct{}{"L1": {}, "L2": {}}"#);

        let empty = Expr::Set {
            key_type: "int".into(),
            keys: vec![],
        };
        assert_eq!(empty.to_string(), "map[int]struct{}{}");
    }

    #[test]
    fn test_index() {
        let lookup = Expr::ident("valid").index(Expr::call(Expr::ident("string"), vec![r()]));
        assert_eq!(lookup.to_string(), "valid[string(r)]");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\"\\n"), r#""say \"hi\"\\n""#);
        assert_eq!(quote("a\tb\nc"), r#""a\tb\nc""#);
        assert_eq!(quote("\u{1}"), r#""\x01""#);
    }
}
