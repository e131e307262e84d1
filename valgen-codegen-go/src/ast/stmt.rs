//! Go statements.

use std::fmt;

use valgen_codegen::builder::{CodeFragment, Renderable};

use super::Expr;

/// Statements allowed in an `if` initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleStmt {
    /// `a, b := value`
    Define(Vec<String>, Expr),
    /// `target = value`
    Assign(Expr, Expr),
}

impl fmt::Display for SimpleStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleStmt::Define(names, value) => write!(f, "{} := {}", names.join(", "), value),
            SimpleStmt::Assign(target, value) => write!(f, "{} = {}", target, value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Simple(SimpleStmt),
    /// `var name ty`
    Var { name: String, ty: String },
    If {
        init: Option<SimpleStmt>,
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `for key, value := range over`
    Range {
        key: String,
        value: String,
        over: Expr,
        body: Vec<Stmt>,
    },
    Return(Expr),
}

impl Stmt {
    pub fn define(names: &[&str], value: Expr) -> Self {
        Stmt::Simple(SimpleStmt::Define(
            names.iter().map(|n| n.to_string()).collect(),
            value,
        ))
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Simple(SimpleStmt::Assign(target, value))
    }

    pub fn if_(cond: Expr, body: Vec<Stmt>) -> Self {
        Stmt::If {
            init: None,
            cond,
            body,
        }
    }

    pub fn if_init(init: SimpleStmt, cond: Expr, body: Vec<Stmt>) -> Self {
        Stmt::If {
            init: Some(init),
            cond,
            body,
        }
    }

    fn fragment(&self) -> CodeFragment {
        match self {
            Stmt::Simple(stmt) => CodeFragment::line(stmt.to_string()),
            Stmt::Var { name, ty } => CodeFragment::line(format!("var {} {}", name, ty)),
            Stmt::If { init, cond, body } => {
                let header = match init {
                    Some(init) => format!("if {}; {}", init, cond),
                    None => format!("if {}", cond),
                };
                CodeFragment::braced(header, body.as_slice().to_fragments())
            }
            Stmt::Range {
                key,
                value,
                over,
                body,
            } => CodeFragment::braced(
                format!("for {}, {} := range {}", key, value, over),
                body.as_slice().to_fragments(),
            ),
            Stmt::Return(value) => CodeFragment::line(format!("return {}", value)),
        }
    }
}

impl Renderable for Stmt {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.fragment()]
    }
}
