//! Go methods.

use valgen_codegen::builder::{CodeFragment, Renderable};

use super::Stmt;

/// Method receiver, always named `r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub type_name: String,
    pub pointer: bool,
}

impl Receiver {
    pub fn value(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            pointer: false,
        }
    }

    pub fn pointer(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            pointer: true,
        }
    }
}

/// A method with no parameters returning `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub receiver: Receiver,
    pub name: String,
    pub body: Vec<Stmt>,
}

impl Func {
    pub fn validate(receiver: Receiver, body: Vec<Stmt>) -> Self {
        Self {
            receiver,
            name: "Validate".to_string(),
            body,
        }
    }

    pub fn signature(&self) -> String {
        let star = if self.receiver.pointer { "*" } else { "" };
        format!(
            "func (r {}{}) {}() error",
            star, self.receiver.type_name, self.name
        )
    }
}

impl Renderable for Func {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(self.signature(), self.body.as_slice().to_fragments())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    #[test]
    fn test_signature() {
        let func = Func::validate(Receiver::pointer("NodeSpec"), vec![Stmt::Return(Expr::nil())]);
        assert_eq!(func.signature(), "func (r *NodeSpec) Validate() error");
        assert_eq!(
            Func::validate(Receiver::value("Level"), vec![]).signature(),
            "func (r Level) Validate() error"
        );
    }
}
