//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Renderable};

/// One indent level, as `gofmt` writes it.
const INDENT: &str = "\t";

/// Builds indented source text from [`Renderable`] nodes.
///
/// # Example
///
/// ```
/// use valgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};
///
/// struct Validate;
///
/// impl Renderable for Validate {
///     fn to_fragments(&self) -> Vec<CodeFragment> {
///         vec![CodeFragment::braced(
///             "func (r Level) Validate() error",
///             vec![CodeFragment::line("return nil")],
///         )]
///     }
/// }
///
/// let mut builder = CodeBuilder::go();
/// builder.emit(&Validate);
/// assert_eq!(builder.build(), "func (r Level) Validate() error {\n\treturn nil\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// A builder with tab indentation.
    pub fn go() -> Self {
        Self::default()
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => self.push_line(&s),
            // blank lines are never indented
            CodeFragment::Blank => self.buffer.push('\n'),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.indent_level += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.indent_level = self.indent_level.saturating_sub(1);
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
        }
    }

    fn push_line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fragments: Vec<CodeFragment>) -> String {
        struct Fragments(Vec<CodeFragment>);
        impl Renderable for Fragments {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                self.0.clone()
            }
        }

        let mut builder = CodeBuilder::go();
        builder.emit(&Fragments(fragments));
        builder.build()
    }

    #[test]
    fn test_basic_line() {
        assert_eq!(render(vec![CodeFragment::line("return nil")]), "return nil\n");
    }

    #[test]
    fn test_blank_line_is_not_indented() {
        let code = render(vec![CodeFragment::braced(
            "func f()",
            vec![
                CodeFragment::line("var errs error"),
                CodeFragment::blank(),
                CodeFragment::line("return errs"),
            ],
        )]);
        assert_eq!(code, "func f() {\n\tvar errs error\n\n\treturn errs\n}\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        let code = render(vec![CodeFragment::braced(
            "func (r *Node) Validate() error",
            vec![
                CodeFragment::braced("if r.Spec != nil", vec![CodeFragment::line("check()")]),
                CodeFragment::blank(),
                CodeFragment::line("return nil"),
            ],
        )]);
        assert_eq!(
            code,
            "func (r *Node) Validate() error {\n\tif r.Spec != nil {\n\t\tcheck()\n\t}\n\n\treturn nil\n}\n"
        );
    }
}
