use std::fmt;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident(String),
    Int(String),
    Float(String),
    Imag(String),
    Char(String),
    /// String literal spelling, quotes included.
    Str(String),
    /// Operator or delimiter.
    Op(&'static str),
    /// `;`, either written or inserted at a line end.
    Semi { implicit: bool },
    Eof,
}

impl TokenKind {
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, TokenKind::Ident(s) if s == name)
    }

    pub fn is_op(&self, op: &str) -> bool {
        matches!(self, TokenKind::Op(o) if *o == op)
    }

    /// Whether a newline after this token terminates the statement.
    pub(crate) fn ends_statement(&self) -> bool {
        match self {
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Imag(_)
            | TokenKind::Char(_)
            | TokenKind::Str(_) => true,
            TokenKind::Op(op) => matches!(*op, ")" | "]" | "}" | "++" | "--"),
            TokenKind::Semi { .. } | TokenKind::Eof => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "'{}'", s),
            TokenKind::Int(s)
            | TokenKind::Float(s)
            | TokenKind::Imag(s)
            | TokenKind::Char(s)
            | TokenKind::Str(s) => write!(f, "literal {}", s),
            TokenKind::Op(op) => write!(f, "'{}'", op),
            TokenKind::Semi { implicit: true } => write!(f, "newline"),
            TokenKind::Semi { implicit: false } => write!(f, "';'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the token start.
    pub line: usize,
    /// Index of the comment group documenting this token, if any.
    pub doc: Option<usize>,
}

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Raw text including the comment markers.
    pub text: String,
    pub span: Span,
}

impl Comment {
    /// Comment body without markers, trimmed.
    pub fn body(&self) -> &str {
        let text = self.text.as_str();
        let inner = if let Some(rest) = text.strip_prefix("//") {
            rest
        } else {
            text.strip_prefix("/*")
                .and_then(|rest| rest.strip_suffix("*/"))
                .unwrap_or(text)
        };
        inner.trim()
    }
}

/// Comments on adjacent lines with no token between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
    pub start_line: usize,
    pub end_line: usize,
    /// Started on the same line as the preceding token.
    pub trailing: bool,
}

impl CommentGroup {
    /// Comment bodies in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.comments.iter().map(Comment::body)
    }

    /// Whether any comment body equals `marker` exactly.
    pub fn has_line(&self, marker: &str) -> bool {
        self.lines().any(|line| line == marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_body() {
        let line = Comment {
            text: "//   +validate(skip)  ".into(),
            span: Span::default(),
        };
        assert_eq!(line.body(), "+validate(skip)");

        let block = Comment {
            text: "/* +generate:validate */".into(),
            span: Span::default(),
        };
        assert_eq!(block.body(), "+generate:validate");
    }

    #[test]
    fn test_span_to() {
        assert_eq!(Span::new(4, 8).to(Span::new(2, 5)), Span::new(2, 8));
    }
}
