use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::token::Span;

/// Result type for source parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the file content and name so lexer and parser errors can carry a
/// [`NamedSource`] without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn unexpected_char(&self, ch: char, span: Span) -> Box<Error> {
        Box::new(Error::UnexpectedChar {
            src: self.named_source(),
            span: span.into(),
            ch,
        })
    }

    pub fn unterminated(&self, what: &'static str, span: Span) -> Box<Error> {
        Box::new(Error::Unterminated {
            src: self.named_source(),
            span: span.into(),
            what,
        })
    }

    pub fn syntax_error(
        &self,
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Box<Error> {
        Box::new(Error::Syntax {
            src: self.named_source(),
            span: span.into(),
            expected: expected.into(),
            found: found.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(valgen::source::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected character '{ch}'")]
    #[diagnostic(code(valgen::source::unexpected_char))]
    UnexpectedChar {
        #[source_code]
        src: NamedSource<String>,
        #[label("not valid here")]
        span: SourceSpan,
        ch: char,
    },

    #[error("unterminated {what}")]
    #[diagnostic(code(valgen::source::unterminated))]
    Unterminated {
        #[source_code]
        src: NamedSource<String>,
        #[label("{what} starts here")]
        span: SourceSpan,
        what: &'static str,
    },

    #[error("syntax error: expected {expected}, found {found}")]
    #[diagnostic(
        code(valgen::source::syntax),
        help("the file must be valid Go source")
    )]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected}")]
        span: SourceSpan,
        expected: String,
        found: String,
    },
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}
