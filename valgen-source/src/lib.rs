//! Go source front-end for valgen.
//!
//! Tokenizes a Go file, groups its comments and parses the declarations the
//! generator cares about (types and constants) into a small syntax tree.
//! Function bodies, imports and variables are skipped.

pub mod ast;
mod error;
mod lexer;
mod parser;
mod token;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
pub use lexer::{Lexed, tokenize};
pub use parser::parse;
pub use token::{Comment, CommentGroup, Span, Token, TokenKind};

/// Parse source text; `filename` is used in diagnostics.
pub fn parse_str(src: impl Into<String>, filename: impl Into<String>) -> Result<ast::SourceFile> {
    parse(&SourceContext::new(src, filename))
}

/// Read and parse a file, returning its context alongside the tree.
pub fn parse_path(path: &Path) -> Result<(SourceContext, ast::SourceFile)> {
    let src = std::fs::read_to_string(path).map_err(|source| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;
    let ctx = SourceContext::new(src, path.display().to_string());
    let file = parse(&ctx)?;
    Ok((ctx, file))
}
