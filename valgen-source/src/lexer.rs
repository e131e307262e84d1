//! Go tokenizer with automatic semicolon insertion and comment grouping.
//!
//! Comments never reach the token stream. They are collected into
//! [`CommentGroup`]s, and each token records the group that documents it:
//! the group ending on the line right above the token, with no token in
//! between. A group that starts on the same line as the previous token is a
//! trailing comment and documents nothing.

use crate::error::{Result, SourceContext};
use crate::token::{Comment, CommentGroup, Span, Token, TokenKind};

/// Operators and delimiters, longest first.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%",
    "&", "|", "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ".", ":", "~",
];

/// Tokens and comment groups of one file.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<CommentGroup>,
}

/// Tokenize the whole source of `ctx`.
pub fn tokenize(ctx: &SourceContext) -> Result<Lexed> {
    Lexer::new(ctx).run()
}

struct Lexer<'a> {
    ctx: &'a SourceContext,
    src: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    groups: Vec<CommentGroup>,
    /// Group that may still absorb the next comment.
    open_group: Option<usize>,
    /// Latest group seen since the last real token.
    candidate: Option<usize>,
    /// Line where the last real token ended.
    last_line: Option<usize>,
}

impl<'a> Lexer<'a> {
    fn new(ctx: &'a SourceContext) -> Self {
        let src = ctx.src();
        let pos = if src.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Self {
            ctx,
            src,
            pos,
            line: 1,
            tokens: Vec::new(),
            groups: Vec::new(),
            open_group: None,
            candidate: None,
            last_line: None,
        }
    }

    fn run(mut self) -> Result<Lexed> {
        loop {
            self.skip_blanks();
            let Some(c) = self.peek() else {
                self.insert_semi();
                let end = self.src.len();
                self.tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                    line: self.line,
                    doc: None,
                });
                break;
            };

            if c == '\n' {
                self.insert_semi();
                self.pos += 1;
                self.line += 1;
                continue;
            }

            let rest = &self.src[self.pos..];
            if rest.starts_with("//") {
                self.line_comment();
            } else if rest.starts_with("/*") {
                self.block_comment()?;
            } else {
                self.token(c)?;
            }
        }

        Ok(Lexed {
            tokens: self.tokens,
            comments: self.groups,
        })
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn skip_blanks(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn insert_semi(&mut self) {
        let needed = self
            .tokens
            .last()
            .is_some_and(|tok| tok.kind.ends_statement());
        if needed {
            self.tokens.push(Token {
                kind: TokenKind::Semi { implicit: true },
                span: Span::new(self.pos, self.pos),
                line: self.line,
                doc: None,
            });
        }
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let len = self.src[start..].find('\n').unwrap_or(self.src.len() - start);
        self.pos = start + len;
        let text = self.src[start..self.pos].trim_end_matches('\r').to_string();
        self.add_comment(text, Span::new(start, self.pos), self.line, self.line);
    }

    fn block_comment(&mut self) -> Result<()> {
        let start = self.pos;
        let start_line = self.line;
        let Some(len) = self.src[start + 2..].find("*/") else {
            return Err(self.ctx.unterminated("comment", Span::new(start, start + 2)));
        };
        let end = start + 2 + len + 2;
        let text = &self.src[start..end];
        let newlines = text.matches('\n').count();
        if newlines > 0 {
            // A multi-line comment acts like a newline.
            self.insert_semi();
        }
        self.pos = end;
        self.line += newlines;
        self.add_comment(text.to_string(), Span::new(start, end), start_line, self.line);
        Ok(())
    }

    fn add_comment(&mut self, text: String, span: Span, start_line: usize, end_line: usize) {
        let comment = Comment { text, span };

        if let Some(idx) = self.open_group {
            let group = &mut self.groups[idx];
            let adjacent = if group.trailing {
                start_line == group.end_line
            } else {
                start_line <= group.end_line + 1
            };
            if adjacent {
                group.comments.push(comment);
                group.end_line = end_line;
                self.candidate = Some(idx);
                return;
            }
        }

        let trailing = self.candidate.is_none() && self.last_line == Some(start_line);
        self.groups.push(CommentGroup {
            comments: vec![comment],
            start_line,
            end_line,
            trailing,
        });
        let idx = self.groups.len() - 1;
        self.open_group = Some(idx);
        self.candidate = Some(idx);
    }

    fn push(&mut self, kind: TokenKind, start: usize, start_line: usize) {
        let doc = self.candidate.filter(|&idx| {
            let group = &self.groups[idx];
            !group.trailing && group.end_line + 1 == start_line
        });
        self.tokens.push(Token {
            kind,
            span: Span::new(start, self.pos),
            line: start_line,
            doc,
        });
        self.candidate = None;
        self.open_group = None;
        self.last_line = Some(self.line);
    }

    fn token(&mut self, c: char) -> Result<()> {
        let start = self.pos;
        let start_line = self.line;

        let kind = if c.is_alphabetic() || c == '_' {
            self.ident()
        } else if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|n| n.is_ascii_digit())) {
            self.number()
        } else if c == '"' {
            self.interpreted_string()?
        } else if c == '`' {
            self.raw_string()?
        } else if c == '\'' {
            self.char_literal()?
        } else if c == ';' {
            self.pos += 1;
            TokenKind::Semi { implicit: false }
        } else {
            let rest = &self.src[start..];
            match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                Some(&op) => {
                    self.pos += op.len();
                    TokenKind::Op(op)
                }
                None => {
                    let span = Span::new(start, start + c.len_utf8());
                    return Err(self.ctx.unexpected_char(c, span));
                }
            }
        };

        self.push(kind, start, start_line);
        Ok(())
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        TokenKind::Ident(self.src[start..self.pos].to_string())
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        let rest = &self.src[start..];
        let hex = rest.starts_with("0x") || rest.starts_with("0X");
        let mut float = false;

        while let Some(c) = self.peek() {
            let exponent = if hex {
                c == 'p' || c == 'P'
            } else {
                c == 'e' || c == 'E'
            };
            if exponent {
                float = true;
                self.pos += 1;
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.pos += 1;
                }
            } else if c == '.' {
                float = true;
                self.pos += 1;
            } else if c.is_ascii_alphanumeric() || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = self.src[start..self.pos].to_string();
        if text.ends_with('i') {
            TokenKind::Imag(text)
        } else if float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        }
    }

    /// Scan to the closing `quote`, honoring backslash escapes on one line.
    fn quoted(&mut self, quote: char, what: &'static str) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(self.ctx.unterminated(what, Span::new(start, start + 1)));
                }
                Some('\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        if escaped == '\n' {
                            return Err(self.ctx.unterminated(what, Span::new(start, start + 1)));
                        }
                        self.pos += escaped.len_utf8();
                    }
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(self.src[start..self.pos].to_string());
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
    }

    fn interpreted_string(&mut self) -> Result<TokenKind> {
        self.quoted('"', "string literal").map(TokenKind::Str)
    }

    fn char_literal(&mut self) -> Result<TokenKind> {
        self.quoted('\'', "rune literal").map(TokenKind::Char)
    }

    fn raw_string(&mut self) -> Result<TokenKind> {
        let start = self.pos;
        let Some(len) = self.src[start + 1..].find('`') else {
            return Err(self.ctx.unterminated("raw string literal", Span::new(start, start + 1)));
        };
        let end = start + 1 + len + 1;
        self.line += self.src[start..end].matches('\n').count();
        self.pos = end;
        Ok(TokenKind::Str(self.src[start..end].to_string()))
    }
}
