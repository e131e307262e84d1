use crate::ast::{
    BasicLit, ConstDecl, ConstSpec, Decl, Expr, FieldDecl, Ident, LitKind, SourceFile,
    StructType, TypeDecl, TypeExpr, TypeSpec,
};
use crate::error::{Error, Result, SourceContext};
use crate::lexer::{Lexed, tokenize};
use crate::token::{CommentGroup, Span, Token, TokenKind};

/// Parse the source held by `ctx`.
pub fn parse(ctx: &SourceContext) -> Result<SourceFile> {
    let lexed = tokenize(ctx)?;
    Parser::new(ctx, lexed).parse_file()
}

struct Parser<'a> {
    ctx: &'a SourceContext,
    tokens: Vec<Token>,
    groups: Vec<CommentGroup>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(ctx: &'a SourceContext, lexed: Lexed) -> Self {
        Self {
            ctx,
            tokens: lexed.tokens,
            groups: lexed.comments,
            pos: 0,
        }
    }

    // ---- token access ----

    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn kind_at(&self, offset: usize) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)].kind
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn prev_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |tok| tok.span.end)
    }

    fn at_op(&self, op: &str) -> bool {
        self.peek().kind.is_op(op)
    }

    fn at_semi(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Semi { .. })
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.at_op(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_semis(&mut self) {
        while self.at_semi() {
            self.pos += 1;
        }
    }

    fn error(&self, expected: &str) -> Box<Error> {
        let tok = self.peek();
        self.ctx
            .syntax_error(expected, tok.kind.to_string(), tok.span)
    }

    fn expect_op(&mut self, op: &str) -> Result<Token> {
        if self.at_op(op) {
            Ok(self.bump())
        } else {
            Err(self.error(&format!("'{}'", op)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<Ident> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let ident = Ident {
                    name: name.clone(),
                    span: self.peek().span,
                };
                self.pos += 1;
                Ok(ident)
            }
            _ => Err(self.error(what)),
        }
    }

    /// Finish a spec inside a group closed by `closer`.
    fn end_spec(&mut self, closer: &str) -> Result<()> {
        if self.at_semi() {
            self.pos += 1;
            Ok(())
        } else if self.at_op(closer) {
            Ok(())
        } else {
            Err(self.error("';' or newline"))
        }
    }

    fn doc(&self, tok: &Token) -> Option<CommentGroup> {
        tok.doc.and_then(|idx| self.groups.get(idx).cloned())
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.ctx.src()[start..end].to_string()
    }

    // ---- skipping ----

    /// Skip from an opening delimiter to its matching closer, inclusive.
    fn skip_balanced(&mut self) -> Result<()> {
        let open = self.bump();
        let mut depth = 1usize;
        loop {
            let tok = self.bump();
            match tok.kind {
                TokenKind::Op("(" | "[" | "{") => depth += 1,
                TokenKind::Op(")" | "]" | "}") => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(self.ctx.syntax_error(
                        "closing delimiter",
                        "end of file",
                        open.span,
                    ));
                }
                _ => {}
            }
        }
    }

    /// Skip a statement up to (not including) its terminating semicolon.
    fn skip_to_semi(&mut self) -> Result<()> {
        loop {
            match &self.peek().kind {
                TokenKind::Semi { .. } | TokenKind::Eof => return Ok(()),
                TokenKind::Op("(" | "[" | "{") => self.skip_balanced()?,
                _ => {
                    self.pos += 1;
                }
            }
        }
    }

    /// `import` and `var` declarations are not needed.
    fn skip_decl(&mut self) -> Result<()> {
        self.bump();
        if self.at_op("(") {
            self.skip_balanced()
        } else {
            self.skip_to_semi()
        }
    }

    /// Skip a function or method declaration including its body.
    fn skip_func(&mut self) -> Result<()> {
        self.bump();
        loop {
            match &self.peek().kind {
                TokenKind::Op("(" | "[") => self.skip_balanced()?,
                TokenKind::Op("{") => {
                    let type_brace = self.pos > 0
                        && matches!(
                            &self.tokens[self.pos - 1].kind,
                            TokenKind::Ident(kw) if kw == "struct" || kw == "interface"
                        );
                    self.skip_balanced()?;
                    if !type_brace {
                        return Ok(());
                    }
                }
                // declaration without body
                TokenKind::Semi { .. } | TokenKind::Eof => return Ok(()),
                _ => {
                    self.pos += 1;
                }
            }
        }
    }

    // ---- declarations ----

    fn parse_file(mut self) -> Result<SourceFile> {
        self.skip_semis();
        if !self.peek().kind.is_ident("package") {
            return Err(self.error("package clause"));
        }
        self.bump();
        let package = self.expect_ident("package name")?;

        let mut decls = Vec::new();
        loop {
            self.skip_semis();
            let keyword = match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Ident(kw) => kw.clone(),
                _ => return Err(self.error("declaration")),
            };
            match keyword.as_str() {
                "import" | "var" => self.skip_decl()?,
                "func" => self.skip_func()?,
                "type" => decls.push(Decl::Type(self.type_decl()?)),
                "const" => decls.push(Decl::Const(self.const_decl()?)),
                _ => return Err(self.error("declaration")),
            }
        }

        Ok(SourceFile {
            package,
            decls,
            comments: self.groups,
        })
    }

    fn type_decl(&mut self) -> Result<TypeDecl> {
        let keyword = self.bump();
        let doc = self.doc(&keyword);

        if !self.eat_op("(") {
            let spec = self.type_spec()?;
            return Ok(TypeDecl {
                doc,
                grouped: false,
                specs: vec![spec],
            });
        }

        let mut specs = Vec::new();
        loop {
            self.skip_semis();
            if self.eat_op(")") {
                break;
            }
            specs.push(self.type_spec()?);
            self.end_spec(")")?;
        }
        Ok(TypeDecl {
            doc,
            grouped: true,
            specs,
        })
    }

    fn type_spec(&mut self) -> Result<TypeSpec> {
        let doc = self.doc(&self.peek().clone());
        let name = self.expect_ident("type name")?;

        let generic = self.at_op("[") && self.at_type_params();
        if generic {
            self.skip_balanced()?;
        }
        let alias = self.eat_op("=");
        let ty = self.parse_type()?;

        Ok(TypeSpec {
            doc,
            name,
            generic,
            alias,
            ty,
        })
    }

    /// Tell `type L[T any] ...` apart from `type A [N]int`.
    fn at_type_params(&self) -> bool {
        matches!(self.kind_at(1), TokenKind::Ident(_))
            && match self.kind_at(2) {
                TokenKind::Ident(_) => true,
                TokenKind::Op(op) => matches!(*op, "," | "~"),
                _ => false,
            }
    }

    fn const_decl(&mut self) -> Result<ConstDecl> {
        let keyword = self.bump();
        let doc = self.doc(&keyword);

        if !self.eat_op("(") {
            let spec = self.const_spec(0)?;
            return Ok(ConstDecl {
                doc,
                grouped: false,
                specs: vec![spec],
            });
        }

        let mut specs = Vec::new();
        loop {
            self.skip_semis();
            if self.eat_op(")") {
                break;
            }
            let index = specs.len();
            specs.push(self.const_spec(index)?);
            self.end_spec(")")?;
        }
        Ok(ConstDecl {
            doc,
            grouped: true,
            specs,
        })
    }

    fn const_spec(&mut self, index: usize) -> Result<ConstSpec> {
        let doc = self.doc(&self.peek().clone());

        let mut names = vec![self.expect_ident("constant name")?];
        while self.eat_op(",") {
            names.push(self.expect_ident("constant name")?);
        }

        let ty = if self.at_op("=") || self.at_op(")") || self.at_semi() {
            None
        } else {
            Some(self.parse_type()?)
        };

        let mut values = Vec::new();
        if self.eat_op("=") {
            loop {
                values.push(self.expr()?);
                if !self.eat_op(",") {
                    break;
                }
            }
        }

        Ok(ConstSpec {
            doc,
            index,
            names,
            ty,
            values,
        })
    }

    fn expr(&mut self) -> Result<Expr> {
        let start = self.pos;
        loop {
            match &self.peek().kind {
                TokenKind::Op("(" | "[" | "{") => self.skip_balanced()?,
                TokenKind::Op(")" | "]" | "}" | ",") | TokenKind::Semi { .. } | TokenKind::Eof => {
                    break;
                }
                _ => {
                    self.pos += 1;
                }
            }
        }

        let tokens = &self.tokens[start..self.pos];
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(self.error("expression"));
        };
        let span = first.span.to(last.span);

        let expr = match tokens {
            [tok] => match &tok.kind {
                TokenKind::Ident(name) => Expr::Ident(Ident {
                    name: name.clone(),
                    span,
                }),
                kind => match literal(kind) {
                    Some((kind, value)) => Expr::Lit(BasicLit { kind, value, span }),
                    None => Expr::Other {
                        text: self.text(span.start, span.end),
                        span,
                    },
                },
            },
            [sign, tok] if sign.kind.is_op("-") || sign.kind.is_op("+") => {
                match literal(&tok.kind) {
                    Some((kind @ (LitKind::Int | LitKind::Float), value)) => {
                        let value = if sign.kind.is_op("-") {
                            format!("-{}", value)
                        } else {
                            value
                        };
                        Expr::Lit(BasicLit { kind, value, span })
                    }
                    _ => Expr::Other {
                        text: self.text(span.start, span.end),
                        span,
                    },
                }
            }
            _ => Expr::Other {
                text: self.text(span.start, span.end),
                span,
            },
        };
        Ok(expr)
    }

    // ---- types ----

    fn parse_type(&mut self) -> Result<TypeExpr> {
        let tok = self.peek().clone();
        let start = tok.span.start;

        match &tok.kind {
            TokenKind::Ident(word) => match word.as_str() {
                "struct" => self.struct_type().map(TypeExpr::Struct),
                "map" => {
                    self.bump();
                    self.expect_op("[")?;
                    let key = self.parse_type()?;
                    self.expect_op("]")?;
                    let value = self.parse_type()?;
                    Ok(TypeExpr::Map {
                        key: Box::new(key),
                        value: Box::new(value),
                        span: Span::new(start, self.prev_end()),
                    })
                }
                "interface" => {
                    self.bump();
                    if !self.at_op("{") {
                        return Err(self.error("'{'"));
                    }
                    self.skip_balanced()?;
                    Ok(self.opaque(start))
                }
                "func" => {
                    self.bump();
                    self.skip_signature()?;
                    Ok(self.opaque(start))
                }
                "chan" => {
                    self.bump();
                    self.eat_op("<-");
                    self.parse_type()?;
                    Ok(self.opaque(start))
                }
                _ => self.named_type(),
            },
            TokenKind::Op("*") => {
                self.bump();
                let elem = self.parse_type()?;
                Ok(TypeExpr::Pointer {
                    elem: Box::new(elem),
                    span: Span::new(start, self.prev_end()),
                })
            }
            TokenKind::Op("[") => {
                self.bump();
                if self.eat_op("]") {
                    let elem = self.parse_type()?;
                    return Ok(TypeExpr::Slice {
                        elem: Box::new(elem),
                        span: Span::new(start, self.prev_end()),
                    });
                }
                let len_start = self.peek().span.start;
                while !self.at_op("]") {
                    match &self.peek().kind {
                        TokenKind::Op("(" | "[" | "{") => self.skip_balanced()?,
                        TokenKind::Eof | TokenKind::Semi { .. } => return Err(self.error("']'")),
                        _ => {
                            self.pos += 1;
                        }
                    }
                }
                let len = self.text(len_start, self.prev_end());
                self.expect_op("]")?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(elem),
                    span: Span::new(start, self.prev_end()),
                })
            }
            TokenKind::Op("<-") => {
                self.bump();
                if !self.peek().kind.is_ident("chan") {
                    return Err(self.error("'chan'"));
                }
                self.bump();
                self.parse_type()?;
                Ok(self.opaque(start))
            }
            TokenKind::Op("(") => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect_op(")")?;
                Ok(inner)
            }
            _ => Err(self.error("type")),
        }
    }

    fn named_type(&mut self) -> Result<TypeExpr> {
        let start = self.peek().span.start;
        let first = self.expect_ident("type name")?;
        let named = if self.eat_op(".") {
            let name = self.expect_ident("type name")?;
            TypeExpr::Named {
                package: Some(first),
                name,
            }
        } else {
            TypeExpr::Named {
                package: None,
                name: first,
            }
        };

        // generic instantiation
        if self.at_op("[") {
            self.skip_balanced()?;
            return Ok(self.opaque(start));
        }
        Ok(named)
    }

    fn opaque(&self, start: usize) -> TypeExpr {
        let end = self.prev_end();
        TypeExpr::Opaque {
            text: self.text(start, end),
            span: Span::new(start, end),
        }
    }

    /// Parameters and optional results of a function type.
    fn skip_signature(&mut self) -> Result<()> {
        if !self.at_op("(") {
            return Err(self.error("'('"));
        }
        self.skip_balanced()?;
        if self.at_op("(") {
            return self.skip_balanced();
        }
        let starts_type = match &self.peek().kind {
            TokenKind::Ident(_) => true,
            TokenKind::Op(op) => matches!(*op, "*" | "[" | "<-"),
            _ => false,
        };
        if starts_type {
            self.parse_type()?;
        }
        Ok(())
    }

    fn struct_type(&mut self) -> Result<StructType> {
        let start = self.bump().span.start;
        self.expect_op("{")?;

        let mut fields = Vec::new();
        loop {
            self.skip_semis();
            if self.eat_op("}") {
                break;
            }
            fields.push(self.field_decl()?);
            if self.at_semi() {
                self.pos += 1;
            } else if !self.at_op("}") {
                return Err(self.error("';' or '}'"));
            }
        }

        Ok(StructType {
            fields,
            span: Span::new(start, self.prev_end()),
        })
    }

    fn field_decl(&mut self) -> Result<FieldDecl> {
        let first = self.peek().clone();
        let doc = self.doc(&first);

        let embedded = match &first.kind {
            TokenKind::Op("*") => true,
            TokenKind::Ident(_) => {
                let next = self.kind_at(1);
                next.is_op(".")
                    || next.is_op("}")
                    || matches!(next, TokenKind::Semi { .. } | TokenKind::Str(_))
            }
            _ => return Err(self.error("field")),
        };

        let mut names = Vec::new();
        if !embedded {
            names.push(self.expect_ident("field name")?);
            while self.eat_op(",") {
                names.push(self.expect_ident("field name")?);
            }
        }
        let ty = self.parse_type()?;

        let tag = match &self.peek().kind {
            TokenKind::Str(tag) => {
                let tag = tag.clone();
                self.pos += 1;
                Some(tag)
            }
            _ => None,
        };

        Ok(FieldDecl {
            doc,
            names,
            ty,
            tag,
        })
    }
}

fn literal(kind: &TokenKind) -> Option<(LitKind, String)> {
    match kind {
        TokenKind::Str(s) => Some((LitKind::Str, s.clone())),
        TokenKind::Int(s) => Some((LitKind::Int, s.clone())),
        TokenKind::Float(s) => Some((LitKind::Float, s.clone())),
        TokenKind::Imag(s) => Some((LitKind::Imag, s.clone())),
        TokenKind::Char(s) => Some((LitKind::Char, s.clone())),
        _ => None,
    }
}
