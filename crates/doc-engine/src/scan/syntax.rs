//! Token-level scanning.
//!
//! The file is lexed once; only tokens at brace depth zero can start a
//! declaration, and a doc comment is attached only when nothing but
//! whitespace separates it from the `export` keyword. Strings, template
//! literals, regex literals and comments are single tokens, so the braces and
//! keywords inside them never disturb the scan.

use super::lexer::{SyntaxKind, Token, tokenize};
use super::text::{collapse_whitespace, parse_members};
use super::{
    DeclKind, Declaration, MAX_DOC_GAP_NEWLINES, STATEMENT_KEYWORDS, SourceScanner, dangling,
    function_initializer, signature_shape,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxScanner;

impl SourceScanner for SyntaxScanner {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn scan(&self, source: &str) -> Vec<Declaration> {
        let tokens = tokenize(source);
        let lines = LineIndex::new(source);
        let mut decls = Vec::new();

        let mut depth = 0usize;
        // (token index of a doc comment, line breaks seen since)
        let mut pending: Option<(usize, usize)> = None;
        let mut i = 0;

        while i < tokens.len() {
            let tok = tokens[i];
            match tok.kind {
                SyntaxKind::Whitespace => {}
                SyntaxKind::Newline => {
                    if let Some((_, newlines)) = pending.as_mut() {
                        *newlines += 1;
                    }
                }
                SyntaxKind::DocComment => pending = (depth == 0).then_some((i, 0)),
                SyntaxKind::LineComment | SyntaxKind::BlockComment => pending = None,
                SyntaxKind::Ident if depth == 0 && tok.is_ident(source, "export") => {
                    let doc = pending
                        .take()
                        .filter(|(_, newlines)| *newlines <= MAX_DOC_GAP_NEWLINES)
                        .map(|(idx, _)| tokens[idx].text(source).to_string());

                    let mut cursor = Cursor {
                        src: source,
                        tokens: &tokens,
                        pos: i + 1,
                    };
                    if let Some(mut decl) = cursor.export(lines.line_of(tok.start)) {
                        tracing::trace!(name = %decl.name, kind = ?decl.kind, "found declaration");
                        decl.doc = doc;
                        decls.push(decl);
                        i = cursor.pos;
                        continue;
                    }
                }
                SyntaxKind::Punct => {
                    match tok.text(source) {
                        "{" | "(" | "[" => depth += 1,
                        "}" | ")" | "]" => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    pending = None;
                }
                _ => pending = None,
            }
            i += 1;
        }

        decls
    }
}

struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> u32 {
        self.starts.partition_point(|&start| start <= offset) as u32
    }
}

/// Whether a type or expression ending in `tok` still needs a right-hand side.
fn continues_type(tok: Token, src: &str) -> bool {
    match tok.kind {
        SyntaxKind::Punct => matches!(tok.text(src), ":" | "|" | "&" | "=>" | "," | "?"),
        SyntaxKind::Ident => matches!(tok.text(src), "keyof" | "typeof"),
        _ => false,
    }
}

struct Cursor<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

/// What lies between two significant tokens
struct Gap {
    newlines: usize,
    comment: bool,
}

impl<'a> Cursor<'a> {
    fn peek_index(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&idx| self.tokens[idx].kind.is_significant())
    }

    fn peek(&self) -> Option<Token> {
        self.peek_index().map(|idx| self.tokens[idx])
    }

    fn bump(&mut self) -> Option<Token> {
        let idx = self.peek_index()?;
        self.pos = idx + 1;
        Some(self.tokens[idx])
    }

    fn at_punct(&self, p: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(self.src, p))
    }

    fn at_ident(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(self.src, word))
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        let hit = self.at_punct(p);
        if hit {
            self.bump();
        }
        hit
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        let hit = self.at_ident(word);
        if hit {
            self.bump();
        }
        hit
    }

    fn ident(&mut self) -> Option<Token> {
        let tok = self.peek()?;
        (tok.kind == SyntaxKind::Ident).then(|| {
            self.bump();
            tok
        })
    }

    fn gap(&self, from: usize, to: usize) -> Gap {
        let mut gap = Gap {
            newlines: 0,
            comment: false,
        };
        for tok in &self.tokens[from + 1..to] {
            match tok.kind {
                SyntaxKind::Newline => gap.newlines += 1,
                SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment => {
                    gap.comment = true
                }
                _ => {}
            }
        }
        gap
    }

    /// Consume a bracketed group starting at the next token. Angle brackets
    /// only balance against each other; the other kinds balance together.
    fn skip_balanced(&mut self) -> Option<(Token, Token)> {
        let open_idx = self.peek_index()?;
        let open = self.tokens[open_idx];
        let angle = open.is_punct(self.src, "<");
        let mut depth = 0usize;
        for idx in open_idx..self.tokens.len() {
            let tok = self.tokens[idx];
            if tok.kind != SyntaxKind::Punct {
                continue;
            }
            match (angle, tok.text(self.src)) {
                (true, "<") | (false, "(" | "[" | "{") => depth += 1,
                (true, ">") | (false, ")" | "]" | "}") => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        self.pos = idx + 1;
                        return Some((open, tok));
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Consume a return type up to the function body. Returns the end offset
    /// of the last type token.
    fn skip_return_type(&mut self) -> Option<usize> {
        let mut last: Option<Token> = None;
        while let Some(tok) = self.peek() {
            if tok.kind == SyntaxKind::Punct {
                match tok.text(self.src) {
                    "{" if last.is_some_and(|l| !continues_type(l, self.src)) => break,
                    ";" | ")" | "]" | "}" => break,
                    "(" | "[" | "{" | "<" => {
                        let (_, close) = self.skip_balanced()?;
                        last = Some(close);
                        continue;
                    }
                    _ => {}
                }
            }
            self.bump();
            last = Some(tok);
        }
        last.map(|t| t.end)
    }

    /// Consume a `const` annotation up to its `=`.
    fn skip_annotation(&mut self) -> Option<usize> {
        let mut last: Option<Token> = None;
        while let Some(tok) = self.peek() {
            if tok.kind == SyntaxKind::Punct {
                match tok.text(self.src) {
                    "=" | ";" | ")" | "]" | "}" => break,
                    "(" | "[" | "{" | "<" => {
                        let (_, close) = self.skip_balanced()?;
                        last = Some(close);
                        continue;
                    }
                    _ => {}
                }
            }
            self.bump();
            last = Some(tok);
        }
        last.map(|t| t.end)
    }

    /// Consume an initializer or type right-hand side up to the end of its
    /// statement, including a terminating `;`. Returns the end offset of the
    /// last token that belongs to the statement.
    fn skip_statement(&mut self) -> Option<usize> {
        let mut last: Option<(usize, Token)> = None;
        while let Some(idx) = self.peek_index() {
            let tok = self.tokens[idx];
            let text = tok.text(self.src);

            if let Some((last_idx, last_tok)) = last {
                let gap = self.gap(last_idx, idx);
                let new_statement = gap.newlines >= 2
                    || gap.comment
                    || (tok.kind == SyntaxKind::Ident && STATEMENT_KEYWORDS.contains(&text));
                if gap.newlines > 0 && new_statement && !dangling(last_tok, self.src) {
                    break;
                }
            }

            if tok.kind == SyntaxKind::Punct {
                match text {
                    ";" => {
                        self.pos = idx + 1;
                        break;
                    }
                    ")" | "]" | "}" => break,
                    "(" | "[" | "{" => {
                        let (_, close) = self.skip_balanced()?;
                        last = Some((self.pos - 1, close));
                        continue;
                    }
                    _ => {}
                }
            }
            self.pos = idx + 1;
            last = Some((idx, tok));
        }
        last.map(|(_, t)| t.end)
    }

    fn export(&mut self, line: u32) -> Option<Declaration> {
        self.eat_ident("default");
        self.eat_ident("declare");
        let kw = self.peek()?;
        if kw.kind != SyntaxKind::Ident {
            return None;
        }
        match kw.text(self.src) {
            "async" | "function" => self.function(line),
            "const" | "let" | "var" => self.binding(line),
            "interface" => self.interface(line),
            "type" => self.type_alias(line),
            _ => None,
        }
    }

    fn function(&mut self, line: u32) -> Option<Declaration> {
        self.eat_ident("async");
        if !self.eat_ident("function") {
            return None;
        }
        self.eat_punct("*");
        let name = self.ident()?;

        let header_start = self.peek()?.start;
        if self.at_punct("<") {
            self.skip_balanced()?;
        }
        if !self.at_punct("(") {
            return None;
        }
        let (_, close) = self.skip_balanced()?;
        let mut header_end = close.end;
        if self.eat_punct(":") {
            header_end = self.skip_return_type().unwrap_or(header_end);
        }
        if self.at_punct("{") {
            self.skip_balanced()?;
        } else {
            self.eat_punct(";");
        }

        let mut decl = Declaration::new(DeclKind::Function, name.text(self.src), line);
        if let Some(shape) = signature_shape(&self.src[header_start..header_end], false) {
            decl.generics = shape.generics;
            decl.params = Some(shape.params);
            decl.return_type = shape.return_type;
        }
        Some(decl)
    }

    fn binding(&mut self, line: u32) -> Option<Declaration> {
        self.bump();
        let name = self.ident()?;
        let name = name.text(self.src);
        if name == "enum" {
            return None;
        }

        let annotation = if self.eat_punct(":") {
            let start = self.peek()?.start;
            let end = self.skip_annotation()?;
            Some(collapse_whitespace(&self.src[start..end]))
        } else {
            None
        };

        let initializer = if self.eat_punct("=") {
            let start = self.peek()?.start;
            let end = self.skip_statement()?;
            Some(self.src[start..end].to_string())
        } else {
            self.eat_punct(";");
            None
        };

        let decl = match initializer.as_deref().and_then(function_initializer) {
            Some(shape) => {
                let mut decl = Declaration::new(DeclKind::Function, name, line);
                decl.generics = shape.generics;
                decl.params = Some(shape.params);
                decl.return_type = shape.return_type;
                decl.annotation = annotation;
                decl
            }
            None => {
                let mut decl = Declaration::new(DeclKind::Constant, name, line);
                decl.annotation = annotation;
                decl.initializer = initializer;
                decl
            }
        };
        Some(decl)
    }

    fn interface(&mut self, line: u32) -> Option<Declaration> {
        let kw = self.bump()?;
        let name = self.ident()?;
        while !self.at_punct("{") {
            if self.at_punct("<") {
                self.skip_balanced()?;
            } else {
                self.bump()?;
            }
        }
        let (open, close) = self.skip_balanced()?;

        let mut decl = Declaration::new(DeclKind::Interface, name.text(self.src), line);
        decl.definition = Some(self.src[kw.start..close.end].to_string());
        decl.members = parse_members(&self.src[open.end..close.start]);
        Some(decl)
    }

    fn type_alias(&mut self, line: u32) -> Option<Declaration> {
        let kw = self.bump()?;
        let name = self.ident()?;
        if self.at_punct("<") {
            self.skip_balanced()?;
        }
        if !self.eat_punct("=") {
            return None;
        }
        let rhs_start = self.peek()?.start;
        let end = self.skip_statement()?;

        let mut decl = Declaration::new(DeclKind::TypeAlias, name.text(self.src), line);
        decl.definition = Some(self.src[kw.start..end].to_string());
        let rhs = self.src[rhs_start..end].trim();
        if rhs.starts_with('{') && super::text::matching_close(rhs, 0) == Some(rhs.len() - 1) {
            decl.members = parse_members(&rhs[1..rhs.len() - 1]);
        }
        Some(decl)
    }
}
