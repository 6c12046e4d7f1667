//! A small lexer for TypeScript/JavaScript sources.
//!
//! It does not classify keywords or operators beyond what the scanners need:
//! every byte of the input belongs to exactly one token, so slicing the source
//! by token ranges always reproduces the original text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Ident,
    Number,
    /// Single- or double-quoted string
    Str,
    /// Backtick template literal, including any `${}` substitutions
    Template,
    Regex,
    /// `/** ... */`
    DocComment,
    /// `/* ... */`
    BlockComment,
    LineComment,
    Newline,
    Whitespace,
    /// One punctuation character, or one of `=>` and `...`
    Punct,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
        )
    }

    pub fn is_significant(self) -> bool {
        !self.is_trivia()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text(self, src: &str) -> &str {
        &src[self.start..self.end]
    }

    pub fn is_punct(self, src: &str, p: &str) -> bool {
        self.kind == SyntaxKind::Punct && self.text(src) == p
    }

    pub fn is_ident(self, src: &str, word: &str) -> bool {
        self.kind == SyntaxKind::Ident && self.text(src) == word
    }
}

/// Keywords after which a `/` starts a regular expression literal.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "in", "of", "delete", "void", "throw", "new", "instanceof",
    "yield", "await",
];

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Last significant token, for the regex-versus-division decision
    prev: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            prev: None,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn regex_allowed(&self) -> bool {
        match self.prev {
            None => true,
            Some(tok) => match tok.kind {
                SyntaxKind::Ident => REGEX_PREFIX_KEYWORDS.contains(&tok.text(self.src)),
                SyntaxKind::Punct => !matches!(tok.text(self.src), ")" | "]" | "}"),
                SyntaxKind::Number
                | SyntaxKind::Str
                | SyntaxKind::Template
                | SyntaxKind::Regex => false,
                _ => true,
            },
        }
    }

    fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek_at(0) {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Advance past the next full UTF-8 character.
    fn bump_char(&mut self) {
        let width = self.src[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
    }

    fn lex_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(b) = self.peek_at(0) {
            match b {
                b'\\' => {
                    self.pos += 1;
                    if self.peek_at(0).is_some() {
                        self.bump_char();
                    }
                }
                b'\n' if quote != b'`' => return,
                _ if b == quote => {
                    self.pos += 1;
                    return;
                }
                b'$' if quote == b'`' && self.peek_at(1) == Some(b'{') => {
                    self.pos += 2;
                    self.skip_substitution();
                }
                _ => self.bump_char(),
            }
        }
    }

    /// Skip a `${ ... }` body up to and including its closing brace.
    fn skip_substitution(&mut self) {
        let mut depth = 1usize;
        while let Some(b) = self.peek_at(0) {
            match b {
                b'\'' | b'"' | b'`' => {
                    self.lex_quoted(b);
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                _ => {}
            }
            self.bump_char();
        }
    }

    /// Try to lex a regex literal starting at `/`. Leaves `pos` untouched and
    /// returns false when the line ends before the closing slash.
    fn lex_regex(&mut self) -> bool {
        let mut i = self.pos + 1;
        let mut in_class = false;
        while let Some(&b) = self.bytes.get(i) {
            match b {
                b'\\' => i += 1,
                b'\n' => return false,
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => {
                    self.pos = i + 1;
                    self.bump_while(|c| c.is_ascii_alphabetic());
                    return true;
                }
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn lex_token(&mut self) -> SyntaxKind {
        let b = self.bytes[self.pos];
        match b {
            b'\n' => {
                self.pos += 1;
                SyntaxKind::Newline
            }
            b'\r' if self.peek_at(1) == Some(b'\n') => {
                self.pos += 2;
                SyntaxKind::Newline
            }
            b' ' | b'\t' | b'\r' | 0x0c => {
                self.bump_while(|c| matches!(c, b' ' | b'\t' | b'\r' | 0x0c));
                SyntaxKind::Whitespace
            }
            b'/' if self.peek_at(1) == Some(b'/') => {
                self.bump_while(|c| c != b'\n');
                SyntaxKind::LineComment
            }
            b'/' if self.peek_at(1) == Some(b'*') => {
                // `/**/` is an empty block comment, not a doc comment.
                let doc = self.peek_at(2) == Some(b'*') && self.peek_at(3) != Some(b'/');
                match self.src[self.pos + 2..].find("*/") {
                    Some(off) => self.pos += 2 + off + 2,
                    None => self.pos = self.bytes.len(),
                }
                if doc {
                    SyntaxKind::DocComment
                } else {
                    SyntaxKind::BlockComment
                }
            }
            b'/' if self.regex_allowed() && self.lex_regex() => SyntaxKind::Regex,
            b'\'' | b'"' => {
                self.lex_quoted(b);
                SyntaxKind::Str
            }
            b'`' => {
                self.lex_quoted(b);
                SyntaxKind::Template
            }
            b'0'..=b'9' => {
                self.bump_while(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'.');
                SyntaxKind::Number
            }
            b'=' if self.peek_at(1) == Some(b'>') => {
                self.pos += 2;
                SyntaxKind::Punct
            }
            b'.' if self.peek_at(1) == Some(b'.') && self.peek_at(2) == Some(b'.') => {
                self.pos += 3;
                SyntaxKind::Punct
            }
            _ if b == b'_' || b == b'$' || b.is_ascii_alphabetic() || b >= 0x80 => {
                let start = self.pos;
                self.bump_char();
                while let Some(c) = self.src[self.pos..].chars().next() {
                    if c == '_' || c == '$' || c.is_alphanumeric() {
                        self.pos += c.len_utf8();
                    } else {
                        break;
                    }
                }
                if self.pos == start {
                    self.pos += 1;
                }
                SyntaxKind::Ident
            }
            _ => {
                self.bump_char();
                SyntaxKind::Punct
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let start = self.pos;
        let kind = self.lex_token();
        let token = Token {
            kind,
            start,
            end: self.pos,
        };
        if kind.is_significant() {
            self.prev = Some(token);
        }
        Some(token)
    }
}

pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).collect()
}
