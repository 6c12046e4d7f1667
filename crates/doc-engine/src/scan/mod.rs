//! Locating exported declarations in source text.
//!
//! A [`SourceScanner`] turns one file's text into a list of [`Declaration`]s,
//! each carrying the raw doc comment attached to it (if any). Turning those
//! into documentation records is shared by every strategy and lives in
//! [`crate::assemble`].

pub mod lexer;
mod pattern;
mod syntax;
pub mod text;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use pattern::RegexScanner;
pub use syntax::SyntaxScanner;

/// The largest number of line breaks allowed between the end of a doc comment
/// and the declaration it documents (one blank line).
pub const MAX_DOC_GAP_NEWLINES: usize = 2;

/// Keywords that start a new top-level statement, ending an initializer that
/// has no `;`.
pub(crate) const STATEMENT_KEYWORDS: &[&str] = &[
    "export", "import", "const", "let", "var", "function", "async", "interface", "type", "class",
    "enum", "declare",
];

/// Whether a statement ending in `tok` must continue on the next line.
pub(crate) fn dangling(tok: lexer::Token, src: &str) -> bool {
    match tok.kind {
        lexer::SyntaxKind::Punct => matches!(tok.text(src), "=" | "=>" | "," | "|" | "&"),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Constant,
    Interface,
    TypeAlias,
}

/// A parameter as written in the declaration's own signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    pub name: String,
    pub ty: Option<String>,
    pub optional: bool,
    pub default: Option<String>,
    pub rest: bool,
}

/// A property or method of an interface / object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub ty: String,
    pub optional: bool,
    pub readonly: bool,
    pub doc: Option<String>,
}

/// An exported declaration found by a scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// 1-based line of the `export` keyword
    pub line: u32,
    /// The attached `/** ... */` comment, verbatim
    pub doc: Option<String>,
    /// Generic parameter list including the angle brackets
    pub generics: Option<String>,
    /// `None` when the declaration has no readable parameter list
    pub params: Option<Vec<SignatureParam>>,
    pub return_type: Option<String>,
    /// Type annotation on a `const` binding
    pub annotation: Option<String>,
    /// Initializer text of a constant
    pub initializer: Option<String>,
    /// Declaration text of an interface or type alias, without `export`
    pub definition: Option<String>,
    pub members: Vec<MemberDecl>,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<String>, line: u32) -> Self {
        Declaration {
            kind,
            name: name.into(),
            line,
            doc: None,
            generics: None,
            params: None,
            return_type: None,
            annotation: None,
            initializer: None,
            definition: None,
            members: Vec::new(),
        }
    }
}

/// A strategy for finding exported declarations in one file.
pub trait SourceScanner: Send + Sync {
    fn name(&self) -> &'static str;

    fn scan(&self, source: &str) -> Vec<Declaration>;
}

/// Which [`SourceScanner`] to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Lexer-backed scanning (default)
    #[default]
    Syntax,
    /// Line-oriented regular expressions
    Regex,
}

impl ScanStrategy {
    pub fn scanner(self) -> Arc<dyn SourceScanner> {
        match self {
            ScanStrategy::Syntax => Arc::new(SyntaxScanner),
            ScanStrategy::Regex => Arc::new(RegexScanner),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanStrategy::Syntax => "syntax",
            ScanStrategy::Regex => "regex",
        }
    }
}

impl fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syntax" => Ok(ScanStrategy::Syntax),
            "regex" => Ok(ScanStrategy::Regex),
            other => Err(format!(
                "unknown scan strategy `{other}` (expected `syntax` or `regex`)"
            )),
        }
    }
}

/// Classify a constant initializer: returns the parameter list and return
/// type when it is an arrow function or function expression.
///
/// Shared by both strategies so that they agree on what counts as a function.
pub(crate) fn function_initializer(init: &str) -> Option<FunctionShape> {
    let mut rest = init.trim_start();
    if let Some(r) = rest.strip_prefix("async") {
        if r.starts_with(|c: char| c.is_whitespace() || c == '(' || c == '<') {
            rest = r.trim_start();
        }
    }

    if let Some(r) = rest.strip_prefix("function") {
        if !r.starts_with(|c: char| c.is_whitespace() || c == '(' || c == '*' || c == '<') {
            return None;
        }
        let r = r.trim_start().trim_start_matches('*').trim_start();
        let ident_len = r
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(r.len());
        return signature_shape(r[ident_len..].trim_start(), false);
    }

    if rest.starts_with('(') || rest.starts_with('<') {
        return signature_shape(rest, true);
    }

    // `x => ...`
    let ident_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len());
    if ident_len > 0 && rest[ident_len..].trim_start().starts_with("=>") {
        return Some(FunctionShape {
            generics: None,
            params: text::parse_params(&rest[..ident_len]),
            return_type: None,
        });
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionShape {
    pub generics: Option<String>,
    pub params: Vec<SignatureParam>,
    pub return_type: Option<String>,
}

/// Parse `<G>(params): Ret` at the start of `s`. For arrows the header must be
/// followed by `=>`.
pub(crate) fn signature_shape(s: &str, arrow: bool) -> Option<FunctionShape> {
    let (generics, rest) = if s.starts_with('<') {
        let close = text::matching_close(s, 0)?;
        (Some(s[..=close].to_string()), s[close + 1..].trim_start())
    } else {
        (None, s)
    };
    if !rest.starts_with('(') {
        return None;
    }
    let close = text::matching_close(rest, 0)?;
    let params = text::parse_params(&rest[1..close]);
    let after = rest[close + 1..].trim_start();

    let (return_type, tail) = match after.strip_prefix(':') {
        Some(ret) => {
            let end = return_type_end(ret, arrow);
            let ty = text::collapse_whitespace(&ret[..end]);
            ((!ty.is_empty()).then_some(ty), ret[end..].trim_start())
        }
        None => (None, after),
    };

    if arrow && !tail.starts_with("=>") {
        return None;
    }
    Some(FunctionShape {
        generics,
        params,
        return_type,
    })
}

/// Length of the return type at the start of `s`: up to the body brace,
/// statement end, or (for arrows) the `=>`.
fn return_type_end(s: &str, arrow: bool) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut seen = false;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => {}
            b'(' | b'[' | b'<' | b'{' => {
                if b == b'{' && seen && !continues_type(&s[..i]) {
                    return i;
                }
                match text::matching_close(s, i) {
                    Some(close) => {
                        i = close + 1;
                        seen = true;
                        continue;
                    }
                    None => return i,
                }
            }
            b'=' if bytes.get(i + 1) == Some(&b'>') => {
                if arrow && seen && !continues_type(&s[..i]) {
                    return i;
                }
                i += 2;
                continue;
            }
            b';' => return i,
            _ => seen = true,
        }
        i += 1;
    }
    bytes.len()
}

/// Whether the type text so far ends with an operator that needs a right
/// operand, so a following `{` or `=>` belongs to the type.
fn continues_type(so_far: &str) -> bool {
    let t = so_far.trim_end();
    t.ends_with('|')
        || t.ends_with('&')
        || t.ends_with(':')
        || t.ends_with(',')
        || t.ends_with('?')
        || t.ends_with("=>")
        || t.ends_with("keyof")
        || t.ends_with("typeof")
}
