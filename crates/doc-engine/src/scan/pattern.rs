//! Line-oriented scanning with regular expressions.
//!
//! Declarations are recognised by a pattern at the start of a line and doc
//! comments by walking back over the preceding lines. Statement bodies are
//! measured with the lexer, but a line that merely starts with `export`
//! inside a template literal or block comment still fools the line patterns;
//! prefer [`super::SyntaxScanner`] for anything unusual.

use std::sync::LazyLock;

use regex::Regex;

use super::lexer::{SyntaxKind, Token, tokenize};
use super::text::{collapse_whitespace, find_assignment, matching_close, parse_members};
use super::{
    DeclKind, Declaration, MAX_DOC_GAP_NEWLINES, STATEMENT_KEYWORDS, SourceScanner, dangling,
    function_initializer, signature_shape,
};

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^export\s+(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)",
    )
    .expect("function pattern")
});

static BINDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+(?:declare\s+)?(?:const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)")
        .expect("binding pattern")
});

static INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+(?:declare\s+)?(?P<kw>interface)\s+(?P<name>[A-Za-z_$][\w$]*)")
        .expect("interface pattern")
});

static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+(?:declare\s+)?(?P<kw>type)\s+(?P<name>[A-Za-z_$][\w$]*)")
        .expect("type pattern")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScanner;

impl SourceScanner for RegexScanner {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn scan(&self, source: &str) -> Vec<Declaration> {
        let lines = SourceLines::new(source);
        let mut decls = Vec::new();

        for idx in 0..lines.len() {
            let line = lines.line(idx);
            if !line.starts_with("export") {
                continue;
            }
            let tail = lines.tail(idx);
            let line_no = (idx + 1) as u32;

            let decl = if let Some(caps) = FUNCTION_RE.captures(line) {
                let head = &tail[caps.get(0).map_or(0, |m| m.end())..];
                let mut decl = Declaration::new(DeclKind::Function, &caps["name"], line_no);
                if let Some(shape) = signature_shape(head.trim_start(), false) {
                    decl.generics = shape.generics;
                    decl.params = Some(shape.params);
                    decl.return_type = shape.return_type;
                }
                Some(decl)
            } else if let Some(caps) = BINDING_RE.captures(line)
                && &caps["name"] != "enum"
            {
                let after_name = &tail[caps.get(0).map_or(0, |m| m.end())..];
                Some(binding(&caps["name"], after_name, line_no))
            } else if let Some(caps) = INTERFACE_RE.captures(line) {
                let kw = caps.name("kw").map_or(0, |m| m.start());
                interface(&caps["name"], &tail[kw..], line_no)
            } else if let Some(caps) = TYPE_RE.captures(line) {
                let kw = caps.name("kw").map_or(0, |m| m.start());
                type_alias(&caps["name"], &tail[kw..], line_no)
            } else {
                None
            };

            if let Some(mut decl) = decl {
                decl.doc = lines.doc_above(idx);
                decls.push(decl);
            }
        }

        decls
    }
}

fn binding(name: &str, after_name: &str, line: u32) -> Declaration {
    let end = statement_end(after_name);
    let stmt = &after_name[..end];
    let eq = find_assignment(stmt);

    let annotation = stmt.trim_start().starts_with(':').then(|| {
        let colon = stmt.find(':').unwrap_or(0);
        let ann_end = eq.unwrap_or(stmt.len());
        collapse_whitespace(&stmt[colon + 1..ann_end])
    });
    let initializer = eq.map(|eq| stmt[eq + 1..].trim().to_string());

    match initializer.as_deref().and_then(function_initializer) {
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
    }
}

fn interface(name: &str, from_kw: &str, line: u32) -> Option<Declaration> {
    let open = from_kw.find('{')?;
    let close = matching_close(from_kw, open)?;
    let mut decl = Declaration::new(DeclKind::Interface, name, line);
    decl.definition = Some(from_kw[..=close].to_string());
    decl.members = parse_members(&from_kw[open + 1..close]);
    Some(decl)
}

fn type_alias(name: &str, from_kw: &str, line: u32) -> Option<Declaration> {
    let eq = find_assignment(from_kw)?;
    let end = eq + 1 + statement_end(&from_kw[eq + 1..]);
    let mut decl = Declaration::new(DeclKind::TypeAlias, name, line);
    decl.definition = Some(from_kw[..end].trim_end().to_string());

    let rhs = from_kw[eq + 1..end].trim();
    if rhs.starts_with('{') && matching_close(rhs, 0) == Some(rhs.len() - 1) {
        decl.members = parse_members(&rhs[1..rhs.len() - 1]);
    }
    Some(decl)
}

/// Length of the statement at the start of `s`, excluding a terminating `;`.
///
/// A statement ends at a `;` outside brackets. Without one it ends at a line
/// break outside brackets that is followed by a blank line, a comment or a
/// statement keyword, unless the line ends in an operator that needs more.
/// Strings, regex literals and comments are lexed as single tokens.
fn statement_end(s: &str) -> usize {
    let mut depth = 0i32;
    let mut last: Option<Token> = None;
    let mut newlines = 0;
    let mut comment = false;

    for tok in tokenize(s) {
        match tok.kind {
            SyntaxKind::Newline => {
                newlines += 1;
                continue;
            }
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment => {
                comment = true;
                continue;
            }
            SyntaxKind::Whitespace => continue,
            _ => {}
        }
        let text = tok.text(s);

        if depth <= 0
            && newlines > 0
            && let Some(prev) = last
        {
            let new_statement = newlines >= 2
                || comment
                || (tok.kind == SyntaxKind::Ident && STATEMENT_KEYWORDS.contains(&text));
            if new_statement && !dangling(prev, s) {
                return prev.end;
            }
        }
        newlines = 0;
        comment = false;

        if tok.kind == SyntaxKind::Punct {
            match text {
                ";" if depth <= 0 => return tok.start,
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" if depth <= 0 => return last.map_or(tok.start, |t| t.end),
                ")" | "]" | "}" => depth -= 1,
                _ => {}
            }
        }
        last = Some(tok);
    }
    last.map_or(0, |t| t.end)
}

/// Source text split into lines, remembering where each line starts.
struct SourceLines<'a> {
    src: &'a str,
    starts: Vec<usize>,
}

impl<'a> SourceLines<'a> {
    fn new(src: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        if starts.last() == Some(&src.len()) && starts.len() > 1 {
            starts.pop();
        }
        SourceLines { src, starts }
    }

    fn len(&self) -> usize {
        self.starts.len()
    }

    fn line(&self, idx: usize) -> &'a str {
        let start = self.starts[idx];
        let end = self
            .starts
            .get(idx + 1)
            .map_or(self.src.len(), |next| next - 1);
        self.src[start..end].trim_end_matches(['\r', '\n'])
    }

    fn tail(&self, idx: usize) -> &'a str {
        &self.src[self.starts[idx]..]
    }

    /// The `/** */` block ending just above line `idx`, if close enough.
    ///
    /// The lines from the comment's opener to the line above the declaration
    /// must hold nothing but that one comment.
    fn doc_above(&self, idx: usize) -> Option<String> {
        let mut end = idx;
        let mut newlines = 0;
        loop {
            end = end.checked_sub(1)?;
            newlines += 1;
            if newlines > MAX_DOC_GAP_NEWLINES {
                return None;
            }
            if !self.line(end).trim().is_empty() {
                break;
            }
        }
        if !self.line(end).trim_end().ends_with("*/") {
            return None;
        }

        let mut start = end;
        while !self.line(start).trim_start().starts_with("/*") {
            start = start.checked_sub(1)?;
        }

        let block = &self.src[self.starts[start]..self.starts[end] + self.line(end).len()];
        let mut comments = tokenize(block)
            .into_iter()
            .filter(|tok| !matches!(tok.kind, SyntaxKind::Whitespace | SyntaxKind::Newline));
        match (comments.next(), comments.next()) {
            (Some(tok), None) if tok.kind == SyntaxKind::DocComment => {
                Some(tok.text(block).to_string())
            }
            _ => None,
        }
    }
}
