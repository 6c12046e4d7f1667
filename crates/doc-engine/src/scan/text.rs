//! Text helpers shared by both scanning strategies.
//!
//! These work on declaration fragments (parameter lists, type annotations,
//! interface bodies) that have already been cut out of the file, so they only
//! need to respect nesting and string literals, not full statement structure.

use super::{MemberDecl, SignatureParam};
use crate::scan::lexer::{Lexer, SyntaxKind};

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'<' => Some(b'>'),
        _ => None,
    }
}

/// Byte index of the bracket closing the one at `open_idx`.
///
/// Nested brackets of every kind are balanced, quoted strings are skipped and
/// the `>` of `=>` is never taken as a closing angle bracket.
pub fn matching_close(s: &str, open_idx: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    closer_for(*bytes.get(open_idx)?)?;

    let mut stack: Vec<u8> = Vec::new();
    let mut i = open_idx;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => stack.push(b),
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => {
                // A stray `>` (comparison) inside parens should not unbalance
                // the outer bracket.
                if b == b'>' && stack.last() != Some(&b'<') {
                    i += 1;
                    continue;
                }
                // Unclosed `<` (a comparison) inside a bracket closed here.
                while b != b'>' && stack.last() == Some(&b'<') {
                    stack.pop();
                }
                let open = stack.pop()?;
                if closer_for(open) != Some(b) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Split `s` on `sep` wherever it appears outside brackets and strings.
pub fn split_top_level(s: &str, sep: u8) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => depth = (depth - 1).max(0),
            _ if b == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&s[start..]);
    parts
}

/// Byte index of the first top-level `=` that is an assignment (not `=>`,
/// `==`, `<=`, `>=` or `!=`).
pub fn find_assignment(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => depth = (depth - 1).max(0),
            b'=' if depth == 0 => {
                let next = bytes.get(i + 1).copied();
                let prev = if i > 0 { Some(bytes[i - 1]) } else { None };
                let compound = matches!(next, Some(b'=' | b'>'))
                    || matches!(prev, Some(b'=' | b'!' | b'<' | b'>'));
                if !compound {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte index of the first top-level `:`, skipping the `?:` of optional
/// markers only in the sense that the `?` stays on the left side.
pub fn find_colon(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b')' | b']' | b'}' | b'>' => depth = (depth - 1).max(0),
            b':' if depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the text between the parentheses of a parameter list.
///
/// A leading TypeScript `this` parameter is dropped; it is not part of the
/// call signature.
pub fn parse_params(list: &str) -> Vec<SignatureParam> {
    split_top_level(strip_comments(list).as_str(), b',')
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(parse_param)
        .filter(|param| param.name != "this")
        .collect()
}

fn parse_param(part: &str) -> Option<SignatureParam> {
    let (binding, default) = match find_assignment(part) {
        Some(eq) => (part[..eq].trim(), Some(collapse_whitespace(&part[eq + 1..]))),
        None => (part, None),
    };

    let (mut name, ty) = match find_colon(binding) {
        Some(colon) => (
            binding[..colon].trim(),
            Some(collapse_whitespace(&binding[colon + 1..])),
        ),
        None => (binding.trim(), None),
    };

    let rest = name.starts_with("...");
    if rest {
        name = name[3..].trim_start();
    }
    let mut optional = default.is_some() || rest;
    if let Some(stripped) = name.strip_suffix('?') {
        name = stripped.trim_end();
        optional = true;
    }
    if name.is_empty() {
        return None;
    }

    Some(SignatureParam {
        name: collapse_whitespace(name),
        ty: ty.filter(|t| !t.is_empty()),
        optional,
        default: default.filter(|d| !d.is_empty()),
        rest,
    })
}

fn strip_comments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for token in Lexer::new(s) {
        match token.kind {
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment => {
                out.push(' ')
            }
            _ => out.push_str(token.text(s)),
        }
    }
    out
}

/// Parse the members between the braces of an interface or object type.
pub fn parse_members(body: &str) -> Vec<MemberDecl> {
    let mut members = Vec::new();
    let mut depth = 0i32;
    let mut doc: Option<String> = None;
    let mut start: Option<usize> = None;
    let mut end = 0usize;
    let mut last_sig: Option<(SyntaxKind, &str)> = None;

    let tokens: Vec<_> = Lexer::new(body).collect();
    let mut flush = |start: &mut Option<usize>, end: usize, doc: &mut Option<String>| {
        if let Some(s) = start.take() {
            if let Some(member) = parse_member(&body[s..end], doc.take()) {
                members.push(member);
            }
        }
        *doc = None;
    };

    for (idx, token) in tokens.iter().enumerate() {
        let text = token.text(body);
        match token.kind {
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment => {
                continue;
            }
            SyntaxKind::DocComment if depth == 0 => {
                if start.is_none() {
                    doc = Some(text.to_string());
                }
                continue;
            }
            SyntaxKind::Newline if depth == 0 => {
                let continues = last_sig.is_some_and(|(kind, t)| {
                    kind == SyntaxKind::Punct && matches!(t, ":" | "|" | "&" | "=>" | "," | "?")
                });
                let next_continues = tokens[idx + 1..]
                    .iter()
                    .find(|t| t.kind.is_significant())
                    .is_some_and(|t| matches!(t.text(body), "|" | "&" | "=>"));
                if start.is_some() && !continues && !next_continues {
                    flush(&mut start, end, &mut doc);
                }
                continue;
            }
            SyntaxKind::Newline => continue,
            SyntaxKind::Punct if depth == 0 && matches!(text, ";" | ",") => {
                flush(&mut start, end, &mut doc);
                last_sig = Some((token.kind, text));
                continue;
            }
            SyntaxKind::Punct => match text {
                "(" | "[" | "{" | "<" => depth += 1,
                ")" | "]" | "}" | ">" => depth = (depth - 1).max(0),
                _ => {}
            },
            _ => {}
        }
        if start.is_none() {
            start = Some(token.start);
        }
        end = token.end;
        last_sig = Some((token.kind, text));
    }
    flush(&mut start, end, &mut doc);
    members
}

fn parse_member(text: &str, doc: Option<String>) -> Option<MemberDecl> {
    let mut rest = text.trim();
    let mut readonly = false;
    if let Some(r) = rest.strip_prefix("readonly ") {
        readonly = true;
        rest = r.trim_start();
    }

    let name_end = if rest.starts_with('[') {
        matching_close(rest, 0)? + 1
    } else if rest.starts_with('"') || rest.starts_with('\'') {
        skip_quoted(rest.as_bytes(), 0)
    } else {
        rest.find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len())
    };
    if name_end == 0 {
        return None;
    }
    let name = rest[..name_end].trim_matches(|c| c == '"' || c == '\'').to_string();
    let mut after = rest[name_end..].trim_start();

    let mut optional = false;
    if let Some(a) = after.strip_prefix('?') {
        optional = true;
        after = a.trim_start();
    }

    let ty = if after.starts_with('(') || after.starts_with('<') {
        method_type(after)?
    } else if let Some(t) = after.strip_prefix(':') {
        collapse_whitespace(t)
    } else {
        return None;
    };

    Some(MemberDecl {
        name,
        ty,
        optional,
        readonly,
        doc,
    })
}

/// `<T>(a: T): U` becomes `<T>(a: T) => U`.
fn method_type(sig: &str) -> Option<String> {
    let (generics, rest) = if sig.starts_with('<') {
        let close = matching_close(sig, 0)?;
        (&sig[..=close], sig[close + 1..].trim_start())
    } else {
        ("", sig)
    };
    if !rest.starts_with('(') {
        return None;
    }
    let close = matching_close(rest, 0)?;
    let params = collapse_whitespace(&rest[1..close]);
    let ret = rest[close + 1..]
        .trim_start()
        .strip_prefix(':')
        .map(collapse_whitespace)
        .unwrap_or_else(|| "void".to_string());
    Some(format!("{generics}({params}) => {ret}"))
}
