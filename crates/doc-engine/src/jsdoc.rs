//! Parsing of `/** ... */` doc comments.
//!
//! The comment is split into lines with the leading `*` gutter removed. Lines
//! before the first `@tag` form the description; every tag owns the lines up
//! to the next tag.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(?P<tag>[A-Za-z]+)\b\s*(?P<rest>.*)$").expect("valid regex"));

static PARAM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>(?:\.\.\.)?[\w$][\w$.\[\]]*)").expect("valid regex")
});

/// A parsed doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
    pub description: String,
    pub params: Vec<JsDocParam>,
    pub returns: Option<JsDocReturn>,
    pub examples: Vec<String>,
    pub since: Option<String>,
    pub deprecated: Option<String>,
    /// The type given by an `@type {T}` tag
    pub type_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocParam {
    pub name: String,
    pub ty: Option<String>,
    pub description: String,
    pub optional: bool,
    pub default: Option<String>,
}

impl JsDocParam {
    /// `options.limit` documents a property of `options`, not a parameter.
    pub fn is_property(&self) -> bool {
        self.name.contains('.') && !self.name.starts_with("...")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocReturn {
    pub ty: Option<String>,
    pub description: String,
}

impl JsDoc {
    pub fn parse(raw: &str) -> JsDoc {
        let body = raw.trim();
        let body = body.strip_prefix("/**").unwrap_or(body);
        let body = body.strip_suffix("*/").unwrap_or(body);

        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<(&str, Vec<&str>)> = Vec::new();

        for line in body.lines().map(strip_gutter) {
            if let Some(caps) = TAG_RE.captures(line.trim_start()) {
                let tag = caps.name("tag").map_or("", |m| m.as_str());
                let rest = caps.name("rest").map_or("", |m| m.as_str());
                tags.push((tag, vec![rest]));
            } else if let Some((_, lines)) = tags.last_mut() {
                lines.push(line);
            } else {
                description.push(line);
            }
        }

        let mut doc = JsDoc {
            description: paragraphs(&description),
            ..JsDoc::default()
        };

        for (tag, lines) in tags {
            match tag {
                "param" | "arg" | "argument" => {
                    if let Some(param) = parse_param(&join_words(&lines)) {
                        doc.params.push(param);
                    }
                }
                "returns" | "return" => {
                    let text = join_words(&lines);
                    let (ty, rest) = split_type(&text);
                    doc.returns = Some(JsDocReturn {
                        ty,
                        description: strip_dash(rest).to_string(),
                    });
                }
                "example" => {
                    let example = verbatim(&lines);
                    if !example.is_empty() {
                        doc.examples.push(example);
                    }
                }
                "since" => {
                    doc.since = lines[0].split_whitespace().next().map(str::to_string);
                }
                "deprecated" => doc.deprecated = Some(join_words(&lines)),
                "type" => doc.type_tag = split_type(&join_words(&lines)).0,
                other => tracing::trace!(tag = other, "ignoring doc tag"),
            }
        }
        doc
    }

    /// The documented parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&JsDocParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// All examples, separated by a blank line.
    pub fn example(&self) -> String {
        self.examples.join("\n\n")
    }
}

/// Remove the leading `*` (and one space after it) from a comment line.
fn strip_gutter(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end(),
        None => trimmed.trim_end(),
    }
}

/// Join lines into paragraphs: lines are joined with a space, blank lines
/// separate paragraphs.
fn paragraphs(lines: &[&str]) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines.iter().map(|l| l.trim()) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out.join("\n\n")
}

fn join_words(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn verbatim(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

fn strip_dash(s: &str) -> &str {
    let s = s.trim_start();
    s.strip_prefix('-').unwrap_or(s).trim()
}

/// Split a leading `{type}` off `s`. Braces inside the type may nest.
fn split_type(s: &str) -> (Option<String>, &str) {
    let s = s.trim_start();
    if !s.starts_with('{') {
        return (None, s);
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let ty = s[1..i].trim();
                    let ty = (!ty.is_empty()).then(|| ty.to_string());
                    return (ty, s[i + 1..].trim_start());
                }
            }
            _ => {}
        }
    }
    (None, s)
}

fn parse_param(text: &str) -> Option<JsDocParam> {
    let (mut ty, rest) = split_type(text);
    let mut optional = false;

    // Closure-compiler style `{number=}`
    if let Some(t) = ty.as_deref().and_then(|t| t.strip_suffix('=')) {
        ty = Some(t.trim_end().to_string());
        optional = true;
    }

    let (name, default, rest) = if let Some(inner) = rest.strip_prefix('[') {
        let close = bracket_close(inner)?;
        let (name, default) = match inner[..close].split_once('=') {
            Some((name, default)) => (name.trim(), Some(default.trim().to_string())),
            None => (inner[..close].trim(), None),
        };
        optional = true;
        (name.to_string(), default, &inner[close + 1..])
    } else {
        let m = PARAM_NAME_RE.find(rest)?;
        (m.as_str().to_string(), None, &rest[m.end()..])
    };

    if name.is_empty() {
        return None;
    }
    Some(JsDocParam {
        name,
        ty,
        description: strip_dash(rest).to_string(),
        optional,
        default: default.filter(|d| !d.is_empty()),
    })
}

/// Offset of the `]` closing an optional-parameter bracket whose `[` has
/// already been consumed.
fn bracket_close(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
