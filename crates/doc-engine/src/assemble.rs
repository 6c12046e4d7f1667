//! Building documentation records from scanned declarations.
//!
//! Both scanning strategies feed this module, so the merge of a declaration's
//! literal signature with its doc comment happens in exactly one place.

use crate::jsdoc::{JsDoc, JsDocParam};
use crate::model::{ConstantDoc, FileDocs, FunctionDoc, ParamDoc, PropertyDoc, ReturnDoc, TypeDoc};
use crate::scan::text::collapse_whitespace;
use crate::scan::{DeclKind, Declaration, MemberDecl, SignatureParam};

pub const DEFAULT_PARAM_TYPE: &str = "any";
pub const DEFAULT_RETURN_TYPE: &str = "void";
pub const UNKNOWN_CONSTANT_TYPE: &str = "unknown";

/// Per-file facts every record needs
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub category: &'a str,
    /// Root-relative path with forward slashes
    pub source_file: &'a str,
    pub default_since: &'a str,
    pub value_preview_len: usize,
}

/// Turn one file's declarations into records. Declarations without a doc
/// comment produce nothing.
pub fn assemble(decls: Vec<Declaration>, cx: &RecordContext<'_>) -> FileDocs {
    let mut out = FileDocs::default();
    for decl in decls {
        let Some(raw) = decl.doc.as_deref() else {
            tracing::trace!(name = %decl.name, file = cx.source_file, "skipping undocumented export");
            continue;
        };
        let doc = JsDoc::parse(raw);
        match decl.kind {
            DeclKind::Function => out.functions.push(function_doc(&decl, &doc, cx)),
            DeclKind::Constant => out.constants.push(constant_doc(&decl, &doc, cx)),
            DeclKind::Interface | DeclKind::TypeAlias => out.types.push(type_doc(&decl, &doc, cx)),
        }
    }
    out
}

fn since(doc: &JsDoc, cx: &RecordContext<'_>) -> String {
    doc.since
        .clone()
        .unwrap_or_else(|| cx.default_since.to_string())
}

pub fn function_doc(decl: &Declaration, doc: &JsDoc, cx: &RecordContext<'_>) -> FunctionDoc {
    let params = match &decl.params {
        Some(signature) => merge_params(signature, doc),
        None => doc
            .params
            .iter()
            .map(|tag| MergedParam {
                doc: ParamDoc {
                    name: tag.name.clone(),
                    ty: tag.ty.clone().unwrap_or_else(|| DEFAULT_PARAM_TYPE.to_string()),
                    description: tag.description.clone(),
                    optional: tag.optional,
                    default_value: tag.default.clone(),
                },
                rest: false,
            })
            .collect(),
    };

    let returns_tag = doc.returns.as_ref();
    let returns = ReturnDoc {
        ty: decl
            .return_type
            .clone()
            .or_else(|| returns_tag.and_then(|r| r.ty.clone()))
            .unwrap_or_else(|| DEFAULT_RETURN_TYPE.to_string()),
        description: returns_tag.map(|r| r.description.clone()).unwrap_or_default(),
    };

    let syntax = syntax_string(&decl.name, decl.generics.as_deref(), &params, &returns.ty);

    FunctionDoc {
        name: decl.name.clone(),
        category: cx.category.to_string(),
        description: doc.description.clone(),
        syntax,
        params: params.into_iter().map(|p| p.doc).collect(),
        returns,
        example: doc.example(),
        since: since(doc, cx),
        deprecated: doc.deprecated.clone(),
        source_file: cx.source_file.to_string(),
        line: decl.line,
    }
}

struct MergedParam {
    doc: ParamDoc,
    rest: bool,
}

fn merge_params(signature: &[SignatureParam], doc: &JsDoc) -> Vec<MergedParam> {
    // Positional fallback for destructured parameters, which have no name to
    // match against.
    let top_level: Vec<&JsDocParam> = doc.params.iter().filter(|p| !p.is_property()).collect();

    signature
        .iter()
        .enumerate()
        .map(|(idx, param)| {
            let destructured = param.name.starts_with('{') || param.name.starts_with('[');
            let tag = if destructured {
                top_level.get(idx).copied()
            } else {
                doc.param(&param.name)
                    .or_else(|| doc.param(&format!("...{}", param.name)))
            };

            let name = match tag {
                Some(tag) if destructured => tag.name.clone(),
                _ => param.name.clone(),
            };
            let ty = param
                .ty
                .clone()
                .or_else(|| tag.and_then(|t| t.ty.clone()))
                .unwrap_or_else(|| DEFAULT_PARAM_TYPE.to_string());

            MergedParam {
                doc: ParamDoc {
                    name,
                    ty,
                    description: tag.map(|t| t.description.clone()).unwrap_or_default(),
                    optional: param.optional || tag.is_some_and(|t| t.optional),
                    default_value: param
                        .default
                        .clone()
                        .or_else(|| tag.and_then(|t| t.default.clone())),
                },
                rest: param.rest,
            }
        })
        .collect()
}

fn syntax_string(name: &str, generics: Option<&str>, params: &[MergedParam], ret: &str) -> String {
    let params: Vec<String> = params
        .iter()
        .map(|p| {
            if p.rest {
                format!("...{}: {}", p.doc.name, p.doc.ty)
            } else if p.doc.optional {
                format!("{}?: {}", p.doc.name, p.doc.ty)
            } else {
                format!("{}: {}", p.doc.name, p.doc.ty)
            }
        })
        .collect();
    format!(
        "{name}{}({}): {ret}",
        generics.unwrap_or_default(),
        params.join(", ")
    )
}

pub fn constant_doc(decl: &Declaration, doc: &JsDoc, cx: &RecordContext<'_>) -> ConstantDoc {
    let init = decl.initializer.as_deref().unwrap_or_default();
    let ty = decl
        .annotation
        .clone()
        .or_else(|| doc.type_tag.clone())
        .or_else(|| infer_literal_type(init).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_CONSTANT_TYPE.to_string());

    ConstantDoc {
        name: decl.name.clone(),
        category: cx.category.to_string(),
        description: doc.description.clone(),
        ty,
        value: value_preview(init, cx.value_preview_len),
        since: since(doc, cx),
        deprecated: doc.deprecated.clone(),
        source_file: cx.source_file.to_string(),
        line: decl.line,
    }
}

/// Best-effort type of a literal initializer.
pub fn infer_literal_type(init: &str) -> Option<&'static str> {
    let init = init.trim();
    // `as const` and `satisfies T` do not change the literal's shape
    let init = init
        .strip_suffix("as const")
        .map(str::trim_end)
        .unwrap_or(init);

    let first = init.chars().next()?;
    match first {
        '\'' | '"' | '`' => Some("string"),
        '[' => Some("array"),
        '{' => Some("object"),
        '/' if !init.starts_with("//") && !init.starts_with("/*") => Some("RegExp"),
        _ if init == "true" || init == "false" => Some("boolean"),
        _ if is_number_literal(init) => Some("number"),
        _ if init.starts_with("new RegExp") => Some("RegExp"),
        _ => None,
    }
}

fn is_number_literal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let s = s.trim_end_matches('n');
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit() || c == '_');
    }
    matches!(s, "Infinity" | "NaN")
        || (!s.is_empty()
            && s.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && s.replace('_', "").parse::<f64>().is_ok())
}

/// Whitespace-collapsed initializer, cut to `max` characters with `...`.
pub fn value_preview(init: &str, max: usize) -> String {
    let collapsed = collapse_whitespace(init);
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let keep = max.saturating_sub(3);
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn type_doc(decl: &Declaration, doc: &JsDoc, cx: &RecordContext<'_>) -> TypeDoc {
    TypeDoc {
        name: decl.name.clone(),
        category: cx.category.to_string(),
        description: doc.description.clone(),
        definition: decl.definition.clone().unwrap_or_default(),
        properties: decl.members.iter().map(property_doc).collect(),
        since: since(doc, cx),
        deprecated: doc.deprecated.clone(),
        source_file: cx.source_file.to_string(),
        line: decl.line,
    }
}

fn property_doc(member: &MemberDecl) -> PropertyDoc {
    PropertyDoc {
        name: member.name.clone(),
        ty: member.ty.clone(),
        description: member
            .doc
            .as_deref()
            .map(|raw| JsDoc::parse(raw).description)
            .unwrap_or_default(),
        optional: member.optional,
        readonly: member.readonly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{SourceScanner, SyntaxScanner};

    const CX: RecordContext<'static> = RecordContext {
        category: "math",
        source_file: "src/core/math.ts",
        default_since: "1.0.0",
        value_preview_len: 120,
    };

    fn records(src: &str) -> FileDocs {
        assemble(SyntaxScanner.scan(src), &CX)
    }

    #[test]
    fn add_scenario() {
        let docs = records(
            "/** Adds two numbers.\n * @param {number} a - first\n * @param {number} b - second\n * @returns {number} sum\n */\nexport function add(a: number, b: number): number { return a + b; }",
        );
        let add = &docs.functions[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.description, "Adds two numbers.");
        assert_eq!(add.syntax, "add(a: number, b: number): number");
        assert_eq!(
            add.params,
            vec![
                ParamDoc {
                    name: "a".into(),
                    ty: "number".into(),
                    description: "first".into(),
                    optional: false,
                    default_value: None,
                },
                ParamDoc {
                    name: "b".into(),
                    ty: "number".into(),
                    description: "second".into(),
                    optional: false,
                    default_value: None,
                },
            ]
        );
        assert_eq!(add.returns.ty, "number");
        assert_eq!(add.returns.description, "sum");
        assert_eq!(add.since, "1.0.0");
        assert_eq!(add.line, 6);
        assert_eq!(add.category, "math");
    }

    #[test]
    fn signature_decides_names_and_order() {
        let docs = records(
            "/**\n * Pad.\n * @param {number} width - target\n * @param {string} [fill=\" \"] - fill char\n * @param {string} ghost - not in signature\n * @param {number} options.x - property\n */\nexport function pad(value, width: number, fill = ' ') { return value; }\n",
        );
        let f = &docs.functions[0];
        let names: Vec<_> = f.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["value", "width", "fill"]);
        assert_eq!(f.params[0].ty, "any");
        assert_eq!(f.params[0].description, "");
        assert!(f.params[2].optional);
        assert_eq!(f.params[2].default_value.as_deref(), Some("' '"));
        assert_eq!(f.params[2].ty, "string");
        assert_eq!(f.returns.ty, "void");
        assert_eq!(f.syntax, "pad(value: any, width: number, fill?: string): void");
    }

    #[test]
    fn doc_optional_marker_applies_to_signature_param() {
        let docs = records(
            "/**\n * Join.\n * @param {string[]} parts\n * @param {string} [sep] - separator\n */\nexport const join = <T,>(parts: string[], sep): string => parts.join(sep);\n",
        );
        let f = &docs.functions[0];
        assert!(!f.params[0].optional);
        assert!(f.params[1].optional);
        assert_eq!(f.params[1].ty, "string");
        assert_eq!(f.syntax, "join<T,>(parts: string[], sep?: string): string");
    }

    #[test]
    fn rest_and_destructured_params() {
        let docs = records(
            "/**\n * Sum.\n * @param {Object} options - settings\n * @param {...number} values - numbers\n */\nexport function total({ round }: Options, ...values: number[]) { return 0; }\n",
        );
        let f = &docs.functions[0];
        assert_eq!(f.params[0].name, "options");
        assert_eq!(f.params[0].ty, "Options");
        assert_eq!(f.params[0].description, "settings");
        assert_eq!(f.params[1].name, "values");
        assert!(f.params[1].optional);
        assert_eq!(f.params[1].description, "numbers");
        assert_eq!(f.syntax, "total(options: Options, ...values: number[]): void");
    }

    #[test]
    fn constants_infer_types_and_preview_values() {
        let long = format!("export const LONG = \"{}\";\n", "x".repeat(200));
        let src = format!(
            "/** Name. */\nexport const NAME = 'utilkit';\n/** Limit. */\nexport const LIMIT: Limit = 10;\n/** Tagged.\n * @type {{Set<string>}}\n */\nexport const TAGS = new Set();\n/** Pattern. */\nexport const RE = /a+/g;\n/** Long. */\n{long}/** Mystery. */\nexport const M = compute();\n"
        );
        let docs = records(&src);
        let ty: Vec<_> = docs.constants.iter().map(|c| c.ty.as_str()).collect();
        assert_eq!(ty, vec!["string", "Limit", "Set<string>", "RegExp", "string", "unknown"]);
        let long = &docs.constants[4].value;
        assert_eq!(long.chars().count(), 120);
        assert!(long.ends_with("..."));
        assert_eq!(docs.constants[0].value, "'utilkit'");
    }

    #[test]
    fn literal_inference() {
        assert_eq!(infer_literal_type("42"), Some("number"));
        assert_eq!(infer_literal_type("-1.5e3"), Some("number"));
        assert_eq!(infer_literal_type("0xff"), Some("number"));
        assert_eq!(infer_literal_type("true"), Some("boolean"));
        assert_eq!(infer_literal_type("[1, 2] as const"), Some("array"));
        assert_eq!(infer_literal_type("{ a: 1 }"), Some("object"));
        assert_eq!(infer_literal_type("Math.PI"), None);
    }

    #[test]
    fn interface_properties_carry_docs() {
        let docs = records(
            "/** Options for debounce. */\nexport interface DebounceOptions {\n  /** Fire on the leading edge. */\n  leading?: boolean;\n  readonly wait: number;\n  cancel(reason: string): void;\n}\n",
        );
        let t = &docs.types[0];
        assert!(t.definition.starts_with("interface DebounceOptions {"));
        assert_eq!(t.properties.len(), 3);
        assert_eq!(t.properties[0].description, "Fire on the leading edge.");
        assert!(t.properties[0].optional);
        assert!(t.properties[1].readonly);
        assert_eq!(t.properties[2].ty, "(reason: string) => void");
    }

    #[test]
    fn undocumented_exports_are_skipped() {
        let docs = records("export function hidden() {}\n/* plain */\nexport const X = 1;\n");
        assert!(docs.is_empty());
    }

    #[test]
    fn since_and_deprecated_tags() {
        let docs = records("/**\n * Old.\n * @since 0.3.0\n * @deprecated use `next`\n */\nexport type Old = string;\n");
        assert_eq!(docs.types[0].since, "0.3.0");
        assert_eq!(docs.types[0].deprecated.as_deref(), Some("use `next`"));
        assert_eq!(docs.types[0].definition, "type Old = string");
    }
}
