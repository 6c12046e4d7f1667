use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use dir_test::{Fixture, dir_test};
use doc_engine::{
    DocExtractor, DocgenConfig, DocsCache, DocsData, DocsError, PackageInfo, RegexScanner,
    SourceScanner, SyntaxScanner,
};
use test_utils::ProjectTree;

const MANIFEST: &str = r#"{
  "name": "utilkit",
  "version": "2.1.0",
  "description": "Small utilities",
  "license": "MIT",
  "repository": { "type": "git", "url": "https://example.com/utilkit.git" }
}"#;

const ADD: &str = "/** Adds two numbers.\n * @param {number} a - first\n * @param {number} b - second\n * @returns {number} sum\n */\nexport function add(a: number, b: number): number { return a + b; }";

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/tests/fixtures",
    glob: "*.ts",
)]
fn strategies_agree(fixture: Fixture<&str>) {
    let source = fixture.content();
    let by_syntax = SyntaxScanner.scan(source);
    let by_regex = RegexScanner.scan(source);
    assert_eq!(by_syntax, by_regex, "declarations differ for {}", fixture.path());

    let file_name = Utf8Path::new(fixture.path()).file_name().unwrap();
    let rel = Utf8PathBuf::from("src/core").join(file_name);
    let syntax = DocExtractor::new(".", DocgenConfig::default());
    let regex = DocExtractor::new(".", DocgenConfig::default()).with_scanner(Arc::new(RegexScanner));

    let docs = syntax.extract_source(&rel, source);
    assert!(!docs.is_empty(), "no records in {}", fixture.path());
    assert_eq!(docs, regex.extract_source(&rel, source));

    let category = rel.file_stem().unwrap();
    assert!(docs.functions.iter().all(|f| f.category == category && f.source_file == rel.as_str()));
    assert!(docs.constants.iter().all(|c| c.category == category && c.source_file == rel.as_str()));
    assert!(docs.types.iter().all(|t| t.category == category && t.source_file == rel.as_str()));
}

fn project(extra: &[(&str, &str)]) -> ProjectTree {
    let mut files = vec![("package.json", MANIFEST), ("src/core/math.ts", ADD)];
    files.extend_from_slice(extra);
    ProjectTree::new(&files)
}

#[tokio::test]
async fn add_scenario() {
    let tree = project(&[]);
    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();

    assert_eq!(data.functions.len(), 1);
    let add = &data.functions[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.category, "math");
    assert_eq!(add.source_file, "src/core/math.ts");
    assert_eq!(add.line, 6);
    let params: Vec<_> = add
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.ty.as_str(), p.optional))
        .collect();
    assert_eq!(params, vec![("a", "number", false), ("b", "number", false)]);
    assert_eq!(add.returns.ty, "number");
    assert_eq!(add.returns.description, "sum");

    assert_eq!(data.package_info.name, "utilkit");
    assert_eq!(data.package_info.repository, "https://example.com/utilkit.git");
}

#[tokio::test]
async fn categories_and_ordering() {
    let tree = project(&[
        ("src/core/array/index.ts", "/** First. */\nexport const first = <T>(xs: T[]): T => xs[0];\n"),
        ("src/core/array/chunk.ts", "/** Chunk. */\nexport function chunk() {}\n"),
        ("src/utils/debounce.ts", "/** Debounce. */\nexport function debounce() {}\n"),
        ("src/constants.ts", "/** Pi. */\nexport const PI = 3.14;\n"),
        ("src/index.ts", "/** Ignored: not under a configured directory. */\nexport function root() {}\n"),
        ("src/core/math.test.ts", "/** Test helper. */\nexport function helper() {}\n"),
        ("src/core/types.d.ts", "/** Declared. */\nexport function declared(): void;\n"),
        ("src/core/readme.md", "/** Not source. */\nexport function md() {}\n"),
    ]);
    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();

    let functions: Vec<_> = data
        .functions
        .iter()
        .map(|f| (f.name.as_str(), f.category.as_str()))
        .collect();
    assert_eq!(
        functions,
        vec![
            ("chunk", "array"),
            ("first", "array"),
            ("add", "math"),
            ("debounce", "utils"),
        ]
    );
    assert_eq!(data.constants[0].category, "constants");
    assert_eq!(data.constants[0].ty, "number");
}

#[tokio::test]
async fn undocumented_and_detached_exports_yield_nothing() {
    let tree = project(&[(
        "src/core/string.ts",
        "export function bare() {}\n/** Gap. */\n\n\nexport function gapped() {}\n/** Doc. */\n// note\nexport function noted() {}\n",
    )]);
    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();
    assert!(data.find_function("bare").is_none());
    assert!(data.find_function("gapped").is_none());
    assert!(data.find_function("noted").is_none());
    assert!(data.find_function("add").is_some());
}

#[tokio::test]
async fn malformed_manifest_gives_default_package_info() {
    let tree = ProjectTree::new(&[("package.json", "{ not json"), ("src/core/math.ts", ADD)]);
    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();
    assert_eq!(data.package_info, PackageInfo::default());
    assert_eq!(data.functions.len(), 1);
}

#[tokio::test]
async fn missing_manifest_is_an_error() {
    let tree = ProjectTree::new(&[("src/core/math.ts", ADD)]);
    let err = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap_err();
    assert!(matches!(err, DocsError::Io { .. }));
    assert!(err.path().ends_with("package.json"));
}

#[tokio::test]
async fn unreadable_files_and_missing_dirs_are_skipped() {
    let tree = project(&[]);
    std::fs::write(tree.path("src/core/binary.ts"), [0xff, 0xfe, 0x00]).unwrap();
    // No src/utils and no constants module.
    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();
    assert_eq!(data.functions.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn non_utf8_paths_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = project(&[]);
    let odd = tree.root().as_std_path().join("src/core").join(OsStr::from_bytes(b"bad\xff.ts"));
    std::fs::write(odd, ADD).unwrap();

    let data = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();
    let files: Vec<_> = data.functions.iter().map(|f| f.source_file.as_str()).collect();
    assert_eq!(files, vec!["src/core/math.ts"]);
}

#[tokio::test]
async fn regex_strategy_matches_syntax_strategy() {
    let tree = project(&[
        ("src/core/array.ts", include_str!("fixtures/array.ts")),
        ("src/core/string.ts", include_str!("fixtures/string.ts")),
        ("src/constants.ts", include_str!("fixtures/constants.ts")),
        ("src/utils/types.ts", include_str!("fixtures/types.ts")),
    ]);
    let by_syntax = DocExtractor::new(tree.root(), DocgenConfig::default())
        .extract()
        .await
        .unwrap();
    let by_regex = DocExtractor::new(tree.root(), DocgenConfig::default())
        .with_scanner(Arc::new(RegexScanner))
        .extract()
        .await
        .unwrap();
    assert_eq!(by_syntax, by_regex);

    let chunk = by_syntax.find_function("chunk").unwrap();
    assert_eq!(chunk.syntax, "chunk<T>(array: T[], size?: number): T[][]");
    assert_eq!(chunk.params[1].default_value.as_deref(), Some("1"));
    assert_eq!(
        chunk.description,
        "Split an array into groups of `size` elements.\n\nThe final group holds the remainder."
    );
    assert!(chunk.example.starts_with("chunk([1, 2, 3, 4, 5], 2)"));

    assert!(by_syntax.find_function("internalOnly").is_none());
    assert!(by_syntax.find_function("truncate").unwrap().deprecated.is_some());
    assert_eq!(by_syntax.find_function("words").unwrap().returns.ty, "Promise<string[]>");
    assert_eq!(by_syntax.find_function("groupBy").unwrap().since, "1.2.0");

    assert_eq!(by_syntax.find_constant("ISO_DATE").unwrap().ty, "RegExp");
    assert_eq!(by_syntax.find_constant("DEFAULT_FORMAT").unwrap().ty, "FormatOptions");
    assert!(by_syntax.find_constant("DEBUG").is_some());
    assert!(by_syntax.find_constant("DETACHED").is_none());

    let options = by_syntax.find_type("DebounceOptions").unwrap();
    assert_eq!(options.category, "utils");
    assert_eq!(options.properties.len(), 4);
    let point = by_syntax.find_type("Point").unwrap();
    let names: Vec<_> = point.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[tokio::test]
async fn artifact_round_trip_through_cache() {
    let tree = project(&[]);
    let extractor = DocExtractor::new(tree.root(), DocgenConfig::default());
    let data = extractor.extract().await.unwrap();

    let out = tree.path("website/src/data/docs.json");
    data.write(&out).unwrap();

    let cache = DocsCache::new();
    let loaded = cache.get_or_try_init(|| DocsData::load(&out)).unwrap();
    assert_eq!(*loaded, data);
    assert!(cache.is_initialized());
}

#[test]
fn config_file_selects_directories() {
    let tree = ProjectTree::new(&[(
        "docgen.toml",
        "core_dir = \"lib\"\nstrategy = \"regex\"\n",
    )]);
    let config = DocgenConfig::load(tree.root()).unwrap();
    assert_eq!(config.core_dir, Utf8Path::new("lib"));
    let extractor = DocExtractor::new(tree.root(), config);
    assert_eq!(extractor.scanner_name(), "regex");
}
