use std::process::Command;

use camino::Utf8Path;
use test_utils::{ProjectTree, normalize_newlines, replace_root};

const MANIFEST: &str = r#"{ "name": "utilkit", "version": "2.1.0", "license": "MIT" }"#;

const ARRAY: &str = "/**\n * Split an array into groups.\n * @param {T[]} array - Input\n * @param {number} [size=1] - Group length\n * @returns {T[][]} Groups\n */\nexport function chunk<T>(array: T[], size = 1): T[][] {\n  return [];\n}\n";

struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

fn run_docgen(root: &Utf8Path, args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_docgen"))
        .arg("--root")
        .arg(root.as_str())
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run docgen");
    let text = |bytes: &[u8]| {
        let raw = String::from_utf8_lossy(bytes);
        replace_root(&normalize_newlines(&raw), root, "<root>")
    };
    CliOutput {
        stdout: text(&output.stdout),
        stderr: text(&output.stderr),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

#[test]
fn writes_the_artifact() {
    let tree = ProjectTree::new(&[("package.json", MANIFEST), ("src/core/array.ts", ARRAY)]);
    let out = run_docgen(tree.root(), &[]);
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Wrote 1 entries to website/src/data/docs.json"));

    let written = std::fs::read_to_string(tree.path("website/src/data/docs.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["functions"][0]["name"], "chunk");
    assert_eq!(json["functions"][0]["category"], "array");
    assert_eq!(json["functions"][0]["params"][1]["optional"], true);
    assert_eq!(json["functions"][0]["params"][1]["defaultValue"], "1");
    assert_eq!(json["packageInfo"]["name"], "utilkit");
}

#[test]
fn missing_manifest_exits_with_error() {
    let tree = ProjectTree::new(&[("src/core/array.ts", ARRAY)]);
    let out = run_docgen(tree.root(), &[]);
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("Error: cannot access <root>/package.json"), "{}", out.stderr);
    assert!(!tree.path("website/src/data/docs.json").exists());
}

#[test]
fn unknown_strategy_is_a_usage_error() {
    let tree = ProjectTree::new(&[("package.json", MANIFEST), ("src/core/array.ts", ARRAY)]);
    let out = run_docgen(tree.root(), &["--strategy", "ast"]);
    assert_eq!(out.exit_code, 2);
    assert!(out.stderr.contains("unknown scan strategy `ast`"), "{}", out.stderr);
}

#[test]
fn invalid_config_exits_with_error() {
    let tree = ProjectTree::new(&[
        ("package.json", MANIFEST),
        ("docgen.toml", "unknown_key = 1\n"),
    ]);
    let out = run_docgen(tree.root(), &[]);
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("Error: invalid config"), "{}", out.stderr);
}

#[test]
fn stdout_prints_json_only() {
    let tree = ProjectTree::new(&[("package.json", MANIFEST), ("src/core/array.ts", ARRAY)]);
    let out = run_docgen(tree.root(), &["--stdout", "--summary", "--strategy", "regex"]);
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    let json: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(json["functions"][0]["syntax"], "chunk<T>(array: T[], size?: number): T[][]");
    assert!(out.stderr.contains("array (1):"));
    assert!(!tree.path("website/src/data/docs.json").exists());
}

#[test]
fn custom_output_and_search() {
    let tree = ProjectTree::new(&[("package.json", MANIFEST), ("src/core/array.ts", ARRAY)]);
    let out = run_docgen(tree.root(), &["--out", "build/docs.json", "--search", "split"]);
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(tree.path("build/docs.json").exists());
    assert!(out.stdout.contains("1 entries match `split`:"));
    assert!(out.stdout.contains("chunk (array)"));
}
