use camino::Utf8Path;
use typed_path::{Utf8WindowsComponent, Utf8WindowsPath};

/// Rewrite backslash-separated paths (as they may appear in config files
/// written on Windows) with forward slashes. Drive prefixes are kept as `C:`.
pub fn normalize_slashes(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rooted = false;
    for component in Utf8WindowsPath::new(raw).components() {
        match component {
            Utf8WindowsComponent::Prefix(prefix) => parts.push(prefix.as_str().replace('\\', "/")),
            Utf8WindowsComponent::RootDir => rooted = true,
            Utf8WindowsComponent::CurDir => parts.push(".".to_string()),
            Utf8WindowsComponent::ParentDir => parts.push("..".to_string()),
            Utf8WindowsComponent::Normal(name) => parts.push(name.to_string()),
        }
    }

    match parts.split_first() {
        Some((first, rest)) if first.ends_with(':') => {
            let sep = if rooted { "/" } else { "" };
            format!("{first}{sep}{}", rest.join("/"))
        }
        _ if rooted => format!("/{}", parts.join("/")),
        _ => parts.join("/"),
    }
}

/// Display `path` relative to `root`, always with forward slashes.
///
/// Paths outside `root` are returned whole.
pub fn display_relative(root: &Utf8Path, path: &Utf8Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    if rel.is_absolute() {
        return normalize_slashes(rel.as_str());
    }
    let joined = rel
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/");
    normalize_slashes(&joined)
}
