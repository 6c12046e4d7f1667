//! Category labels derived from where a file lives.

use camino::{Utf8Component, Utf8Path};

use crate::config::DocgenConfig;

pub const UTILS_CATEGORY: &str = "utils";
pub const CONSTANTS_CATEGORY: &str = "constants";
pub const OTHER_CATEGORY: &str = "other";

/// Category for a path relative to the project root.
///
/// - `core/string.ts` and `core/array/index.ts` give `string` and `array`
/// - anything under the utils directory gives `utils`
/// - the constants module gives `constants`
/// - everything else gives `other`
pub fn derive_category(rel: &Utf8Path, config: &DocgenConfig) -> String {
    let rel = clean(rel);

    if rel == clean(&config.constants_file) {
        return CONSTANTS_CATEGORY.to_string();
    }
    if let Ok(below) = rel.strip_prefix(clean(&config.core_dir)) {
        let mut components = below.components();
        if let Some(Utf8Component::Normal(first)) = components.next() {
            let label = if components.next().is_some() {
                first
            } else {
                Utf8Path::new(first).file_stem().unwrap_or(first)
            };
            return label.to_lowercase();
        }
    }
    if rel.strip_prefix(clean(&config.utils_dir)).is_ok() {
        return UTILS_CATEGORY.to_string();
    }
    OTHER_CATEGORY.to_string()
}

/// Drop `.` components so `./src/core` and `src/core` compare equal.
fn clean(path: &Utf8Path) -> camino::Utf8PathBuf {
    path.components()
        .filter(|c| !matches!(c, Utf8Component::CurDir))
        .collect()
}
