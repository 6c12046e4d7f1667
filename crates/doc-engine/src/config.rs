//! `docgen.toml` project configuration.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{DocsError, Result};
use crate::scan::ScanStrategy;

/// Where the sources live and how to read them. Paths are relative to the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocgenConfig {
    /// Each first-level entry under this directory is its own category
    pub core_dir: Utf8PathBuf,
    pub utils_dir: Utf8PathBuf,
    pub constants_file: Utf8PathBuf,
    /// `package.json`
    pub manifest: Utf8PathBuf,
    pub output: Utf8PathBuf,
    /// Accepted source extensions, without the dot
    pub extensions: Vec<String>,
    pub strategy: ScanStrategy,
    /// Used when a doc comment has no `@since` tag
    pub default_since: String,
    pub value_preview_len: usize,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        DocgenConfig {
            core_dir: "src/core".into(),
            utils_dir: "src/utils".into(),
            constants_file: "src/constants.ts".into(),
            manifest: "package.json".into(),
            output: "website/src/data/docs.json".into(),
            extensions: ["ts", "tsx", "js", "mjs"].map(String::from).to_vec(),
            strategy: ScanStrategy::default(),
            default_since: "1.0.0".to_string(),
            value_preview_len: 120,
        }
    }
}

impl DocgenConfig {
    pub const FILE_NAME: &'static str = "docgen.toml";

    /// Parse the contents of a config file. `path` is only used for errors.
    pub fn parse(text: &str, path: &Utf8Path) -> Result<Self> {
        let config: DocgenConfig = toml::from_str(text).map_err(|e| DocsError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        if config.extensions.is_empty() {
            return Err(DocsError::Config {
                path: path.to_path_buf(),
                message: "`extensions` must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    /// Load `<root>/docgen.toml`, falling back to the defaults when the file
    /// does not exist.
    pub fn load(root: &Utf8Path) -> Result<Self> {
        let path = root.join(Self::FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(%path, "loading config");
                Self::parse(&text, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DocsError::io(path, e)),
        }
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}
