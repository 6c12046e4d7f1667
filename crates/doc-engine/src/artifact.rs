//! Reading and writing the JSON artifact.

use camino::Utf8Path;

use crate::error::{DocsError, Result};
use crate::model::DocsData;

impl DocsData {
    /// Read an artifact written by [`DocsData::write`].
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        Self::from_json(&text).map_err(|e| DocsError::json(path, e))
    }

    /// Write the artifact as pretty JSON, creating parent directories.
    pub fn write(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DocsError::io(parent, e))?;
        }
        let mut json = self.to_json_pretty().map_err(|e| DocsError::json(path, e))?;
        json.push('\n');
        std::fs::write(path, json).map_err(|e| DocsError::io(path, e))?;
        tracing::info!(%path, entries = self.len(), "wrote documentation artifact");
        Ok(())
    }
}
