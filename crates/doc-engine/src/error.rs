use std::fmt;

use camino::Utf8PathBuf;

pub type Result<T, E = DocsError> = std::result::Result<T, E>;

/// Unrecoverable failures of a documentation run.
///
/// Per-file problems never surface here; they are logged and the file is
/// skipped.
#[derive(Debug)]
pub enum DocsError {
    /// A required file could not be read or written.
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    /// A JSON artifact could not be parsed or produced.
    Json {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
    /// `docgen.toml` exists but does not describe a valid configuration.
    Config { path: Utf8PathBuf, message: String },
}

impl DocsError {
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        DocsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        DocsError::Json {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            DocsError::Io { path, .. }
            | DocsError::Json { path, .. }
            | DocsError::Config { path, .. } => path,
        }
    }
}

impl fmt::Display for DocsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocsError::Io { path, source } => write!(f, "cannot access {path}: {source}"),
            DocsError::Json { path, source } => write!(f, "invalid JSON in {path}: {source}"),
            DocsError::Config { path, message } => write!(f, "invalid config {path}: {message}"),
        }
    }
}

impl std::error::Error for DocsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocsError::Io { source, .. } => Some(source),
            DocsError::Json { source, .. } => Some(source),
            DocsError::Config { .. } => None,
        }
    }
}
