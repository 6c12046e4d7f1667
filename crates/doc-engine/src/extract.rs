//! Documentation extraction from a project tree
//!
//! [`DocExtractor`] enumerates the configured source files, reads and scans
//! them concurrently, and collects the records into one [`DocsData`]
//! snapshot ordered by file path and then source position.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use common::paths::display_relative;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::assemble::{RecordContext, assemble};
use crate::category::derive_category;
use crate::config::DocgenConfig;
use crate::error::Result;
use crate::manifest::load_package_info;
use crate::model::{DocsData, FileDocs};
use crate::scan::SourceScanner;

pub struct DocExtractor {
    root: Utf8PathBuf,
    config: DocgenConfig,
    scanner: Arc<dyn SourceScanner>,
}

/// One file to read, with everything its records need
struct FileJob {
    index: usize,
    path: Utf8PathBuf,
    source_file: String,
    category: String,
}

impl DocExtractor {
    /// Create an extractor using the scanner named by `config.strategy`.
    pub fn new(root: impl Into<Utf8PathBuf>, config: DocgenConfig) -> Self {
        let scanner = config.strategy.scanner();
        DocExtractor {
            root: root.into(),
            config,
            scanner,
        }
    }

    pub fn with_scanner(mut self, scanner: Arc<dyn SourceScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn scanner_name(&self) -> &'static str {
        self.scanner.name()
    }

    /// Whether `path` names a source file that should be documented.
    pub fn is_source_file(&self, path: &Utf8Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        if file_name.ends_with(".d.ts") || file_name.contains(".test.") || file_name.contains(".spec.")
        {
            return false;
        }
        path.extension()
            .is_some_and(|ext| self.config.accepts_extension(ext))
    }

    /// All source files to document, sorted by path.
    pub fn source_files(&self) -> Vec<Utf8PathBuf> {
        let mut files = Vec::new();

        for dir in [&self.config.core_dir, &self.config.utils_dir] {
            let dir = self.root.join(dir);
            if !dir.is_dir() {
                tracing::warn!(path = %dir, "source directory not found");
                continue;
            }
            for entry in WalkDir::new(&dir) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(error) => {
                        tracing::warn!(%error, "cannot walk source directory entry, skipping");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
                    Ok(path) => path,
                    Err(path) => {
                        tracing::warn!(path = %path.display(), "source path is not UTF-8, skipping");
                        continue;
                    }
                };
                if self.is_source_file(&path) {
                    files.push(path);
                }
            }
        }

        let constants = self.root.join(&self.config.constants_file);
        if constants.is_file() {
            if self.is_source_file(&constants) {
                files.push(constants);
            }
        } else {
            tracing::warn!(path = %constants, "constants module not found");
        }

        files.sort();
        files.dedup();
        files
    }

    /// Records for one file's text. `rel` is the path relative to the root.
    pub fn extract_source(&self, rel: &Utf8Path, source: &str) -> FileDocs {
        let category = derive_category(rel, &self.config);
        let source_file = display_relative(Utf8Path::new(""), rel);
        scan_file(
            self.scanner.as_ref(),
            source,
            &RecordContext {
                category: &category,
                source_file: &source_file,
                default_since: &self.config.default_since,
                value_preview_len: self.config.value_preview_len,
            },
        )
    }

    /// Extract documentation for the whole project.
    ///
    /// Only an unreadable manifest is an error. Files that cannot be read are
    /// logged and skipped.
    pub async fn extract(&self) -> Result<DocsData> {
        let manifest = self.root.join(&self.config.manifest);
        let package_info = load_package_info(&manifest).await?;

        let files = self.source_files();
        tracing::info!(
            root = %self.root,
            files = files.len(),
            strategy = self.scanner.name(),
            "extracting documentation"
        );

        let mut tasks = JoinSet::new();
        for (index, path) in files.into_iter().enumerate() {
            let rel = path.strip_prefix(&self.root).unwrap_or(path.as_path());
            let job = FileJob {
                index,
                source_file: display_relative(&self.root, &path),
                category: derive_category(rel, &self.config),
                path,
            };
            let scanner = Arc::clone(&self.scanner);
            let default_since = self.config.default_since.clone();
            let value_preview_len = self.config.value_preview_len;

            tasks.spawn(async move {
                let text = match tokio::fs::read_to_string(&job.path).await {
                    Ok(text) => text,
                    Err(error) => {
                        tracing::warn!(path = %job.path, %error, "cannot read source file, skipping");
                        return (job.index, None);
                    }
                };
                let docs = scan_file(
                    scanner.as_ref(),
                    &text,
                    &RecordContext {
                        category: &job.category,
                        source_file: &job.source_file,
                        default_since: &default_since,
                        value_preview_len,
                    },
                );
                tracing::debug!(file = %job.source_file, records = docs.len(), "scanned");
                (job.index, Some(docs))
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(docs))) => results.push((index, docs)),
                Ok((_, None)) => {}
                Err(error) => tracing::error!(%error, "source task failed, skipping file"),
            }
        }
        results.sort_by_key(|(index, _)| *index);

        let mut data = DocsData::new(package_info);
        for (_, docs) in results {
            data.push_file(docs);
        }
        tracing::info!(
            functions = data.functions.len(),
            constants = data.constants.len(),
            types = data.types.len(),
            "extraction complete"
        );
        Ok(data)
    }
}

fn scan_file(scanner: &dyn SourceScanner, source: &str, cx: &RecordContext<'_>) -> FileDocs {
    assemble(scanner.scan(source), cx)
}
