use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary project directory populated from `(relative path, contents)`
/// pairs. The directory is removed when the value is dropped.
pub struct ProjectTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ProjectTree {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        write_tree(&root, files);
        ProjectTree { _dir: dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }
}

/// Write each file below `root`, creating parent directories.
pub fn write_tree(root: &Utf8Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directories");
        }
        std::fs::write(&path, contents).expect("write fixture file");
    }
}
