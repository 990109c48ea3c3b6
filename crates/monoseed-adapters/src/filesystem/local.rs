//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::Path;

use monoseed_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{MonoseedError, MonoseedResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    fn copy_file(from: &Path, to: &Path) -> MonoseedResult<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::copy(from, to).map_err(|e| map_io_error(from, e, "copy file"))?;
        Ok(())
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> MonoseedResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> MonoseedResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> MonoseedResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> MonoseedResult<()> {
        if !from.is_dir() {
            return Self::copy_file(from, to);
        }

        for entry in WalkDir::new(from) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                map_io_error(&path, io::Error::other(e.to_string()), "walk directory")
            })?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "resolve path"))?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest)
                    .map_err(|e| map_io_error(&dest, e, "create directory"))?;
            } else {
                trace!(from = %entry.path().display(), to = %dest.display(), "Copying file");
                Self::copy_file(entry.path(), &dest)?;
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> MonoseedResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_path(&self, path: &Path) -> MonoseedResult<()> {
        match std::fs::symlink_metadata(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(path, e, "inspect path")),
            Ok(meta) if meta.is_dir() => self.remove_dir_all(path),
            Ok(_) => std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> MonoseedError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_creates_parents_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = dir.path().join("a/b/c.txt");

        fs.write_file(&file, "hello").unwrap();

        assert_eq!(fs.read_file(&file).unwrap(), "hello");
        assert!(fs.is_dir(&dir.path().join("a/b")));
    }

    #[test]
    fn copy_tree_copies_nested_directories() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let src = dir.path().join("src");
        fs.write_file(&src.join("app/main.ts"), "main").unwrap();
        fs.write_file(&src.join("app/nested/util.ts"), "util").unwrap();
        fs.create_dir_all(&src.join("empty")).unwrap();

        let dst = dir.path().join("out/copy");
        fs.copy_tree(&src, &dst).unwrap();

        assert_eq!(fs.read_file(&dst.join("app/main.ts")).unwrap(), "main");
        assert_eq!(fs.read_file(&dst.join("app/nested/util.ts")).unwrap(), "util");
        assert!(fs.is_dir(&dst.join("empty")));
    }

    #[test]
    fn copy_tree_copies_single_file() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.write_file(&dir.path().join("nx.json"), "{}").unwrap();

        fs.copy_tree(&dir.path().join("nx.json"), &dir.path().join("t/nx.json"))
            .unwrap();

        assert_eq!(fs.read_file(&dir.path().join("t/nx.json")).unwrap(), "{}");
    }

    #[test]
    fn copy_of_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let err = fs
            .copy_tree(&dir.path().join("nope"), &dir.path().join("t"))
            .unwrap_err();
        assert!(err.to_string().contains("copy file"));
    }

    #[test]
    fn remove_path_handles_files_dirs_and_missing() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = dir.path().join("f.txt");
        let tree = dir.path().join("tree");
        fs.write_file(&file, "x").unwrap();
        fs.write_file(&tree.join("inner.txt"), "y").unwrap();

        fs.remove_path(&file).unwrap();
        fs.remove_path(&tree).unwrap();
        fs.remove_path(&dir.path().join("missing")).unwrap();

        assert!(!fs.exists(&file));
        assert!(!fs.exists(&tree));
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&dir.path().join("package.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            MonoseedError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
