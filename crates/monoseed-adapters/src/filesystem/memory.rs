//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use monoseed_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{MonoseedError, MonoseedResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle while the service under
/// test owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes under these prefixes fail.
    read_only: HashSet<PathBuf>,
    mutations: usize,
}

/// Files and directories at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub files: BTreeMap<PathBuf, String>,
    pub directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parents (builder style).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_dirs(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Make every write at or below `prefix` fail.
    pub fn deny_writes_under(&self, prefix: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(prefix.as_ref().to_path_buf());
        }
    }

    /// A file's content, if present (testing helper).
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().ok()?.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Count of successful mutating calls so far.
    pub fn mutation_count(&self) -> usize {
        self.read().map(|inner| inner.mutations).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read()
            .map(|inner| Snapshot {
                files: inner.files.clone(),
                directories: inner.directories.clone(),
            })
            .unwrap_or_else(|_| Snapshot {
                files: BTreeMap::new(),
                directories: BTreeSet::new(),
            })
    }

    fn read(&self) -> MonoseedResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> MonoseedResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystemInner {
    fn check_writable(&self, path: &Path) -> MonoseedResult<()> {
        if self.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(not_permitted(path));
        }
        Ok(())
    }

    fn remove_under(&mut self, path: &Path) {
        self.directories.retain(|p| !p.starts_with(path));
        self.files.retain(|p, _| !p.starts_with(path));
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> MonoseedResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;
        insert_dirs(&mut inner.directories, path);
        inner.mutations += 1;
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> MonoseedResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;
        if inner.directories.contains(path) {
            return Err(fs_error(path, "is a directory"));
        }
        if let Some(parent) = path.parent() {
            insert_dirs(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.mutations += 1;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> MonoseedResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> MonoseedResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(to)?;

        if let Some(content) = inner.files.get(from).cloned() {
            if let Some(parent) = to.parent() {
                insert_dirs(&mut inner.directories, parent);
            }
            inner.files.insert(to.to_path_buf(), content);
            inner.mutations += 1;
            return Ok(());
        }
        if !inner.directories.contains(from) {
            return Err(fs_error(from, "No such file or directory"));
        }

        let rebase = |p: &Path| p.strip_prefix(from).map(|rel| to.join(rel)).ok();
        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|d| d.starts_with(from))
            .filter_map(|d| rebase(d.as_path()))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .filter_map(|(p, c)| rebase(p.as_path()).map(|dest| (dest, c.clone())))
            .collect();

        for dir in dirs {
            insert_dirs(&mut inner.directories, &dir);
        }
        for (dest, content) in files {
            inner.files.insert(dest, content);
        }
        inner.mutations += 1;
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> MonoseedResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }
        inner.remove_under(path);
        inner.mutations += 1;
        Ok(())
    }

    fn remove_path(&self, path: &Path) -> MonoseedResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) && !inner.directories.contains(path) {
            return Ok(());
        }
        inner.check_writable(path)?;
        inner.remove_under(path);
        inner.mutations += 1;
        Ok(())
    }
}

fn insert_dirs(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn fs_error(path: &Path, reason: &str) -> MonoseedError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn not_permitted(path: &Path) -> MonoseedError {
    fs_error(path, "Permission denied")
}

fn lock_poisoned() -> MonoseedError {
    MonoseedError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_tree_rebases_directory() {
        let fs = MemoryFilesystem::new()
            .with_file("/tpl/client/src/main.tsx", "main")
            .with_file("/tpl/nx.json", "{}");

        fs.copy_tree(Path::new("/tpl/client"), Path::new("/work/app/client"))
            .unwrap();

        assert_eq!(fs.file("/work/app/client/src/main.tsx").as_deref(), Some("main"));
        assert!(fs.is_dir(Path::new("/work/app/client/src")));
        assert!(fs.file("/work/app/nx.json").is_none());
    }

    #[test]
    fn remove_dir_all_removes_nested_entries() {
        let fs = MemoryFilesystem::new().with_file("/work/app/a/b.txt", "x");
        fs.remove_dir_all(Path::new("/work/app")).unwrap();
        assert!(!fs.exists(Path::new("/work/app")));
        assert!(!fs.exists(Path::new("/work/app/a")));
        assert!(fs.exists(Path::new("/work")));
    }

    #[test]
    fn denied_writes_fail() {
        let fs = MemoryFilesystem::new();
        fs.deny_writes_under("/work/app/client");
        fs.write_file(Path::new("/work/app/README.md"), "ok").unwrap();
        assert!(fs
            .write_file(Path::new("/work/app/client/Dockerfile"), "no")
            .is_err());
    }

    #[test]
    fn reads_do_not_count_as_mutations() {
        let fs = MemoryFilesystem::new().with_file("/a.txt", "x");
        let _ = fs.read_file(Path::new("/a.txt"));
        let _ = fs.exists(Path::new("/a.txt"));
        assert_eq!(fs.mutation_count(), 0);
        fs.write_file(Path::new("/b.txt"), "y").unwrap();
        assert_eq!(fs.mutation_count(), 1);
    }
}
