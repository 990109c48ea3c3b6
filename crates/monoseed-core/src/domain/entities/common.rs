use super::DomainError;
use std::fmt;
use std::path::{Path, PathBuf};

/// A path inside the project tree, guaranteed to be relative to its root.
///
/// Invariant: Never absolute. Enforced at construction, so a rule or file set
/// entry can never reach outside the directory it is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Build from a compile-time literal.
    ///
    /// # Panics
    /// Panics if the literal is absolute (use `try_new` for runtime input).
    pub fn from_static(path: &'static str) -> Self {
        assert!(
            !Path::new(path).is_absolute(),
            "RelativePath cannot be absolute: {path:?}"
        );
        Self(PathBuf::from(path))
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Resolve against a root directory.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_absolute() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("client/vite.config.ts").is_ok());
    }

    #[test]
    fn resolve_joins_root() {
        let p = RelativePath::from_static("client/vite.config.ts");
        assert_eq!(
            p.resolve(Path::new("/work/demo")),
            PathBuf::from("/work/demo/client/vite.config.ts")
        );
    }
}
