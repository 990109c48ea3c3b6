//! Locating the packaged template on disk.
//!
//! Search order, first existing directory wins:
//! 1. An explicit path (`--template-dir` or configuration)
//! 2. `$MONOSEED_TEMPLATE_DIR`
//! 3. `./template` in the working directory
//! 4. `template/` next to the executable
//! 5. `../share/monoseed/template` relative to the executable

use std::path::{Path, PathBuf};

use tracing::debug;

pub const TEMPLATE_DIR_ENV: &str = "MONOSEED_TEMPLATE_DIR";

/// Where to look for a template, in priority order.
#[derive(Debug, Clone, Default)]
pub struct TemplateLocator {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    cwd: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
}

impl TemplateLocator {
    /// Locator populated from the process environment.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env: std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from),
            cwd: std::env::current_dir().ok(),
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }

    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_env(mut self, path: impl Into<PathBuf>) -> Self {
        self.env = Some(path.into());
        self
    }

    pub fn with_cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    pub fn with_exe_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.exe_dir = Some(path.into());
        self
    }

    /// Every candidate, in search order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        out.extend(self.explicit.clone());
        out.extend(self.env.clone());
        if let Some(cwd) = &self.cwd {
            out.push(cwd.join("template"));
        }
        if let Some(exe) = &self.exe_dir {
            out.push(exe.join("template"));
            out.push(exe.join("../share/monoseed/template"));
        }
        out
    }

    /// The first candidate that is a directory.
    ///
    /// An explicit path is returned even when missing, so the caller reports
    /// the path the user asked for instead of silently falling back.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }
        let found = self.candidates().into_iter().find(|p| p.is_dir());
        debug!(template = ?found, "Template lookup finished");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins_even_when_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("template")).unwrap();
        let locator = TemplateLocator::default()
            .with_explicit("/nowhere/template")
            .with_cwd(dir.path());
        assert_eq!(locator.locate(), Some(PathBuf::from("/nowhere/template")));
    }

    #[test]
    fn env_beats_working_directory() {
        let env = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir(cwd.path().join("template")).unwrap();

        let locator = TemplateLocator::default()
            .with_env(env.path())
            .with_cwd(cwd.path());
        assert_eq!(locator.locate(), Some(env.path().to_path_buf()));
    }

    #[test]
    fn falls_back_to_executable_directory() {
        let exe = TempDir::new().unwrap();
        std::fs::create_dir(exe.path().join("template")).unwrap();
        let locator = TemplateLocator::default()
            .with_cwd("/definitely/not/here")
            .with_exe_dir(exe.path());
        assert_eq!(locator.locate(), Some(exe.path().join("template")));
    }

    #[test]
    fn nothing_found() {
        let locator = TemplateLocator::default().with_cwd("/definitely/not/here");
        assert_eq!(locator.locate(), None);
        assert_eq!(locator.candidates().len(), 1);
    }
}
