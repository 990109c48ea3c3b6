//! Template Repository - the static template tree on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{RelativePath, TemplateFileSet},
    error::MonoseedResult,
};

/// Which file set entries a copy produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<RelativePath>,
    /// Whitelisted entries absent from the source.
    pub skipped: Vec<RelativePath>,
    /// Files synthesized rather than copied.
    pub written: Vec<RelativePath>,
}

/// Read access to a packaged template rooted at one directory.
pub struct TemplateRepository {
    filesystem: Arc<dyn Filesystem>,
    root: PathBuf,
    file_set: TemplateFileSet,
}

impl TemplateRepository {
    pub fn new(filesystem: Arc<dyn Filesystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            root: root.into(),
            file_set: TemplateFileSet::packaged(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fails with `TemplateMissing` unless the root is a directory.
    pub fn ensure_available(&self) -> MonoseedResult<()> {
        if self.filesystem.is_dir(&self.root) {
            Ok(())
        } else {
            Err(ApplicationError::TemplateMissing {
                path: self.root.clone(),
            }
            .into())
        }
    }

    /// Copy every present file set entry into `target`, creating it.
    #[instrument(skip(self), fields(template = %self.root.display(), target = %target.display()))]
    pub fn copy_to(&self, target: &Path) -> MonoseedResult<CopyReport> {
        self.ensure_available()?;
        self.filesystem.create_dir_all(target)?;

        let mut report = CopyReport::default();
        for entry in self.file_set.entries() {
            let from = entry.source.resolve(&self.root);
            if !self.filesystem.exists(&from) {
                debug!(entry = %entry.source, "Template entry absent, skipping");
                report.skipped.push(entry.source.clone());
                continue;
            }
            self.filesystem
                .copy_tree(&from, &entry.target.resolve(target))?;
            report.copied.push(entry.target.clone());
        }

        info!(
            copied = report.copied.len(),
            skipped = report.skipped.len(),
            "Template copied"
        );
        Ok(report)
    }
}
