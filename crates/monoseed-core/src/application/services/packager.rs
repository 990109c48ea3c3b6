//! Template Packager - builds the static template from a reference workspace.
//!
//! Offline and re-runnable: every whitelisted target entry is removed before
//! it is copied again, so two runs over the same workspace produce the same
//! tree.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::CopyReport},
    domain::{
        RelativePath, TemplateFileSet,
        entities::file_set::{IGNORE_FILE, TEMPLATE_IGNORE},
    },
    error::MonoseedResult,
};

pub struct TemplatePackager {
    filesystem: Arc<dyn Filesystem>,
    file_set: TemplateFileSet,
}

impl TemplatePackager {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            file_set: TemplateFileSet::standard(),
        }
    }

    #[instrument(skip(self), fields(source = %source.display(), output = %output.display()))]
    pub fn package(&self, source: &Path, output: &Path) -> MonoseedResult<CopyReport> {
        if !self.filesystem.is_dir(source) {
            return Err(ApplicationError::TemplateMissing {
                path: source.to_path_buf(),
            }
            .into());
        }
        self.filesystem.create_dir_all(output)?;

        let mut report = CopyReport::default();
        for entry in self.file_set.entries() {
            let from = entry.source.resolve(source);
            let to = entry.target.resolve(output);

            if self.filesystem.exists(&to) {
                debug!(entry = %entry.target, "Removing stale template entry");
                self.filesystem.remove_path(&to)?;
            }
            if !self.filesystem.exists(&from) {
                debug!(entry = %entry.source, "Not in reference workspace, skipping");
                report.skipped.push(entry.source.clone());
                continue;
            }
            self.filesystem.copy_tree(&from, &to)?;
            report.copied.push(entry.target.clone());
        }

        let ignore = RelativePath::from_static(IGNORE_FILE);
        self.filesystem
            .write_file(&ignore.resolve(output), TEMPLATE_IGNORE)?;
        report.written.push(ignore);

        info!(
            copied = report.copied.len(),
            skipped = report.skipped.len(),
            "Template packaged"
        );
        Ok(report)
    }
}
