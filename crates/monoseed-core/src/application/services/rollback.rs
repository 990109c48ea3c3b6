//! Rollback Manager - all-or-nothing project creation.
//!
//! [`RollbackManager::protect`] wraps the phase that creates and fills the
//! target directory. If that phase fails, the target is removed and the
//! original error is returned unchanged.
//!
//! Callers must check that the target does not exist *before* entering the
//! guard. The guard removes whatever is at the target path on failure.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Progress},
    },
    error::MonoseedResult,
};

pub struct RollbackManager {
    filesystem: Arc<dyn Filesystem>,
    progress: Arc<dyn Progress>,
}

impl RollbackManager {
    pub fn new(filesystem: Arc<dyn Filesystem>, progress: Arc<dyn Progress>) -> Self {
        Self {
            filesystem,
            progress,
        }
    }

    /// Run `phase`; on error remove `target` and propagate the error.
    pub fn protect<T>(
        &self,
        target: &Path,
        phase: impl FnOnce() -> MonoseedResult<T>,
    ) -> MonoseedResult<T> {
        match phase() {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(error = %e, "Scaffold failed, attempting rollback");
                if let Err(rollback_err) = self.rollback(target) {
                    self.progress.warn(&rollback_err.to_string());
                }
                Err(e)
            }
        }
    }

    /// Best-effort removal of a partially built project.
    #[instrument(skip(self), fields(path = %target.display()))]
    pub fn rollback(&self, target: &Path) -> Result<(), ApplicationError> {
        if !self.filesystem.exists(target) {
            info!("Nothing to roll back");
            return Ok(());
        }
        match self.filesystem.remove_dir_all(target) {
            Ok(()) => {
                info!("Rollback successful");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rollback failed");
                Err(ApplicationError::RollbackFailed {
                    path: target.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
