//! Step Runner - sequential execution of external steps.
//!
//! Runs one step at a time, in the order given, and stops at the first
//! failure. The outcome is a value; callers branch on it.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{CommandRunner, Progress},
    domain::{PipelineOutcome, Step, StepResult},
};

pub struct StepRunner {
    runner: Arc<dyn CommandRunner>,
    progress: Arc<dyn Progress>,
}

impl StepRunner {
    pub fn new(runner: Arc<dyn CommandRunner>, progress: Arc<dyn Progress>) -> Self {
        Self { runner, progress }
    }

    /// Run `steps` in order, halting on the first failure.
    ///
    /// The returned outcome holds one result per step that actually ran.
    #[instrument(skip_all, fields(steps = steps.len()))]
    pub fn run_all(&self, steps: &[Step]) -> PipelineOutcome {
        let mut results = Vec::with_capacity(steps.len());

        for step in steps {
            let result = self.run_one(step);
            let failed = !result.succeeded;
            results.push(result);
            if failed {
                let skipped = steps.len() - results.len();
                if skipped > 0 {
                    info!(skipped, "Halting pipeline after failed step");
                }
                break;
            }
        }

        PipelineOutcome::from_results(results)
    }

    /// Run a single step and report it.
    pub fn run_one(&self, step: &Step) -> StepResult {
        debug!(
            step = %step.id,
            cwd = %step.cwd.display(),
            timeout_secs = step.timeout.as_secs(),
            command = %step.command_line(),
            "Running step"
        );
        self.progress.begin(step.id.label(), step.mode);

        let result = self.runner.run(step);

        if result.succeeded {
            info!(step = %step.id, elapsed_ms = result.elapsed.as_millis() as u64, "Step finished");
            self.progress.finish(step.id.label());
        } else {
            let detail = result.error_detail.as_deref().unwrap_or("step failed");
            warn!(step = %step.id, detail, "Step failed");
            self.progress.fail(&format!("{} failed", step.id.label()));
        }
        result
    }
}
