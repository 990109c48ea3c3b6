//! `monoseed package`: build the static template from a reference workspace.

use std::sync::Arc;

use tracing::{info, instrument};

use monoseed_adapters::LocalFilesystem;
use monoseed_core::application::TemplatePackager;

use crate::{cli::PackageArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(source = %args.source.display(), output = %args.output.display()))]
pub fn execute(args: PackageArgs, output: OutputManager) -> CliResult<()> {
    let packager = TemplatePackager::new(Arc::new(LocalFilesystem::new()));

    output.header(&format!(
        "Packaging {} into {}",
        args.source.display(),
        args.output.display()
    ))?;
    let report = packager.package(&args.source, &args.output)?;
    info!(copied = report.copied.len(), skipped = report.skipped.len(), "Packaging finished");

    for entry in &report.skipped {
        output.info(&format!("skipped {entry} (not in reference workspace)"))?;
    }
    output.success(&format!(
        "Template written to {} ({} entries, {} generated)",
        args.output.display(),
        report.copied.len(),
        report.written.len()
    ))?;
    Ok(())
}
