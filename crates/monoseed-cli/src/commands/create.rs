//! Project creation, the default command.
//!
//! Responsibility: resolve the name and options from flags, prompts, and
//! configuration, hand a `ProjectSpec` to the core materializer, and print
//! the result. No business logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use monoseed_adapters::{LocalFilesystem, ProcessRunner, TemplateLocator};
use monoseed_core::{
    application::WorkspaceMaterializer,
    domain::{ConfigOptions, ProjectName, ProjectSpec, Strategy, ToolVersions},
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: CreateArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Name: argument, default under --yes, otherwise prompt.
    let raw_name = match (&args.name, args.yes) {
        (Some(name), _) => name.clone(),
        (None, true) => ProjectName::DEFAULT.to_string(),
        (None, false) => prompt::project_name(ProjectName::DEFAULT)?,
    };
    let name = ProjectName::parse(raw_name)?;

    // 2. Options: flags over configuration, then prompts unless --yes.
    let mut options = resolve_options(&args, &config);
    if !args.yes {
        options = prompt::options(options)?;
    }
    let strategy = args
        .strategy
        .map(Strategy::from)
        .unwrap_or(config.defaults.strategy);

    let parent = std::env::current_dir().map_err(|e| CliError::IoError {
        message: "failed to read the current directory".into(),
        source: e,
    })?;
    let spec = ProjectSpec::new(name, &parent, strategy, options)?
        .with_versions(resolve_versions(&args, &config))
        .with_timeouts(config.timeouts.to_step_timeouts());

    debug!(
        strategy = %spec.strategy(),
        package_manager = %spec.options().package_manager,
        bundler = %spec.options().bundler,
        docker = spec.options().add_container_config,
        tests = spec.options().add_test_config,
        install = spec.options().install_dependencies,
        "Project spec resolved"
    );

    // 3. Wire adapters.
    let mut materializer = WorkspaceMaterializer::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(ProcessRunner::new()),
        output.progress(),
    );
    if strategy == Strategy::StaticCopy {
        let explicit = args.template_dir.clone().or_else(|| config.templates.dir.clone());
        materializer = materializer.with_template(locate_template(explicit)?);
    }

    // 4. Run.
    output.header(&format!("Creating '{}' in {}", spec.name(), parent.display()))?;
    info!(project = %spec.name(), target = %spec.target_path().display(), "Scaffold started");

    let report = materializer.materialize(&spec)?;

    info!(project = %spec.name(), install = ?report.install, "Scaffold finished");
    output.next_steps(&report, spec.options().package_manager)?;
    Ok(())
}

/// Configuration defaults with command-line flags applied on top.
fn resolve_options(args: &CreateArgs, config: &AppConfig) -> ConfigOptions {
    let defaults = &config.defaults;
    ConfigOptions {
        package_manager: args
            .package_manager
            .map(Into::into)
            .unwrap_or(defaults.package_manager),
        bundler: args.bundler.map(Into::into).unwrap_or(defaults.bundler),
        add_container_config: defaults.docker && !args.no_docker,
        add_test_config: defaults.tests && !args.no_tests,
        install_dependencies: defaults.install && !args.no_install,
    }
}

fn resolve_versions(args: &CreateArgs, config: &AppConfig) -> ToolVersions {
    let base = &config.versions;
    ToolVersions {
        nx: args.nx_version.clone().unwrap_or_else(|| base.nx.clone()),
        nest_plugin: args
            .nest_plugin_version
            .clone()
            .unwrap_or_else(|| base.nest_plugin.clone()),
        react_plugin: args
            .react_plugin_version
            .clone()
            .unwrap_or_else(|| base.react_plugin.clone()),
    }
}

fn locate_template(explicit: Option<PathBuf>) -> CliResult<PathBuf> {
    let locator = TemplateLocator::from_env(explicit);
    locator.locate().ok_or_else(|| CliError::ConfigError {
        message: format!(
            "no packaged template found (searched: {}); pass --template-dir, set {}, \
             or use --strategy generator",
            locator
                .candidates()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            monoseed_adapters::TEMPLATE_DIR_ENV,
        ),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BundlerArg, PackageManagerArg};
    use monoseed_core::domain::{Bundler, PackageManager};

    #[test]
    fn flags_override_configuration() {
        let args = CreateArgs {
            package_manager: Some(PackageManagerArg::Yarn),
            bundler: Some(BundlerArg::Webpack),
            no_docker: true,
            no_install: true,
            ..CreateArgs::default()
        };
        let options = resolve_options(&args, &AppConfig::default());
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert_eq!(options.bundler, Bundler::Webpack);
        assert!(!options.add_container_config);
        assert!(options.add_test_config);
        assert!(!options.install_dependencies);
    }

    #[test]
    fn configuration_supplies_unflagged_choices() {
        let mut config = AppConfig::default();
        config.defaults.package_manager = PackageManager::Pnpm;
        config.defaults.install = false;
        let options = resolve_options(&CreateArgs::default(), &config);
        assert_eq!(options.package_manager, PackageManager::Pnpm);
        assert!(!options.install_dependencies);
    }

    #[test]
    fn version_flags_pin_individually() {
        let args = CreateArgs {
            nx_version: Some("20.1.0".into()),
            ..CreateArgs::default()
        };
        let versions = resolve_versions(&args, &AppConfig::default());
        assert_eq!(versions.nx, "20.1.0");
        assert_eq!(versions.nest_plugin, "latest");
        assert_eq!(versions.react_plugin, "latest");
    }

    #[test]
    fn explicit_template_dir_is_used_as_given() {
        let path = PathBuf::from("/nowhere/template");
        assert_eq!(locate_template(Some(path.clone())).unwrap(), path);
    }
}
