//! `monoseed init`: write the default configuration file.

use tracing::info;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = AppConfig::config_path();

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default()
        .to_toml()
        .map_err(|e| CliError::config("failed to serialise default config", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .io_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(&config_path, &toml)
        .io_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    info!(path = %config_path.display(), "Configuration written");
    output.success(&format!("Configuration created at {}", config_path.display()))?;
    Ok(())
}
