//! `monoseed config`: inspect the resolved configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let rendered = config
                .to_toml()
                .map_err(|e| CliError::config("failed to serialise configuration", e))?;
            output.print(rendered.trim_end())?;
        }
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }
    Ok(())
}
