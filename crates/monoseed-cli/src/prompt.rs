//! Interactive questions for `monoseed` without `--yes`.
//!
//! Built with `dialoguer` when the `interactive` feature is on. Without it,
//! or when stdin is not a terminal, every question resolves to its default.

use std::io::IsTerminal;

use monoseed_core::domain::ConfigOptions;

use crate::error::{CliError, CliResult};

/// Whether questions can be asked at all.
pub fn available() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal()
}

/// Ask for the project name. An empty answer cancels the run.
pub fn project_name(default: &str) -> CliResult<String> {
    if !available() {
        return Ok(default.to_string());
    }
    let answer = ask_name(default)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(CliError::Cancelled);
    }
    Ok(answer.to_string())
}

/// Ask for the four configuration choices, preselecting `defaults`.
///
/// `install_dependencies` is never asked; it comes from `--no-install` or
/// the configuration file.
pub fn options(defaults: ConfigOptions) -> CliResult<ConfigOptions> {
    if !available() {
        return Ok(defaults);
    }
    ask_options(defaults)
}

#[cfg(feature = "interactive")]
fn ask_name(default: &str) -> CliResult<String> {
    use dialoguer::{Input, theme::ColorfulTheme};
    use monoseed_core::domain::ProjectName;

    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project name")
        .default(default.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            ProjectName::parse(input.trim())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(map_prompt_error)
}

#[cfg(not(feature = "interactive"))]
fn ask_name(default: &str) -> CliResult<String> {
    Ok(default.to_string())
}

#[cfg(feature = "interactive")]
fn ask_options(defaults: ConfigOptions) -> CliResult<ConfigOptions> {
    use dialoguer::{Confirm, Select, theme::ColorfulTheme};
    use monoseed_core::domain::{Bundler, PackageManager};

    let theme = ColorfulTheme::default();

    let pm_index = PackageManager::ALL
        .iter()
        .position(|pm| *pm == defaults.package_manager)
        .unwrap_or(0);
    let package_manager = Select::with_theme(&theme)
        .with_prompt("Package manager")
        .items(&PackageManager::ALL.map(|pm| pm.as_str()))
        .default(pm_index)
        .interact_opt()
        .map_err(map_prompt_error)?
        .map(|i| PackageManager::ALL[i])
        .ok_or(CliError::Cancelled)?;

    let bundler_index = Bundler::ALL
        .iter()
        .position(|b| *b == defaults.bundler)
        .unwrap_or(0);
    let bundler = Select::with_theme(&theme)
        .with_prompt("Client bundler")
        .items(&Bundler::ALL.map(|b| b.as_str()))
        .default(bundler_index)
        .interact_opt()
        .map_err(map_prompt_error)?
        .map(|i| Bundler::ALL[i])
        .ok_or(CliError::Cancelled)?;

    let add_container_config = Confirm::with_theme(&theme)
        .with_prompt("Add Docker configuration?")
        .default(defaults.add_container_config)
        .interact_opt()
        .map_err(map_prompt_error)?
        .ok_or(CliError::Cancelled)?;

    let add_test_config = Confirm::with_theme(&theme)
        .with_prompt("Add unit test configuration?")
        .default(defaults.add_test_config)
        .interact_opt()
        .map_err(map_prompt_error)?
        .ok_or(CliError::Cancelled)?;

    Ok(ConfigOptions {
        package_manager,
        bundler,
        add_container_config,
        add_test_config,
        ..defaults
    })
}

#[cfg(not(feature = "interactive"))]
fn ask_options(defaults: ConfigOptions) -> CliResult<ConfigOptions> {
    Ok(defaults)
}

/// Ctrl-C at a prompt is a cancellation, not a failure.
#[cfg(feature = "interactive")]
fn map_prompt_error(err: dialoguer::Error) -> CliError {
    let err = std::io::Error::from(err);
    if err.kind() == std::io::ErrorKind::Interrupted {
        return CliError::Cancelled;
    }
    CliError::IoError {
        message: "failed to read prompt answer".into(),
        source: err,
    }
}
