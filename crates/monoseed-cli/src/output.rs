//! Output management and formatting.
//!
//! [`OutputManager`] prints user-facing lines; [`TerminalProgress`] is the
//! CLI's implementation of the core `Progress` port.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use monoseed_core::{
    application::{InstallStatus, Progress, ScaffoldReport},
    domain::{OutputMode, PackageManager},
};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    interactive: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            interactive: io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.mark("\u{2713}", msg, Tone::Green))
    }

    /// Warning indicator: `⚠ <msg>`.  Not suppressed in quiet mode.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        Term::stderr().write_line(&self.mark("\u{26a0}", msg, Tone::Yellow))
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.mark("\u{2139}", msg, Tone::Blue))
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// The summary printed after a successful run.
    pub fn next_steps(&self, report: &ScaffoldReport, package_manager: PackageManager) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let name = project_dir_name(&report.project_root);
        self.print("")?;
        self.success(&format!("Project '{name}' created at {}", report.project_root.display()))?;
        self.print("")?;
        self.header("Next steps:")?;
        for line in next_step_lines(&name, &report.install, package_manager) {
            self.print(&format!("  {line}"))?;
        }
        self.print("")
    }

    /// Progress sink wired to this output.
    pub fn progress(&self) -> Arc<TerminalProgress> {
        Arc::new(TerminalProgress {
            output: self.clone(),
            spinner: Mutex::new(None),
        })
    }

    fn mark(&self, symbol: &str, msg: &str, tone: Tone) -> String {
        if self.no_color {
            return format!("{symbol} {msg}");
        }
        match tone {
            Tone::Green => format!("{} {}", symbol.green().bold(), msg.green()),
            Tone::Yellow => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Tone::Red => format!("{} {}", symbol.red().bold(), msg.red()),
            Tone::Blue => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Green,
    Yellow,
    Red,
    Blue,
}

/// The commands shown after success: enter the project, install if that
/// did not happen, then start the dev servers.
pub fn next_step_lines(name: &str, install: &InstallStatus, pm: PackageManager) -> Vec<String> {
    let mut lines = vec![format!("cd {name}")];
    if !matches!(install, InstallStatus::Installed { .. }) {
        lines.push(pm.install_command());
    }
    lines.push(pm.run_script("dev"));
    lines
}

fn project_dir_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

// ── Progress port ─────────────────────────────────────────────────────────────

/// Spinner for captured phases; a plain header for phases whose child
/// output streams to the terminal, so the two never interleave.
#[derive(Debug)]
pub struct TerminalProgress {
    output: OutputManager,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut s| s.take())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Progress for TerminalProgress {
    fn begin(&self, message: &str, mode: OutputMode) {
        if let Some(previous) = self.take_spinner() {
            previous.finish_and_clear();
        }
        if self.output.quiet {
            return;
        }
        if mode == OutputMode::Capture && self.output.interactive {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(Self::spinner_style());
            spinner.set_message(message.to_string());
            spinner.enable_steady_tick(Duration::from_millis(80));
            if let Ok(mut slot) = self.spinner.lock() {
                *slot = Some(spinner);
            }
        } else {
            let _ = self.output.header(&format!("\u{25b6} {message}"));
        }
    }

    fn finish(&self, message: &str) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_and_clear();
        }
        let _ = self.output.success(message);
    }

    fn fail(&self, message: &str) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_and_clear();
        }
        let line = self.output.mark("\u{2717}", message, Tone::Red);
        let _ = Term::stderr().write_line(&line);
    }

    fn warn(&self, message: &str) {
        if let Some(spinner) = self.take_spinner() {
            spinner.suspend(|| {
                let _ = self.output.warning(message);
            });
            if let Ok(mut slot) = self.spinner.lock() {
                *slot = Some(spinner);
            }
            return;
        }
        let _ = self.output.warning(message);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use monoseed_core::domain::{PipelineOutcome, Strategy};
    use std::path::PathBuf;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn next_steps_include_install_when_skipped() {
        let lines = next_step_lines("demo-app", &InstallStatus::Skipped, PackageManager::Npm);
        assert_eq!(lines, ["cd demo-app", "npm install", "npm run dev"]);
    }

    #[test]
    fn next_steps_omit_install_after_success() {
        let installed = InstallStatus::Installed {
            elapsed: Duration::from_secs(3),
        };
        let lines = next_step_lines("demo-app", &installed, PackageManager::Yarn);
        assert_eq!(lines, ["cd demo-app", "yarn dev"]);
    }

    #[test]
    fn next_steps_after_failed_install_repeat_install() {
        let failed = InstallStatus::Failed {
            detail: "exit code 1".into(),
            recovery: "cd demo-app && pnpm install".into(),
        };
        let lines = next_step_lines("demo-app", &failed, PackageManager::Pnpm);
        assert!(lines.contains(&"pnpm install".to_string()));
    }

    #[test]
    fn quiet_manager_prints_nothing_but_succeeds() {
        let out = make_manager(true, true);
        let report = ScaffoldReport {
            project_root: PathBuf::from("/work/demo-app"),
            strategy: Strategy::StaticCopy,
            outcome: PipelineOutcome::empty(),
            rewrites: Default::default(),
            install: InstallStatus::Skipped,
        };
        assert!(out.next_steps(&report, PackageManager::Npm).is_ok());
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn no_color_marks_are_plain() {
        assert_eq!(make_manager(false, true).mark("!", "m", Tone::Red), "! m");
        assert_ne!(make_manager(false, false).mark("!", "m", Tone::Red), "! m");
    }

    #[test]
    fn progress_lifecycle_without_terminal() {
        let progress = make_manager(true, true).progress();
        progress.begin("Copying template files", OutputMode::Capture);
        progress.warn("careful");
        progress.finish("done");
        assert!(progress.take_spinner().is_none());
    }
}
