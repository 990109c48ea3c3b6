//! Flags accepted by `monoseed` itself and by every subcommand.

use clap::{ArgAction, Args};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Show more of what the scaffolder is doing.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Log more detail (-v phases, -vv step commands, -vvv everything)",
        long_help = "Log more detail to stderr. Without the flag only warnings \
                     and errors are logged. -v adds one line per phase (copy, \
                     rewrite, each generator, install), -vv adds the exact \
                     command line and working directory of every external \
                     step, -vvv adds trace output from every monoseed crate. \
                     RUST_LOG replaces this setting when present."
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only; generator output is still streamed"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Plain output without ANSI colors (also set by NO_COLOR)"
    )]
    pub no_color: bool,

    /// Overrides the platform config location shown by `monoseed config path`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read defaults from this TOML file"
    )]
    pub config: Option<PathBuf>,

    /// Appended to, never truncated.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Append JSON log lines to FILE (same level as stderr)"
    )]
    pub log_file: Option<PathBuf>,
}
