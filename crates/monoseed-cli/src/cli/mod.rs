//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use monoseed_core::domain::{Bundler, PackageManager, Strategy};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand the top-level arguments create a project, so
/// `monoseed demo-app` and `monoseed --yes` work directly.
#[derive(Debug, Parser)]
#[command(
    name     = "monoseed",
    bin_name = "monoseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a NestJS + React monorepo managed by Nx",
    long_about = "monoseed creates a full-stack Nx workspace with a NestJS server \
                  and a React client, either by copying a packaged template or by \
                  running the Nx generators step by step.",
    after_help = "EXAMPLES:\n\
        \x20 monoseed demo-app\n\
        \x20 monoseed demo-app --yes --no-install\n\
        \x20 monoseed demo-app --strategy generator --package-manager pnpm --bundler vite\n\
        \x20 monoseed package --source ./reference --output ./template\n\
        \x20 monoseed completions bash > ~/.local/share/bash-completion/completions/monoseed",
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project creation arguments, used when no subcommand is given.
    #[command(flatten)]
    pub create: CreateArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the distributable template from a reference workspace.
    #[command(
        about = "Package the static template",
        after_help = "EXAMPLES:\n\
            \x20 monoseed package --source ./reference\n\
            \x20 monoseed package --source ./reference --output ./dist/template"
    )]
    Package(PackageArgs),

    /// Write the default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 monoseed init\n\
            \x20 monoseed init --force"
    )]
    Init(InitArgs),

    /// Inspect the resolved configuration.
    #[command(about = "Configuration management", subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 monoseed completions bash > ~/.local/share/bash-completion/completions/monoseed\n\
            \x20 monoseed completions zsh  > ~/.zfunc/_monoseed\n\
            \x20 monoseed completions fish > ~/.config/fish/completions/monoseed.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for creating a project.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Project name: lowercase letters, digits, and hyphens.
    #[arg(value_name = "NAME", help = "Project name (prompted for when omitted)")]
    pub name: Option<String>,

    /// Accept defaults for everything that is not given as a flag.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,

    /// Do not install dependencies after scaffolding.
    #[arg(long = "no-install", help = "Skip the dependency install")]
    pub no_install: bool,

    #[arg(
        short = 's',
        long = "strategy",
        value_enum,
        value_name = "STRATEGY",
        help = "How to build the workspace"
    )]
    pub strategy: Option<StrategyArg>,

    #[arg(
        short = 'p',
        long = "package-manager",
        value_enum,
        value_name = "PM",
        help = "Package manager for the workspace"
    )]
    pub package_manager: Option<PackageManagerArg>,

    #[arg(
        short = 'b',
        long = "bundler",
        value_enum,
        value_name = "BUNDLER",
        help = "Bundler for the client app"
    )]
    pub bundler: Option<BundlerArg>,

    #[arg(long = "no-docker", help = "Do not write Docker files")]
    pub no_docker: bool,

    #[arg(long = "no-tests", help = "Generate apps without unit test runners")]
    pub no_tests: bool,

    /// Packaged template location for the static strategy.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Packaged template directory"
    )]
    pub template_dir: Option<PathBuf>,

    #[arg(long = "nx-version", value_name = "VERSION", help = "Pin create-nx-workspace")]
    pub nx_version: Option<String>,

    #[arg(long = "nest-plugin-version", value_name = "VERSION", help = "Pin @nx/nest")]
    pub nest_plugin_version: Option<String>,

    #[arg(long = "react-plugin-version", value_name = "VERSION", help = "Pin @nx/react")]
    pub react_plugin_version: Option<String>,
}

// ── package ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Reference workspace to package.
    #[arg(long = "source", value_name = "DIR", help = "Reference workspace")]
    pub source: PathBuf,

    /// Where the packaged template is written.
    #[arg(
        long = "output",
        value_name = "DIR",
        default_value = "template",
        help = "Output directory"
    )]
    pub output: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration as TOML.
    Show,
    /// Print the path of the configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Copy the packaged template.
    Static,
    /// Run the Nx generators.
    Generator,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Static => Self::StaticCopy,
            StrategyArg::Generator => Self::GeneratorPipeline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Yarn => Self::Yarn,
            PackageManagerArg::Pnpm => Self::Pnpm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BundlerArg {
    Vite,
    Webpack,
}

impl From<BundlerArg> for Bundler {
    fn from(arg: BundlerArg) -> Self {
        match arg {
            BundlerArg::Vite => Self::Vite,
            BundlerArg::Webpack => Self::Webpack,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
