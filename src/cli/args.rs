//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Default mode when `--mode` is not given.
pub const DEFAULT_MODE: &str = "development";

/// fedconf - Module-federation build configuration from env files and manifests.
#[derive(Debug, Parser)]
#[command(name = "fedconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Only print command output and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the assembled bundler configuration (default if no command specified)
    Config(ConfigArgs),

    /// Show the resolved environment and where each variable came from
    Env(EnvArgs),

    /// Show this project's port, URL and derived remotes
    Remotes(RemotesArgs),

    /// Show shared dependencies declared by package.json
    Shared,

    /// Write the generated environment module
    Generate(GenerateArgs),

    /// Print the JSON Schema of the caller configuration file
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Language of the generated environment module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModuleExt {
    #[default]
    Ts,
    Js,
}

impl ModuleExt {
    /// File extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Env mode (selects .env.<mode> files)
    #[arg(short, long, default_value = DEFAULT_MODE, env = "FEDCONF_MODE")]
    pub mode: String,

    /// Path to caller config (overrides fedconf.json / fedconf.yml discovery)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Skip writing the generated environment module
    #[arg(long)]
    pub no_generate: bool,

    /// Extension of the generated environment module
    #[arg(long, value_enum, default_value_t = ModuleExt::Ts)]
    pub ext: ModuleExt,
}

impl Default for ConfigArgs {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            config: None,
            out: None,
            no_generate: false,
            ext: ModuleExt::Ts,
        }
    }
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EnvArgs {
    /// Env mode (selects .env.<mode> files)
    #[arg(short, long, default_value = DEFAULT_MODE, env = "FEDCONF_MODE")]
    pub mode: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for EnvArgs {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            json: false,
        }
    }
}

/// Arguments for the `remotes` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RemotesArgs {
    /// Env mode (selects .env.<mode> files)
    #[arg(short, long, default_value = DEFAULT_MODE, env = "FEDCONF_MODE")]
    pub mode: String,
}

impl Default for RemotesArgs {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Env mode (selects .env.<mode> files)
    #[arg(short, long, default_value = DEFAULT_MODE, env = "FEDCONF_MODE")]
    pub mode: String,

    /// Extension of the generated environment module
    #[arg(long, value_enum, default_value_t = ModuleExt::Ts)]
    pub ext: ModuleExt,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            ext: ModuleExt::Ts,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
