//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ConfigArgs};
use crate::config::ModeEnvLoader;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    loader: ModeEnvLoader,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    ///
    /// Env files are loaded with a snapshot of the process environment.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            loader: ModeEnvLoader::from_process(),
        }
    }

    /// Use a specific env loader.
    pub fn with_loader(mut self, loader: ModeEnvLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let loader = self.loader.clone();

        match &cli.command {
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(root, args.clone())
                    .with_loader(loader)
                    .execute(ui)
            }
            Some(Commands::Env(args)) => super::env::EnvCommand::new(root, args.clone())
                .with_loader(loader)
                .execute(ui),
            Some(Commands::Remotes(args)) => {
                super::remotes::RemotesCommand::new(root, args.clone())
                    .with_loader(loader)
                    .execute(ui)
            }
            Some(Commands::Shared) => super::shared::SharedCommand::new(root).execute(ui),
            Some(Commands::Generate(args)) => {
                super::generate::GenerateCommand::new(root, args.clone())
                    .with_loader(loader)
                    .execute(ui)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand.execute(ui),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to config command with default args
                super::config::ConfigCommand::new(root, ConfigArgs::default())
                    .with_loader(loader)
                    .execute(ui)
            }
        }
    }
}
