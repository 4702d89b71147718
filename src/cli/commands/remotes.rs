//! Remotes command implementation.
//!
//! The `fedconf remotes` command shows this project's serving port and URL
//! together with the remotes derived from the environment.

use std::path::{Path, PathBuf};

use crate::cli::args::RemotesArgs;
use crate::config::{resolve_environment, ModeEnvLoader};
use crate::error::{FedconfError, Result};
use crate::federation::{derive_remotes, project_identifier};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::report_warnings;

/// The remotes command implementation.
pub struct RemotesCommand {
    project_root: PathBuf,
    args: RemotesArgs,
    loader: ModeEnvLoader,
}

impl RemotesCommand {
    /// Create a new remotes command.
    pub fn new(project_root: &Path, args: RemotesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            loader: ModeEnvLoader::from_process(),
        }
    }

    /// Use a specific env loader.
    pub fn with_loader(mut self, loader: ModeEnvLoader) -> Self {
        self.loader = loader;
        self
    }
}

impl Command for RemotesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = resolve_environment(&self.args.mode, &self.project_root, &self.loader)?;
        let identifier = project_identifier(&resolved.project_dir)?;
        let derived = derive_remotes(&resolved.merged, &identifier)?;

        report_warnings(ui, &derived.warnings);

        let json =
            serde_json::to_string_pretty(&derived).map_err(|e| FedconfError::Other(e.into()))?;
        ui.message(&json);

        Ok(CommandResult::success())
    }
}
