//! Shared command implementation.
//!
//! The `fedconf shared` command prints the shared-dependency map built from
//! the project's `package.json`.

use std::path::{Path, PathBuf};

use crate::config::Manifest;
use crate::error::{FedconfError, Result};
use crate::federation::shared_dependencies;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The shared command implementation.
pub struct SharedCommand {
    project_root: PathBuf,
}

impl SharedCommand {
    /// Create a new shared command.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl Command for SharedCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = Manifest::read(&self.project_root);
        let shared = shared_dependencies(&manifest.dependencies);

        let json =
            serde_json::to_string_pretty(&shared).map_err(|e| FedconfError::Other(e.into()))?;
        ui.message(&json);

        Ok(CommandResult::success())
    }
}
