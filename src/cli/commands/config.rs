//! Config command implementation.
//!
//! The `fedconf config` command assembles the bundler configuration for the
//! project, writes the generated environment module and prints the result
//! as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{load_caller_config, ModeEnvLoader};
use crate::error::{FedconfError, Result};
use crate::federation::{ConfigEvaluation, GenerateEnvironment};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::report_warnings;

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    args: ConfigArgs,
    loader: ModeEnvLoader,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, args: ConfigArgs) -> Self {
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

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let caller = match load_caller_config(&self.project_root, self.args.config.as_deref()) {
            Ok(c) => c,
            Err(FedconfError::ConfigNotFound { path }) => {
                ui.error(&format!(
                    "No caller configuration found at {}. Create it with a `federation` section.",
                    path.display()
                ));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let ext = self.args.ext.as_str();
        let config = ConfigEvaluation::new(self.args.mode.as_str(), &self.project_root)
            .with_env_module_ext(ext)
            .define_config(&caller, &self.loader)?;

        report_warnings(ui, config.warnings());

        if !self.args.no_generate {
            config.run_lifecycle()?;
            let module = GenerateEnvironment::module_path(config.common.project_dir(), ext);
            ui.success(&format!("Wrote {}", module.display()));
        }

        let json = serde_json::to_string_pretty(&config.to_json())
            .map_err(|e| FedconfError::Other(e.into()))?;

        match &self.args.out {
            Some(path) => {
                fs::write(path, format!("{}\n", json))?;
                ui.success(&format!("Wrote {}", path.display()));
            }
            None => ui.message(&json),
        }

        Ok(CommandResult::success())
    }
}
