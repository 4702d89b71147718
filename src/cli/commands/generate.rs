//! Generate command implementation.
//!
//! The `fedconf generate` command resolves the environment and writes the
//! environment module without assembling the full bundler configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::GenerateArgs;
use crate::config::ModeEnvLoader;
use crate::error::Result;
use crate::federation::{run_options_hooks, ConfigEvaluation, GenerateEnvironment};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::report_warnings;

/// The generate command implementation.
pub struct GenerateCommand {
    project_root: PathBuf,
    args: GenerateArgs,
    loader: ModeEnvLoader,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(project_root: &Path, args: GenerateArgs) -> Self {
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

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ext = self.args.ext.as_str();
        let common = ConfigEvaluation::new(self.args.mode.as_str(), &self.project_root)
            .with_env_module_ext(ext)
            .common_config(&self.loader)?;

        report_warnings(ui, &common.warnings);
        run_options_hooks(&common.plugins)?;

        let module = GenerateEnvironment::module_path(common.project_dir(), ext);
        ui.success(&format!("Wrote {}", module.display()));

        Ok(CommandResult::success())
    }
}
