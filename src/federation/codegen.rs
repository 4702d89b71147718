//! Build-lifecycle plugins and the generated environment module.

use crate::config::EnvMap;
use crate::error::{FedconfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the environment module generator.
pub const GENERATE_ENVIRONMENT: &str = "generate-environment";

/// A plugin that runs at bundler lifecycle hook points.
pub trait LifecyclePlugin: std::fmt::Debug {
    /// Plugin name.
    fn name(&self) -> &str;

    /// Hook invoked while the bundler resolves its options.
    fn options(&self) -> Result<()>;
}

/// Run the option-resolution hook of every plugin, in order.
pub fn run_options_hooks(plugins: &[Box<dyn LifecyclePlugin>]) -> Result<()> {
    for plugin in plugins {
        tracing::debug!("Running options hook of {}", plugin.name());
        plugin.options()?;
    }
    Ok(())
}

/// Writes the resolved environment as `src/environment.<ext>`.
///
/// The file holds a single default export of the environment as pretty JSON.
/// It is overwritten on every run.
#[derive(Debug, Clone)]
pub struct GenerateEnvironment {
    path: PathBuf,
    env: EnvMap,
}

impl GenerateEnvironment {
    /// Generator for `<project_root>/src/environment.ts`.
    pub fn new(project_root: &Path, env: EnvMap) -> Self {
        Self {
            path: Self::module_path(project_root, "ts"),
            env,
        }
    }

    /// Use a different file extension (e.g. `js`).
    pub fn with_extension(mut self, ext: &str) -> Self {
        self.path.set_extension(ext);
        self
    }

    /// Path of the generated module.
    pub fn module_path(project_root: &Path, ext: &str) -> PathBuf {
        project_root.join("src").join(format!("environment.{}", ext))
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the module source.
    pub fn render(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.env)
            .map_err(|e| FedconfError::Other(e.into()))?;
        Ok(format!("export default {};", json))
    }

    /// Write the module, creating `src/` if needed.
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.render()?)?;
        tracing::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

impl LifecyclePlugin for GenerateEnvironment {
    fn name(&self) -> &str {
        GENERATE_ENVIRONMENT
    }

    fn options(&self) -> Result<()> {
        self.write()
    }
}
