//! Environment resolution across the directory tree.
//!
//! The "global" environment comes from the nearest ancestor of the project
//! directory that defines more than one variable for the mode. The "local"
//! environment comes from the project directory itself and overrides the
//! global one per key.
//!
//! Resolution is pure; copying the result into the process environment is
//! a separate step, [`apply_to_process_environment`].

use super::loader::{validate_mode, EnvSource};
use super::{EnvLayer, EnvLayerStack, EnvMap};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Which layer supplied a resolved variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvScope {
    /// From the nearest qualifying ancestor directory.
    Global,
    /// From the project directory.
    Local,
}

impl std::fmt::Display for EnvScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// The merged environment for one configuration evaluation.
#[derive(Debug, Clone)]
pub struct ResolvedEnvironment {
    /// Mode the environment was loaded for.
    pub mode: String,
    /// Absolute project directory.
    pub project_dir: PathBuf,
    /// Ancestor directory the global layer came from, if any qualified.
    pub global_dir: Option<PathBuf>,
    /// Merged variables (local wins on collision).
    pub merged: EnvMap,
    layers: EnvLayerStack,
}

impl ResolvedEnvironment {
    /// The global (ancestor) layer.
    pub fn global(&self) -> &EnvLayer {
        &self.layers.layers()[0]
    }

    /// The local (project directory) layer.
    pub fn local(&self) -> &EnvLayer {
        &self.layers.layers()[1]
    }

    /// Which layer supplied `key` in the merged map.
    pub fn scope_of(&self, key: &str) -> Option<EnvScope> {
        if self.local().contains(key) {
            Some(EnvScope::Local)
        } else if self.global().contains(key) {
            Some(EnvScope::Global)
        } else {
            None
        }
    }

    /// Source label (directory) of the layer that supplied `key`.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.layers.source_of(key)
    }
}

/// Resolve the merged environment for `mode`, starting at `start_dir`.
///
/// Walks upward from `start_dir` one parent at a time, stopping at the first
/// ancestor whose environment has more than one entry. Reaching the
/// filesystem root yields an empty global layer. The local environment of
/// `start_dir` is then overlaid on top.
///
/// # Example
///
/// ```
/// use fedconf::config::{resolve_environment, ModeEnvLoader};
/// use tempfile::TempDir;
///
/// let root = TempDir::new().unwrap();
/// std::fs::write(
///     root.path().join(".env"),
///     "VITE_SHELL=localhost:3000\nVITE_AUTH=localhost:3001",
/// ).unwrap();
/// let project = root.path().join("shell");
/// std::fs::create_dir(&project).unwrap();
/// std::fs::write(project.join(".env"), "VITE_AUTH=localhost:4001").unwrap();
///
/// let resolved = resolve_environment("development", &project, &ModeEnvLoader::new()).unwrap();
/// assert_eq!(resolved.merged["VITE_SHELL"], "localhost:3000");
/// assert_eq!(resolved.merged["VITE_AUTH"], "localhost:4001");
/// ```
pub fn resolve_environment(
    mode: &str,
    start_dir: &Path,
    source: &dyn EnvSource,
) -> Result<ResolvedEnvironment> {
    validate_mode(mode)?;

    let project_dir = absolute_dir(start_dir)?;
    let (global_dir, global_vars) = find_global_env(mode, &project_dir, source)?;
    let local_vars = source.load(mode, &project_dir)?;

    let global_source = global_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();

    let mut layers = EnvLayerStack::new();
    layers.push(EnvLayer::from_vars(global_source, global_vars));
    layers.push(EnvLayer::from_vars(
        project_dir.display().to_string(),
        local_vars,
    ));
    let merged = layers.resolve();

    tracing::debug!(
        "Resolved {} variables for mode '{}' ({} global, {} local)",
        merged.len(),
        mode,
        layers.layers()[0].len(),
        layers.layers()[1].len()
    );

    Ok(ResolvedEnvironment {
        mode: mode.to_string(),
        project_dir,
        global_dir,
        merged,
        layers,
    })
}

/// Find the nearest ancestor defining more than one variable.
fn find_global_env(
    mode: &str,
    start: &Path,
    source: &dyn EnvSource,
) -> Result<(Option<PathBuf>, EnvMap)> {
    let mut current = start;

    loop {
        let Some(parent) = current.parent() else {
            tracing::debug!("No ancestor of {} defines a global env", start.display());
            return Ok((None, EnvMap::new()));
        };

        let env = source.load(mode, parent)?;
        if env.len() > 1 {
            tracing::debug!("Using global env from {}", parent.display());
            return Ok((Some(parent.to_path_buf()), env));
        }

        current = parent;
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    match dir.canonicalize() {
        Ok(path) => Ok(path),
        Err(_) => Ok(std::path::absolute(dir)?),
    }
}

/// Copy every variable into the process environment.
///
/// Existing variables with the same name are overwritten. This is a one-way
/// change for the lifetime of the process; nothing is restored afterwards.
pub fn apply_to_process_environment(env: &EnvMap) {
    for (key, value) in env {
        std::env::set_var(key, value);
    }
    tracing::debug!("Applied {} variables to the process environment", env.len());
}
