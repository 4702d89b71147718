//! Per-directory env file loading for a mode.
//!
//! For directory `D` and mode `M` the files below are read in increasing
//! priority (later files override earlier ones per key):
//!
//! 1. `D/.env`
//! 2. `D/.env.local`
//! 3. `D/.env.M`
//! 4. `D/.env.M.local`
//!
//! Values are expanded, then only `VITE_`-prefixed keys are kept.
//! Prefixed variables already present in the process environment snapshot
//! take precedence over file values.

use super::expand::expand_all;
use super::{EnvFileParser, EnvMap};
use crate::error::{FedconfError, Result};
use std::path::{Path, PathBuf};

/// Prefix identifying bundler-scoped variables.
pub const DEFAULT_PREFIX: &str = "VITE_";

/// A source of per-directory environment variables.
///
/// [`ModeEnvLoader`] reads env files from disk; tests and embedders can
/// supply their own implementation.
pub trait EnvSource {
    /// Load the environment defined in `dir` for `mode`.
    fn load(&self, mode: &str, dir: &Path) -> Result<EnvMap>;
}

/// Reject mode names that cannot select env files.
pub fn validate_mode(mode: &str) -> Result<()> {
    if mode.is_empty() || mode == "local" {
        return Err(FedconfError::InvalidMode {
            mode: mode.to_string(),
        });
    }
    Ok(())
}

/// Env file paths for `mode` in `dir`, lowest priority first.
pub fn env_files_for_mode(mode: &str, dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join(".env"),
        dir.join(".env.local"),
        dir.join(format!(".env.{}", mode)),
        dir.join(format!(".env.{}.local", mode)),
    ]
}

/// Loads env files following the bundler's mode convention.
///
/// # Example
///
/// ```
/// use fedconf::config::{EnvSource, ModeEnvLoader};
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// std::fs::write(temp.path().join(".env"), "VITE_SHELL=localhost:3000\nSECRET=x").unwrap();
/// std::fs::write(temp.path().join(".env.production"), "VITE_SHELL=shell.example.com:443").unwrap();
///
/// let loader = ModeEnvLoader::new();
/// let env = loader.load("production", temp.path()).unwrap();
/// assert_eq!(env.get("VITE_SHELL").map(String::as_str), Some("shell.example.com:443"));
/// assert!(!env.contains_key("SECRET"));
/// ```
#[derive(Debug, Clone)]
pub struct ModeEnvLoader {
    prefixes: Vec<String>,
    process_env: Option<EnvMap>,
}

impl Default for ModeEnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeEnvLoader {
    /// Create a loader with the default prefix and no process environment.
    pub fn new() -> Self {
        Self {
            prefixes: vec![DEFAULT_PREFIX.to_string()],
            process_env: None,
        }
    }

    /// Create a loader that snapshots the current process environment.
    pub fn from_process() -> Self {
        Self::new().with_process_env(std::env::vars().collect())
    }

    /// Use the given process environment snapshot.
    pub fn with_process_env(mut self, env: EnvMap) -> Self {
        self.process_env = Some(env);
        self
    }

    fn is_exposed(&self, key: &str) -> bool {
        self.prefixes.iter().any(|prefix| key.starts_with(prefix))
    }
}

impl EnvSource for ModeEnvLoader {
    fn load(&self, mode: &str, dir: &Path) -> Result<EnvMap> {
        validate_mode(mode)?;

        let mut parsed = EnvMap::new();
        for path in env_files_for_mode(mode, dir) {
            let vars = EnvFileParser::load_optional(&path)?;
            if !vars.is_empty() {
                tracing::debug!("Loaded {} variables from {}", vars.len(), path.display());
            }
            parsed.extend(vars);
        }

        let expanded = expand_all(&parsed, self.process_env.as_ref());

        let mut env: EnvMap = expanded
            .into_iter()
            .filter(|(key, _)| self.is_exposed(key))
            .collect();

        if let Some(process_env) = &self.process_env {
            for (key, value) in process_env {
                if self.is_exposed(key) {
                    env.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(env)
    }
}
