//! Env command implementation.
//!
//! The `fedconf env` command shows the merged environment for a mode and
//! which layer each variable came from. The process environment is left
//! untouched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::EnvArgs;
use crate::config::{resolve_environment, EnvScope, ModeEnvLoader, ResolvedEnvironment};
use crate::error::{FedconfError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    project_root: PathBuf,
    args: EnvArgs,
    loader: ModeEnvLoader,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvReport<'a> {
    mode: &'a str,
    project_dir: &'a Path,
    global_dir: Option<&'a Path>,
    variables: BTreeMap<&'a str, EnvEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct EnvEntry<'a> {
    value: &'a str,
    scope: String,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(project_root: &Path, args: EnvArgs) -> Self {
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

    fn scope_label(resolved: &ResolvedEnvironment, key: &str) -> String {
        resolved
            .scope_of(key)
            .unwrap_or(EnvScope::Local)
            .to_string()
    }

    fn show_json(&self, resolved: &ResolvedEnvironment, ui: &mut dyn UserInterface) -> Result<()> {
        let variables = resolved
            .merged
            .iter()
            .map(|(key, value)| {
                let entry = EnvEntry {
                    value,
                    scope: Self::scope_label(resolved, key),
                };
                (key.as_str(), entry)
            })
            .collect();

        let report = EnvReport {
            mode: &resolved.mode,
            project_dir: &resolved.project_dir,
            global_dir: resolved.global_dir.as_deref(),
            variables,
        };

        let json =
            serde_json::to_string_pretty(&report).map_err(|e| FedconfError::Other(e.into()))?;
        ui.message(&json);
        Ok(())
    }

    fn show_text(&self, resolved: &ResolvedEnvironment, ui: &mut dyn UserInterface) {
        match &resolved.global_dir {
            Some(dir) => ui.message(&format!("# global: {}", dir.display())),
            None => ui.message("# global: (none)"),
        }
        ui.message(&format!("# local: {}", resolved.project_dir.display()));

        for (key, value) in &resolved.merged {
            ui.message(&format!(
                "{}={}  # {}",
                key,
                value,
                Self::scope_label(resolved, key)
            ));
        }
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolved = resolve_environment(&self.args.mode, &self.project_root, &self.loader)?;

        if self.args.json {
            self.show_json(&resolved, ui)?;
        } else {
            self.show_text(&resolved, ui);
        }

        Ok(CommandResult::success())
    }
}
