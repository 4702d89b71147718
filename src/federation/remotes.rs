//! Remote-module derivation from the resolved environment.
//!
//! The project's own variable is `VITE_<IDENTIFIER>`, where the identifier
//! is the upper-cased last segment of the project directory. Its value is
//! the project's serving URL; the port is taken from the segment after the
//! last `:`. Every other `VITE_*` variable, except the reserved mode and
//! port keys, becomes a remote named after the lower-cased key suffix.

use super::warning::ConfigWarning;
use crate::config::{EnvMap, DEFAULT_PREFIX};
use crate::error::{FedconfError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of a federation remote's entry module.
pub const REMOTE_ENTRY: &str = "remoteEntry.js";

/// Keys that are never turned into remotes.
pub const EXCLUDED_KEYS: &[&str] = &["VITE_MODE", "VITE_PORT"];

/// Share scope assigned to derived remotes.
pub const DEFAULT_SHARE_SCOPE: &str = "default";

fn default_remote_type() -> String {
    "module".to_string()
}

fn default_share_scope() -> String {
    DEFAULT_SHARE_SCOPE.to_string()
}

/// An independently served federation module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDescriptor {
    /// Remote module format
    #[serde(rename = "type", default = "default_remote_type")]
    pub remote_type: String,

    /// Remote name
    pub name: String,

    /// URL of the remote's entry module
    pub entry: String,

    /// Global name the entry registers under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_global_name: Option<String>,

    /// Share scope for shared dependency singletons
    #[serde(default = "default_share_scope")]
    pub share_scope: String,
}

impl RemoteDescriptor {
    /// Build a descriptor for a remote served at `base_url`.
    ///
    /// ```
    /// use fedconf::federation::RemoteDescriptor;
    ///
    /// let remote = RemoteDescriptor::module("auth", "localhost:3001");
    /// assert_eq!(remote.entry, "localhost:3001/remoteEntry.js");
    /// assert_eq!(remote.entry_global_name.as_deref(), Some("auth"));
    /// ```
    pub fn module(name: &str, base_url: &str) -> Self {
        Self {
            remote_type: default_remote_type(),
            name: name.to_string(),
            entry: format!("{}/{}", base_url, REMOTE_ENTRY),
            entry_global_name: Some(name.to_string()),
            share_scope: default_share_scope(),
        }
    }
}

/// A remote as a caller may write it: a bare entry URL or a full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RemoteSpec {
    /// Entry URL
    Url(String),
    /// Full descriptor
    Descriptor(RemoteDescriptor),
}

impl From<RemoteDescriptor> for RemoteSpec {
    fn from(descriptor: RemoteDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

/// Remote name to descriptor.
pub type RemoteMap = BTreeMap<String, RemoteDescriptor>;

/// Result of remote derivation.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedRemotes {
    /// Port this project serves on (0 if the URL has no valid port).
    pub port: u16,
    /// This project's serving URL.
    pub url: String,
    /// Remotes derived from the other variables.
    pub remotes: RemoteMap,
    /// Findings collected while deriving.
    #[serde(skip)]
    pub warnings: Vec<ConfigWarning>,
}

/// Upper-cased last segment of the project directory.
pub fn project_identifier(project_dir: &Path) -> Result<String> {
    project_dir
        .file_name()
        .map(|name| name.to_string_lossy().to_uppercase())
        .ok_or_else(|| FedconfError::InvalidProjectDir {
            path: project_dir.to_path_buf(),
        })
}

/// Parse the port from the segment after the last `:`.
///
/// Leading digits are used (`localhost:3000/app` is 3000). A segment
/// without digits, or a value that does not fit a port, yields 0.
pub fn parse_port(url: &str) -> u16 {
    let segment = url.rsplit(':').next().unwrap_or_default().trim_start();
    let digits_end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());

    segment[..digits_end].parse().unwrap_or(0)
}

/// Derive this project's port/URL and its remotes from `env`.
///
/// # Errors
///
/// Returns `MissingProjectVariable` if `VITE_<self_identifier>` is absent.
///
/// # Example
///
/// ```
/// use fedconf::config::EnvMap;
/// use fedconf::federation::derive_remotes;
///
/// let mut env = EnvMap::new();
/// env.insert("VITE_SHELL".into(), "localhost:3000".into());
/// env.insert("VITE_AUTH".into(), "localhost:3001".into());
///
/// let derived = derive_remotes(&env, "SHELL").unwrap();
/// assert_eq!(derived.port, 3000);
/// assert_eq!(derived.remotes["auth"].entry, "localhost:3001/remoteEntry.js");
/// ```
pub fn derive_remotes(env: &EnvMap, self_identifier: &str) -> Result<DerivedRemotes> {
    let self_key = format!("{}{}", DEFAULT_PREFIX, self_identifier);
    let url = env
        .get(&self_key)
        .ok_or_else(|| FedconfError::MissingProjectVariable {
            identifier: self_identifier.to_string(),
            key: self_key.clone(),
        })?
        .clone();

    let mut warnings = Vec::new();

    let port = parse_port(&url);
    if port == 0 {
        warnings.push(ConfigWarning::InvalidPort { url: url.clone() });
    }

    let mut remotes = RemoteMap::new();
    for (key, value) in env {
        let Some(suffix) = key.strip_prefix(DEFAULT_PREFIX) else {
            continue;
        };
        if EXCLUDED_KEYS.contains(&key.as_str()) {
            continue;
        }

        let name = suffix.to_lowercase();
        if *key == self_key {
            warnings.push(ConfigWarning::SelfReference {
                name: name.clone(),
                key: key.clone(),
            });
        }

        let descriptor = RemoteDescriptor::module(&name, value);
        if remotes.insert(name.clone(), descriptor).is_some() {
            warnings.push(ConfigWarning::DuplicateRemote {
                name,
                key: key.clone(),
            });
        }
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(DerivedRemotes {
        port,
        url,
        remotes,
        warnings,
    })
}
