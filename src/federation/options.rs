//! Federation plugin options.
//!
//! [`federation`] starts from the defaults (fixed entry filename, shared map
//! from the manifest) and lays the caller's fields on top. The overlay is
//! shallow: a caller-supplied `shared` or `filename` replaces the default
//! as a whole.

use super::remotes::{RemoteMap, RemoteSpec, REMOTE_ENTRY};
use super::shared::{shared_dependencies, SharedDependencyMap};
use crate::config::DependencyMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Remote name to caller-facing remote definition.
pub type RemoteSpecMap = BTreeMap<String, RemoteSpec>;

/// Caller-supplied federation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FederationConfig {
    /// Name this build is published under
    pub name: String,

    /// Modules this build exposes (public path to source file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposes: Option<BTreeMap<String, String>>,

    /// Entry filename (defaults to remoteEntry.js)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Shared dependencies; replaces the manifest-derived map when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<SharedDependencyMap>,

    /// Remotes; entries override derived remotes of the same name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remotes: Option<RemoteSpecMap>,
}

/// Options handed to the module-federation integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationOptions {
    pub name: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposes: Option<BTreeMap<String, String>>,
    pub shared: SharedDependencyMap,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub remotes: RemoteSpecMap,
}

/// Build federation options from caller settings and declared dependencies.
///
/// ```
/// use fedconf::config::DependencyMap;
/// use fedconf::federation::{federation, FederationConfig, REMOTE_ENTRY};
///
/// let mut deps = DependencyMap::new();
/// deps.insert("react".into(), "^18.0.0".into());
///
/// let config = FederationConfig { name: "shell".into(), ..Default::default() };
/// let options = federation(&config, &deps);
///
/// assert_eq!(options.filename, REMOTE_ENTRY);
/// assert!(options.shared["react"].singleton);
/// ```
pub fn federation(config: &FederationConfig, dependencies: &DependencyMap) -> FederationOptions {
    FederationOptions {
        name: config.name.clone(),
        filename: config
            .filename
            .clone()
            .unwrap_or_else(|| REMOTE_ENTRY.to_string()),
        exposes: config.exposes.clone(),
        shared: config
            .shared
            .clone()
            .unwrap_or_else(|| shared_dependencies(dependencies)),
        remotes: config.remotes.clone().unwrap_or_default(),
    }
}

/// Lay caller remotes over derived ones; the caller wins per name.
pub fn merge_remotes(derived: &RemoteMap, caller: Option<&RemoteSpecMap>) -> RemoteSpecMap {
    let mut merged: RemoteSpecMap = derived
        .iter()
        .map(|(name, descriptor)| (name.clone(), RemoteSpec::from(descriptor.clone())))
        .collect();

    if let Some(caller) = caller {
        merged.extend(caller.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    merged
}
