//! Shared-dependency declarations.
//!
//! Every declared manifest dependency is shared as a singleton pinned to its
//! declared version range. This is a pass-through declaration; no peer or
//! version-compatibility resolution happens here.

use crate::config::DependencyMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime sharing settings for one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedDependency {
    /// Version range required by this build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,

    /// Load only one copy across host and remotes
    #[serde(default)]
    pub singleton: bool,
}

impl SharedDependency {
    /// A singleton pinned to `range`.
    pub fn singleton(range: impl Into<String>) -> Self {
        Self {
            required_version: Some(range.into()),
            singleton: true,
        }
    }
}

/// Dependency name to sharing settings.
pub type SharedDependencyMap = BTreeMap<String, SharedDependency>;

/// Build the shared map from declared dependencies.
///
/// ```
/// use fedconf::config::DependencyMap;
/// use fedconf::federation::shared_dependencies;
///
/// let mut deps = DependencyMap::new();
/// deps.insert("react".into(), "^18.0.0".into());
///
/// let shared = shared_dependencies(&deps);
/// assert_eq!(shared["react"].required_version.as_deref(), Some("^18.0.0"));
/// assert!(shared["react"].singleton);
/// ```
pub fn shared_dependencies(dependencies: &DependencyMap) -> SharedDependencyMap {
    dependencies
        .iter()
        .map(|(name, range)| (name.clone(), SharedDependency::singleton(range.clone())))
        .collect()
}
