//! Caller configuration file discovery and loading.
//!
//! The caller configuration carries the federation settings plus any other
//! bundler keys and plugins that should be passed through. It is read from
//! the first of `fedconf.json`, `fedconf.yaml` or `fedconf.yml` found in the
//! project root, or from an explicit path.

use crate::error::{FedconfError, Result};
use crate::federation::FederationConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Caller config file names, in lookup order.
pub const CALLER_CONFIG_FILES: &[&str] = &["fedconf.json", "fedconf.yaml", "fedconf.yml"];

/// Caller-supplied bundler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MfConfig {
    /// Module-federation settings
    pub federation: FederationConfig,

    /// Additional bundler plugins, placed after the federation plugin
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<serde_json::Value>,

    /// Any other bundler settings, shallow-merged over the derived base
    #[serde(flatten)]
    pub bundler: serde_json::Map<String, serde_json::Value>,
}

impl MfConfig {
    /// Generate JSON Schema for the caller config file.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(MfConfig);
        serde_json::to_value(schema).unwrap_or_default()
    }
}

/// Find the caller config file in `project_root`.
pub fn find_caller_config(project_root: &Path) -> Option<PathBuf> {
    CALLER_CONFIG_FILES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load and parse a caller config file, choosing the format by extension.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the content is invalid.
pub fn load_caller_config_file(path: &Path) -> Result<MfConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FedconfError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FedconfError::Io(e)
        }
    })?;

    parse_caller_config(&content, path)
}

/// Parse caller config content. YAML is used for `.yml`/`.yaml`, JSON otherwise.
pub fn parse_caller_config(content: &str, source_path: &Path) -> Result<MfConfig> {
    let is_yaml = matches!(
        source_path.extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    );

    let parsed = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| FedconfError::ConfigParseError {
        path: source_path.to_path_buf(),
        message,
    })
}

/// Load caller config with optional path override.
///
/// If `config_override` is provided, loads that file. Otherwise, discovers
/// the config file in `project_root`.
pub fn load_caller_config(project_root: &Path, config_override: Option<&Path>) -> Result<MfConfig> {
    if let Some(path) = config_override {
        return load_caller_config_file(path);
    }

    match find_caller_config(project_root) {
        Some(path) => {
            tracing::debug!("Using caller config {}", path.display());
            load_caller_config_file(&path)
        }
        None => Err(FedconfError::ConfigNotFound {
            path: project_root.join(CALLER_CONFIG_FILES[0]),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON_CONFIG: &str = r#"{
  "federation": {
    "name": "shell",
    "exposes": { "./Button": "./src/Button.tsx" }
  },
  "plugins": [{ "name": "react" }],
  "envPrefix": "VITE_"
}"#;

    #[test]
    fn parses_json_config() {
        let config = parse_caller_config(JSON_CONFIG, Path::new("fedconf.json")).unwrap();

        assert_eq!(config.federation.name, "shell");
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.bundler["envPrefix"], "VITE_");
        assert!(!config.bundler.contains_key("federation"));
        assert!(!config.bundler.contains_key("plugins"));
    }

    #[test]
    fn parses_yaml_config() {
        let yaml = r#"
federation:
  name: auth
  filename: authEntry.js
server:
  host: 0.0.0.0
"#;
        let config = parse_caller_config(yaml, Path::new("fedconf.yml")).unwrap();

        assert_eq!(config.federation.name, "auth");
        assert_eq!(config.federation.filename.as_deref(), Some("authEntry.js"));
        assert_eq!(config.bundler["server"]["host"], "0.0.0.0");
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn missing_federation_is_parse_error() {
        let result = parse_caller_config(r#"{"plugins": []}"#, Path::new("fedconf.json"));
        assert!(matches!(result, Err(FedconfError::ConfigParseError { .. })));
    }

    #[test]
    fn discovers_config_in_lookup_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("fedconf.yml"), "federation:\n  name: yml\n").unwrap();
        fs::write(
            temp.path().join("fedconf.json"),
            r#"{"federation": {"name": "json"}}"#,
        )
        .unwrap();

        let found = find_caller_config(temp.path()).unwrap();
        assert!(found.ends_with("fedconf.json"));

        let config = load_caller_config(temp.path(), None).unwrap();
        assert_eq!(config.federation.name, "json");
    }

    #[test]
    fn override_path_is_used() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        fs::write(&path, "federation:\n  name: custom\n").unwrap();

        let config = load_caller_config(temp.path(), Some(&path)).unwrap();
        assert_eq!(config.federation.name, "custom");
    }

    #[test]
    fn missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_caller_config(temp.path(), None);
        assert!(matches!(result, Err(FedconfError::ConfigNotFound { .. })));
    }

    #[test]
    fn schema_describes_federation() {
        let schema = MfConfig::json_schema();
        assert!(schema["properties"]["federation"].is_object());
    }
}
