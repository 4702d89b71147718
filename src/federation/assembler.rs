//! Final bundler configuration assembly.
//!
//! An evaluation runs once per build:
//!
//! 1. Resolve the environment and apply it to the process environment
//! 2. Derive this project's port/URL and its remotes
//! 3. Build the base bundler settings and register the lifecycle plugins
//! 4. Build the federation options and merge in the caller's settings

use super::build::BuildConfig;
use super::codegen::{run_options_hooks, GenerateEnvironment, LifecyclePlugin};
use super::options::{federation, merge_remotes, FederationOptions};
use super::remotes::{derive_remotes, project_identifier, RemoteMap};
use super::warning::ConfigWarning;
use crate::config::{
    apply_to_process_environment, resolve_environment, EnvMap, EnvSource, Manifest, MfConfig,
    ResolvedEnvironment,
};
use crate::error::{FedconfError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Plugin name the federation integration is registered under.
pub const FEDERATION_PLUGIN: &str = "module-federation";

/// Derived configuration shared by every federated project.
#[derive(Debug)]
pub struct CommonConfig {
    /// The resolved environment, with its layers.
    pub resolved: ResolvedEnvironment,
    /// Merged environment variables.
    pub self_env: EnvMap,
    /// Port this project serves on.
    pub port: u16,
    /// URL this project serves at.
    pub url: String,
    /// Base bundler settings.
    pub base: BuildConfig,
    /// Remotes derived from the environment.
    pub remotes: RemoteMap,
    /// Lifecycle plugins to run during option resolution.
    pub plugins: Vec<Box<dyn LifecyclePlugin>>,
    /// Non-fatal findings.
    pub warnings: Vec<ConfigWarning>,
}

impl CommonConfig {
    /// Absolute project directory.
    pub fn project_dir(&self) -> &Path {
        &self.resolved.project_dir
    }
}

#[derive(Debug, Serialize)]
struct FederationPlugin<'a> {
    name: &'static str,
    options: &'a FederationOptions,
}

/// The final configuration handed to the bundler.
#[derive(Debug)]
pub struct BundlerConfig {
    /// The bundler configuration object.
    pub config: Map<String, Value>,
    /// Options passed to the federation plugin.
    pub federation: FederationOptions,
    /// The derived common configuration.
    pub common: CommonConfig,
}

impl BundlerConfig {
    /// The configuration object as JSON.
    pub fn to_json(&self) -> Value {
        Value::Object(self.config.clone())
    }

    /// The ordered plugin list.
    pub fn plugins(&self) -> &[Value] {
        self.config
            .get("plugins")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Run the option-resolution hooks of the lifecycle plugins.
    pub fn run_lifecycle(&self) -> Result<()> {
        run_options_hooks(&self.common.plugins)
    }

    /// Non-fatal findings from the evaluation.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.common.warnings
    }
}

/// One configuration evaluation for a project directory and mode.
///
/// # Example
///
/// ```
/// use fedconf::config::ModeEnvLoader;
/// use fedconf::federation::ConfigEvaluation;
/// use tempfile::TempDir;
///
/// let root = TempDir::new().unwrap();
/// let project = root.path().join("shell");
/// std::fs::create_dir(&project).unwrap();
/// std::fs::write(
///     project.join(".env"),
///     "VITE_SHELL=localhost:3000\nVITE_AUTH=localhost:3001",
/// ).unwrap();
///
/// let common = ConfigEvaluation::new("development", &project)
///     .common_config(&ModeEnvLoader::new())
///     .unwrap();
/// assert_eq!(common.port, 3000);
/// assert!(common.remotes.contains_key("auth"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigEvaluation {
    mode: String,
    project_root: PathBuf,
    env_module_ext: String,
}

impl ConfigEvaluation {
    /// Create an evaluation for `mode` in `project_root`.
    pub fn new(mode: impl Into<String>, project_root: &Path) -> Self {
        Self {
            mode: mode.into(),
            project_root: project_root.to_path_buf(),
            env_module_ext: "ts".to_string(),
        }
    }

    /// Extension of the generated environment module.
    pub fn with_env_module_ext(mut self, ext: impl Into<String>) -> Self {
        self.env_module_ext = ext.into();
        self
    }

    /// Resolve the environment and derive the common configuration.
    ///
    /// Applies the merged environment to the process environment.
    pub fn common_config(&self, source: &dyn EnvSource) -> Result<CommonConfig> {
        let resolved = resolve_environment(&self.mode, &self.project_root, source)?;
        apply_to_process_environment(&resolved.merged);

        let identifier = project_identifier(&resolved.project_dir)?;
        let derived = derive_remotes(&resolved.merged, &identifier)?;
        let base = BuildConfig::new(derived.port, &derived.url);

        let plugins: Vec<Box<dyn LifecyclePlugin>> = vec![Box::new(
            GenerateEnvironment::new(&resolved.project_dir, resolved.merged.clone())
                .with_extension(&self.env_module_ext),
        )];

        Ok(CommonConfig {
            self_env: resolved.merged.clone(),
            resolved,
            port: derived.port,
            url: derived.url,
            base,
            remotes: derived.remotes,
            plugins,
            warnings: derived.warnings,
        })
    }

    /// Assemble the final bundler configuration.
    ///
    /// The result holds the base settings, then the caller's bundler keys
    /// (caller wins), then `plugins`: the federation plugin followed by the
    /// caller's plugins in their original order.
    pub fn define_config(&self, caller: &MfConfig, source: &dyn EnvSource) -> Result<BundlerConfig> {
        let common = self.common_config(source)?;
        let manifest = Manifest::read(common.project_dir());

        let mut federation_config = caller.federation.clone();
        federation_config.remotes = Some(merge_remotes(
            &common.remotes,
            caller.federation.remotes.as_ref(),
        ));
        let options = federation(&federation_config, &manifest.dependencies);

        let mut config = match serde_json::to_value(&common.base) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(FedconfError::Other(e.into())),
        };
        for (key, value) in &caller.bundler {
            config.insert(key.clone(), value.clone());
        }

        let federation_plugin = serde_json::to_value(FederationPlugin {
            name: FEDERATION_PLUGIN,
            options: &options,
        })
        .map_err(|e| FedconfError::Other(e.into()))?;

        let mut plugins = Vec::with_capacity(caller.plugins.len() + 1);
        plugins.push(federation_plugin);
        plugins.extend(caller.plugins.iter().cloned());
        config.insert("plugins".to_string(), Value::Array(plugins));

        tracing::debug!(
            "Assembled config for '{}' with {} remotes and {} shared dependencies",
            options.name,
            options.remotes.len(),
            options.shared.len()
        );

        Ok(BundlerConfig {
            config,
            federation: options,
            common,
        })
    }
}

/// Derive the common configuration with default settings.
pub fn define_common_config(
    mode: &str,
    project_root: &Path,
    source: &dyn EnvSource,
) -> Result<CommonConfig> {
    ConfigEvaluation::new(mode, project_root).common_config(source)
}

/// Assemble the final bundler configuration with default settings.
pub fn define_config(
    mode: &str,
    project_root: &Path,
    caller: &MfConfig,
    source: &dyn EnvSource,
) -> Result<BundlerConfig> {
    ConfigEvaluation::new(mode, project_root).define_config(caller, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_caller_config, ModeEnvLoader};
    use crate::federation::RemoteSpec;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    /// Workspace with a global env at the root and a `shell` project below it.
    fn workspace() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(".env"),
            "VITE_MODE=development\nVITE_SHELL=localhost:3000\nVITE_AUTH=localhost:3001\n",
        )
        .unwrap();
        let project = root.path().join("shell");
        fs::create_dir(&project).unwrap();
        fs::write(
            project.join("package.json"),
            r#"{"dependencies": {"react": "^18.0.0"}}"#,
        )
        .unwrap();
        (root, project)
    }

    fn caller(json: &str) -> MfConfig {
        parse_caller_config(json, Path::new("fedconf.json")).unwrap()
    }

    #[test]
    fn common_config_derives_base_and_remotes() {
        let (_root, project) = workspace();

        let common = define_common_config("development", &project, &ModeEnvLoader::new()).unwrap();

        assert_eq!(common.port, 3000);
        assert_eq!(common.base.base, "localhost:3000");
        assert!(common.remotes.contains_key("auth"));
        assert!(!common.remotes.contains_key("mode"));
        assert_eq!(common.plugins.len(), 1);
        assert_eq!(common.plugins[0].name(), "generate-environment");
    }

    #[test]
    fn common_config_requires_project_variable() {
        let root = TempDir::new().unwrap();
        let project = root.path().join("orphan");
        fs::create_dir(&project).unwrap();

        let result = define_common_config("development", &project, &ModeEnvLoader::new());
        assert!(matches!(
            result,
            Err(FedconfError::MissingProjectVariable { .. })
        ));
    }

    #[test]
    fn federation_plugin_comes_first_then_caller_plugins() {
        let (_root, project) = workspace();
        let caller = caller(
            r#"{
  "federation": {"name": "shell"},
  "plugins": [{"name": "react"}, {"name": "svgr"}, {"name": "inspect"}]
}"#,
        );

        let config = define_config("development", &project, &caller, &ModeEnvLoader::new()).unwrap();

        let names: Vec<_> = config
            .plugins()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["module-federation", "react", "svgr", "inspect"]);
    }

    #[test]
    fn federation_options_carry_shared_and_remotes() {
        let (_root, project) = workspace();
        let caller = caller(r#"{"federation": {"name": "shell"}}"#);

        let config = define_config("development", &project, &caller, &ModeEnvLoader::new()).unwrap();
        let options = &config.plugins()[0]["options"];

        assert_eq!(options["filename"], "remoteEntry.js");
        assert_eq!(
            options["shared"],
            json!({"react": {"requiredVersion": "^18.0.0", "singleton": true}})
        );
        assert_eq!(
            options["remotes"]["auth"]["entry"],
            "localhost:3001/remoteEntry.js"
        );
    }

    #[test]
    fn caller_remotes_win_over_derived() {
        let (_root, project) = workspace();
        let caller = caller(
            r#"{"federation": {"name": "shell", "remotes": {"auth": "https://auth.example.com/remoteEntry.js"}}}"#,
        );

        let config = define_config("development", &project, &caller, &ModeEnvLoader::new()).unwrap();

        assert_eq!(
            config.federation.remotes["auth"],
            RemoteSpec::Url("https://auth.example.com/remoteEntry.js".into())
        );
        assert!(config.federation.remotes.contains_key("shell"));
    }

    #[test]
    fn caller_settings_overlay_base_shallowly() {
        let (_root, project) = workspace();
        let caller = caller(
            r#"{"federation": {"name": "shell"}, "server": {"host": "0.0.0.0"}, "envPrefix": "VITE_"}"#,
        );

        let config = define_config("development", &project, &caller, &ModeEnvLoader::new()).unwrap();
        let json = config.to_json();

        assert_eq!(json["server"], json!({"host": "0.0.0.0"}));
        assert_eq!(json["preview"], json!({"strictPort": true, "port": 3000}));
        assert_eq!(json["envPrefix"], "VITE_");
        assert_eq!(json["build"]["target"], "chrome89");
        assert!(json.get("federation").is_none());
    }

    #[test]
    fn lifecycle_writes_environment_module() {
        let (_root, project) = workspace();
        let caller = caller(r#"{"federation": {"name": "shell"}}"#);

        let config = ConfigEvaluation::new("development", &project)
            .with_env_module_ext("js")
            .define_config(&caller, &ModeEnvLoader::new())
            .unwrap();
        config.run_lifecycle().unwrap();

        let generated = fs::read_to_string(project.join("src").join("environment.js")).unwrap();
        assert!(generated.starts_with("export default {"));
        assert!(generated.contains("\"VITE_AUTH\": \"localhost:3001\""));
    }

    #[test]
    fn missing_manifest_shares_nothing() {
        let (_root, project) = workspace();
        fs::remove_file(project.join("package.json")).unwrap();
        let caller = caller(r#"{"federation": {"name": "shell"}}"#);

        let config = define_config("development", &project, &caller, &ModeEnvLoader::new()).unwrap();
        assert!(config.federation.shared.is_empty());
    }
}
