//! Input loading for fedconf: env files, the package manifest and the
//! caller configuration file.
//!
//! - Dotenv parsing in [`env_file`]
//! - Value expansion in [`expand`]
//! - Layering with source tracking in [`env_layer`]
//! - Per-mode file loading in [`loader`]
//! - Ancestor walk and local overlay in [`resolver`]
//! - `package.json` reading in [`manifest`]
//! - Caller config discovery in [`caller`]
//!
//! # Example
//!
//! ```
//! use fedconf::config::{resolve_environment, ModeEnvLoader};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! std::fs::write(temp.path().join(".env"), "VITE_SHELL=localhost:3000").unwrap();
//!
//! let resolved = resolve_environment("development", temp.path(), &ModeEnvLoader::new()).unwrap();
//! assert_eq!(resolved.merged["VITE_SHELL"], "localhost:3000");
//! ```

use std::collections::BTreeMap;

pub mod caller;
pub mod env_file;
pub mod env_layer;
pub mod expand;
pub mod loader;
pub mod manifest;
pub mod resolver;

/// Variable name to value.
pub type EnvMap = BTreeMap<String, String>;

pub use caller::{
    find_caller_config, load_caller_config, load_caller_config_file, parse_caller_config,
    MfConfig, CALLER_CONFIG_FILES,
};
pub use env_file::EnvFileParser;
pub use env_layer::{EnvLayer, EnvLayerStack};
pub use expand::{expand_all, expand_value};
pub use loader::{env_files_for_mode, validate_mode, EnvSource, ModeEnvLoader, DEFAULT_PREFIX};
pub use manifest::{DependencyMap, Manifest, MANIFEST_FILE};
pub use resolver::{
    apply_to_process_environment, resolve_environment, EnvScope, ResolvedEnvironment,
};
