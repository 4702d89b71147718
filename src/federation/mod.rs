//! Module-federation configuration derivation and assembly.
//!
//! - Remote derivation from the environment in [`remotes`]
//! - Shared dependencies from the manifest in [`shared`]
//! - Federation plugin options in [`options`]
//! - Base bundler settings in [`build`]
//! - Lifecycle plugins and the generated environment module in [`codegen`]
//! - Final configuration assembly in [`assembler`]

pub mod assembler;
pub mod build;
pub mod codegen;
pub mod options;
pub mod remotes;
pub mod shared;
pub mod warning;

pub use assembler::{
    define_common_config, define_config, BundlerConfig, CommonConfig, ConfigEvaluation,
    FEDERATION_PLUGIN,
};
pub use build::{BuildConfig, BUILD_TARGET};
pub use codegen::{run_options_hooks, GenerateEnvironment, LifecyclePlugin, GENERATE_ENVIRONMENT};
pub use options::{federation, merge_remotes, FederationConfig, FederationOptions, RemoteSpecMap};
pub use remotes::{
    derive_remotes, parse_port, project_identifier, DerivedRemotes, RemoteDescriptor, RemoteMap,
    RemoteSpec, DEFAULT_SHARE_SCOPE, EXCLUDED_KEYS, REMOTE_ENTRY,
};
pub use shared::{shared_dependencies, SharedDependency, SharedDependencyMap};
pub use warning::ConfigWarning;
