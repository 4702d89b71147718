//! fedconf - Module-federation build configuration.
//!
//! fedconf derives a bundler configuration for one project in a
//! micro-frontend workspace. Every project publishes its URL as a
//! `VITE_<PROJECT>` variable in `.env` files; fedconf merges the workspace
//! and project environments, derives the serving port and the remotes from
//! them, shares the dependencies declared in `package.json`, and overlays
//! the caller's own settings.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Env file loading, environment resolution and caller config
//! - [`error`] - Error types and result aliases
//! - [`federation`] - Remote derivation and final configuration assembly
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use fedconf::config::EnvMap;
//! use fedconf::federation::derive_remotes;
//!
//! let mut env = EnvMap::new();
//! env.insert("VITE_SHELL".into(), "localhost:3000".into());
//! env.insert("VITE_AUTH".into(), "localhost:3001".into());
//!
//! let derived = derive_remotes(&env, "SHELL").unwrap();
//! assert_eq!(derived.port, 3000);
//! assert_eq!(derived.remotes["auth"].entry, "localhost:3001/remoteEntry.js");
//! ```
//!
//! For file-based evaluation, see [`federation::ConfigEvaluation`] and the
//! integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod federation;
pub mod ui;

pub use error::{FedconfError, Result};
