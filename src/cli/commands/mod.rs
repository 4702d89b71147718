//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that read env files take
//! their loader from the dispatcher, so tests can run without the process
//! environment leaking in.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod env;
pub mod generate;
pub mod remotes;
pub mod schema;
pub mod shared;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::federation::ConfigWarning;
use crate::ui::UserInterface;

/// Report non-fatal findings through the UI.
pub(crate) fn report_warnings(ui: &mut dyn UserInterface, warnings: &[ConfigWarning]) {
    for warning in warnings {
        tracing::debug!("Config warning: {:?}", warning);
        ui.warning(&warning.to_string());
    }
}
