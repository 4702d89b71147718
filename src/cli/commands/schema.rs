//! Schema command implementation.
//!
//! The `fedconf schema` command prints the JSON Schema of the caller
//! configuration file, for editor validation of `fedconf.json`.

use crate::config::MfConfig;
use crate::error::{FedconfError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = MfConfig::json_schema();
        let json =
            serde_json::to_string_pretty(&schema).map_err(|e| FedconfError::Other(e.into()))?;
        ui.message(&json);
        Ok(CommandResult::success())
    }
}
