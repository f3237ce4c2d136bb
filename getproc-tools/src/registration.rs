//! Registration descriptor
//!
//! Static metadata a host uses to discover the commands this crate provides.

use crate::command::CommandRegistry;
use crate::commands::GetProcCommand;
use crate::ToolError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapInDescriptor {
    pub name: &'static str,
    pub vendor: &'static str,
    pub description: &'static str,
}

pub const SNAP_IN: SnapInDescriptor = SnapInDescriptor {
    name: "getproc",
    vendor: "getproc contributors",
    description: "Snap-in that provides the get-proc command.",
};

/// Registry holding every command the snap-in provides.
pub fn default_registry() -> Result<CommandRegistry, ToolError> {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(GetProcCommand::new()))?;
    Ok(registry)
}
