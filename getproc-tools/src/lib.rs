//! Process enumeration tools for getproc
//!
//! This crate snapshots the OS process table and exposes that snapshot
//! as a named command behind a small dispatch table.

pub mod command;
pub mod commands;
pub mod registration;
pub mod system;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    PlatformQuery(#[from] system::PlatformQueryError),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),
}

/// Common traits and types used across tools
pub mod prelude {
    pub use super::command::{Command, CommandMetadata, CommandRegistry};
    pub use super::commands::GetProcCommand;
    pub use super::registration::{default_registry, SnapInDescriptor, SNAP_IN};
    pub use super::system::{
        PlatformQueryError, ProcessRecord, ProcessSource, ProcessTool, SysinfoSource,
    };
    pub use super::ToolError;
}

pub use command::{Command, CommandMetadata, CommandRegistry};
pub use commands::GetProcCommand;
pub use registration::{default_registry, SnapInDescriptor, SNAP_IN};
pub use system::{PlatformQueryError, ProcessRecord, ProcessSource, ProcessTool, SysinfoSource};
