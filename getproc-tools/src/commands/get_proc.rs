//! Get-Proc command
//!
//! Snapshots the running processes and hands every record back to the caller.

use crate::command::{Command, CommandMetadata};
use crate::system::{ProcessRecord, ProcessSource, ProcessTool};
use crate::ToolError;
use tracing::{error, info};

pub const GET_PROC_ID: &str = "get-proc";

pub struct GetProcCommand {
    metadata: CommandMetadata,
    tool: ProcessTool,
}

impl GetProcCommand {
    pub fn new() -> Self {
        Self::with_tool(ProcessTool::new())
    }

    pub fn with_source<S: ProcessSource + 'static>(source: S) -> Self {
        Self::with_tool(ProcessTool::with_source(source))
    }

    fn with_tool(tool: ProcessTool) -> Self {
        Self {
            metadata: CommandMetadata {
                id: GET_PROC_ID.to_string(),
                verb: "Get".to_string(),
                noun: "Proc".to_string(),
                description: "Lists the processes running on this machine".to_string(),
            },
            tool,
        }
    }
}

impl Default for GetProcCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for GetProcCommand {
    fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    fn execute(&self) -> Result<Vec<ProcessRecord>, ToolError> {
        match self.tool.list_processes() {
            Ok(processes) => {
                info!("{} returned {} processes", self.metadata.display_name(), processes.len());
                Ok(processes)
            }
            Err(e) => {
                error!("Process enumeration failed: {}", e);
                Err(e.into())
            }
        }
    }
}
