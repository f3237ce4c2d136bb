//! Command capability interface and dispatch table
//!
//! Every command exposes static metadata and an `execute` that produces
//! a sequence of process records. The registry maps command ids to
//! implementations so a host can discover and invoke them by name.

use crate::system::ProcessRecord;
use crate::ToolError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Command metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMetadata {
    pub id: String,
    pub verb: String,
    pub noun: String,
    pub description: String,
}

impl CommandMetadata {
    /// `Verb-Noun` form, e.g. `Get-Proc`.
    pub fn display_name(&self) -> String {
        format!("{}-{}", self.verb, self.noun)
    }
}

/// Base trait for all commands
pub trait Command: Send + Sync {
    /// Get command metadata
    fn metadata(&self) -> &CommandMetadata;

    /// Run the command once and return its records
    fn execute(&self) -> Result<Vec<ProcessRecord>, ToolError>;
}

/// Command registry keyed by command id
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: Box<dyn Command>) -> Result<(), ToolError> {
        let id = command.metadata().id.clone();
        if self.commands.contains_key(&id) {
            return Err(ToolError::DuplicateCommand(id));
        }
        debug!("Registered command {}", id);
        self.commands.insert(id, command);
        Ok(())
    }

    pub fn has_command(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Command> {
        self.commands.get(id).map(|c| c.as_ref())
    }

    /// Metadata of every registered command, sorted by id.
    pub fn list(&self) -> Vec<CommandMetadata> {
        let mut metadata: Vec<CommandMetadata> =
            self.commands.values().map(|c| c.metadata().clone()).collect();
        metadata.sort_by(|a, b| a.id.cmp(&b.id));
        metadata
    }

    pub fn execute(&self, id: &str) -> Result<Vec<ProcessRecord>, ToolError> {
        let command = self
            .get(id)
            .ok_or_else(|| ToolError::UnknownCommand(id.to_string()))?;
        debug!("Dispatching {}", command.metadata().display_name());
        command.execute()
    }
}
