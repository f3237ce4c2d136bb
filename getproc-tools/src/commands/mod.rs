//! Command implementations

pub mod get_proc;

pub use get_proc::GetProcCommand;
