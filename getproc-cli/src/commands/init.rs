//! Initialization command
//!
//! Write a default configuration file

use crate::config::CliConfig;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the default config to `path` unless one exists and `force` is unset.
/// Returns whether a file was written.
pub fn run_init<W: Write>(path: &Path, force: bool, out: &mut W) -> Result<bool> {
    if path.exists() && !force {
        writeln!(
            out,
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        )?;
        return Ok(false);
    }

    CliConfig::default().save(path)?;
    info!("Wrote default configuration to {}", path.display());
    writeln!(out, "Configuration created at: {}", path.display())?;
    Ok(true)
}
