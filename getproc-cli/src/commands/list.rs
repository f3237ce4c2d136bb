//! Registration listing
//!
//! Shows the snap-in descriptor and every command it registers.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use getproc_tools::{CommandMetadata, CommandRegistry, SnapInDescriptor};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Listing<'a> {
    snap_in: &'a SnapInDescriptor,
    commands: Vec<CommandMetadata>,
}

pub fn run_list_commands<W: Write>(
    descriptor: &SnapInDescriptor,
    registry: &CommandRegistry,
    out: &mut W,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let listing = Listing {
                snap_in: descriptor,
                commands: registry.list(),
            };
            serde_json::to_writer(&mut *out, &listing)
                .context("Failed to serialize command listing")?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for metadata in registry.list() {
                writeln!(out, "{}", metadata.id)?;
            }
        }
        OutputFormat::Table => {
            let title = format!("{} ({})", descriptor.name, descriptor.vendor);
            if color {
                writeln!(out, "{}", title.cyan().bold())?;
            } else {
                writeln!(out, "{}", title)?;
            }
            writeln!(out, "{}", descriptor.description)?;
            writeln!(out)?;

            for metadata in registry.list() {
                writeln!(
                    out,
                    "  {:<12} {:<12} {}",
                    metadata.id,
                    metadata.display_name(),
                    metadata.description
                )?;
            }
        }
    }
    Ok(())
}
