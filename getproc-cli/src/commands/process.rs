//! Process listing command
//!
//! Dispatches `get-proc` through the command registry and streams the
//! resulting records to the output.

use crate::output::RecordWriter;
use anyhow::Result;
use getproc_tools::commands::get_proc::GET_PROC_ID;
use getproc_tools::CommandRegistry;
use std::io::Write;
use tracing::{debug, info};

/// Run `get-proc` and write every record. Returns the number written.
///
/// The query completes before anything is written, so a failed query
/// writes nothing.
pub fn run_get_proc<W: Write>(registry: &CommandRegistry, writer: &mut RecordWriter<W>) -> Result<usize> {
    debug!("Running {}", GET_PROC_ID);
    let records = registry.execute(GET_PROC_ID)?;

    let mut written = 0;
    for record in &records {
        writer.write_record(record)?;
        written += 1;
    }

    info!("Wrote {} process records", written);
    Ok(written)
}
