//! Record output
//!
//! Writes process records to a stream one at a time in the selected format.

use crate::config::OutputFormat;
use crate::utils::{format_bytes, truncate};
use anyhow::{Context, Result};
use colored::*;
use getproc_tools::ProcessRecord;
use std::io::Write;

const NAME_WIDTH: usize = 24;

pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
    color: bool,
    header_written: bool,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat, color: bool) -> Self {
        Self {
            out,
            format,
            color,
            header_written: false,
        }
    }

    pub fn write_record(&mut self, record: &ProcessRecord) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                if !self.header_written {
                    self.write_header()?;
                }
                self.write_row(record)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, record)
                    .context("Failed to serialize process record")?;
                writeln!(self.out)?;
            }
            OutputFormat::Plain => {
                writeln!(self.out, "{}\t{}", record.pid, record.name)?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush().context("Failed to flush output")?;
        Ok(self.out)
    }

    fn write_header(&mut self) -> Result<()> {
        let header = format!(
            "{:>8} {:>8} {:<name$} {:<10} {:>12} {}",
            "PID",
            "PPID",
            "NAME",
            "STATUS",
            "MEMORY",
            "STARTED",
            name = NAME_WIDTH
        );
        if self.color {
            writeln!(self.out, "{}", header.cyan().bold())?;
        } else {
            writeln!(self.out, "{}", header)?;
        }
        self.header_written = true;
        Ok(())
    }

    fn write_row(&mut self, record: &ProcessRecord) -> Result<()> {
        let parent = record
            .parent_pid
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".to_string());
        let started = record
            .start_time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            self.out,
            "{:>8} {:>8} {:<name$} {:<10} {:>12} {}",
            record.pid,
            parent,
            truncate(&record.name, NAME_WIDTH),
            truncate(&record.status, 10),
            format_bytes(record.memory_bytes),
            started,
            name = NAME_WIDTH
        )?;
        Ok(())
    }
}
