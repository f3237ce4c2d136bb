//! getproc CLI Application
//!
//! Lists the running processes as structured records.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod config;
mod output;
mod utils;

use config::{CliConfig, OutputFormat};
use output::RecordWriter;

#[derive(Parser)]
#[command(name = "getproc")]
#[command(about = "Point-in-time listing of running processes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every running process
    #[command(name = "get-proc")]
    GetProc,

    /// Show the registered commands
    ListCommands,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(cli: &Cli, config: &CliConfig) -> Result<()> {
    let level = if cli.debug {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.log_level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let loaded = match (&cli.command, CliConfig::load(cli.config.as_deref())) {
        // `init` must be able to replace a broken file.
        (Commands::Init { .. }, Err(_)) => Ok(CliConfig::default()),
        (_, loaded) => loaded,
    };

    let result = loaded.and_then(|config| {
        init_logging(&cli, &config)?;
        debug!("Starting getproc with command: {:?}", cli.command);
        run_command(&cli, &config)
    });

    match result {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run_command(cli: &Cli, config: &CliConfig) -> Result<()> {
    if !config.color {
        colored::control::set_override(false);
    }
    let registry = getproc_tools::default_registry()?;
    let stdout = io::stdout();

    match cli.command {
        Commands::GetProc => {
            let format = cli.format.unwrap_or(config.format);
            let mut writer = RecordWriter::new(stdout.lock(), format, config.color);
            commands::process::run_get_proc(&registry, &mut writer)
                .context("get-proc failed")?;
            writer.finish()?;
            Ok(())
        }
        Commands::ListCommands => commands::list::run_list_commands(
            &getproc_tools::SNAP_IN,
            &registry,
            &mut stdout.lock(),
            cli.format.unwrap_or(config.format),
            config.color,
        ),
        Commands::Init { force } => {
            let path = cli.config.clone().unwrap_or_else(CliConfig::config_file_path);
            commands::init::run_init(&path, force, &mut stdout.lock())?;
            Ok(())
        }
    }
}
