//! Keyward CLI
//!
//! Rates self-custody wallets on account recovery and account unruggability
//! from their guardian recovery setup.

use anyhow::Result;
use clap::{Parser, Subcommand};
use keyward_cli::commands::{rate::handle_rate, scenarios::handle_scenarios};
use keyward_cli::{KeywardConfig, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyward")]
#[command(about = "Keyward - Guardian-Based Recovery Security Analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate wallet files on every attribute
    Rate {
        /// Wallet files (.toml or .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show every scenario outcome of a wallet's guardian policy
    Scenarios {
        /// Wallet file (.toml or .json)
        file: PathBuf,

        /// Variant to analyze (defaults to the first one)
        #[arg(long)]
        variant: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (mut config, source) = KeywardConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output = format;
    }

    // RUST_LOG wins, then --verbose, then the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "debug"
        } else {
            config.log_filter.as_str()
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        config = ?source,
        output = ?config.output,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Rate { files } => {
            if !handle_rate(&files, &config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Scenarios { file, variant } => {
            handle_scenarios(&file, variant.as_deref(), &config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
