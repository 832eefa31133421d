//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod export;
pub mod formats;
pub mod url;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gd_core::config::Config;
use std::path::PathBuf;

/// gigdesk - report export for the marketplace admin dashboard
#[derive(Debug, Parser)]
#[command(name = "gigdesk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export saved list responses as a report file
    Export(export::ExportArgs),

    /// List available export formats
    Formats(formats::FormatsArgs),

    /// Print the request URL for a backend endpoint
    Url(url::UrlArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Loaded configuration and where it came from
pub struct AppContext {
    pub config: Config,
    pub source: Option<PathBuf>,
}

impl AppContext {
    fn load(explicit: Option<&std::path::Path>) -> Result<Self> {
        let (mut config, source) = Config::discover(explicit)?;
        config.apply_env();
        Ok(Self { config, source })
    }
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // `config init` must work before any configuration exists
    if let Commands::Config(config::ConfigCommand::Init { force }) = &cli.command {
        return config::init(cli.config.as_deref(), *force);
    }

    let ctx = AppContext::load(cli.config.as_deref())?;

    // Dispatch to command handler
    match cli.command {
        Commands::Export(args) => export::execute(args, &ctx),
        Commands::Formats(args) => formats::execute(args, &ctx),
        Commands::Url(args) => url::execute(args, &ctx),
        Commands::Config(cmd) => config::execute(cmd, &ctx),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
