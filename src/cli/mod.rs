use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Promotion and site traffic reporting
#[derive(Parser)]
#[command(name = "promo-traffic")]
#[command(about = "Promotion and site traffic reporting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and its schema
    InitDb(commands::init::InitDbCommand),
    /// Import traffic, items, promotions, bids or communities from CSV
    Import(commands::import::ImportCommand),
    /// Build a promoted item, site traffic or promotion schedule report
    Report(commands::report::ReportCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb(command) => command.run(),
        Commands::Import(command) => command.run(),
        Commands::Report(command) => command.run(),
    }
}
