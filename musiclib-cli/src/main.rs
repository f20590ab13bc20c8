//! musiclib CLI - song catalog service
//!
//! Entry point for the `musiclib` binary:
//! - `serve`: run the HTTP catalog API
//! - `migrate`: apply, roll back or inspect the schema

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "musiclib",
    author,
    version,
    about = "Song catalog service with metadata enrichment and paginated lyrics"
)]
struct Cli {
    /// Debug logging (when RUST_LOG and LOG_LEVEL are unset)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Manage the database schema (up, down, status)
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.musiclib)");
    }
    for path in &env_files {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}
