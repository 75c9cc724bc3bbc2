//! gapfill CLI - gap-filled metabolic model catalogue
//!
//! Entry point for the catalogue server:
//! - `serve`: run the HTTP server (pages, JSON API, uploads, downloads)
//! - `init-db`: create the schema, optionally with demo rows
//!
//! A `.env` file in the working directory is loaded before arguments are parsed.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "gapfill",
    author,
    version,
    about = "Catalogue server for gap-filled metabolic models",
    long_about = "Browse, search, upload and download gap-filled metabolic models \
                  together with their growth and biomass measurements."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create database tables (and optionally demo rows)
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }

    Ok(())
}
