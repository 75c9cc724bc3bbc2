//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use gapfill_server::db::schema::{ensure_schema, seed_demo_rows};
use gapfill_server::{CatalogConfig, Database};

/// Arguments for the init-db command
#[derive(Parser, Debug, Default)]
pub struct InitDbArgs {
    /// Database URL (default: sqlite://gapfill.db)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Also insert the example rows shown on the demo page
    #[arg(long)]
    pub seed_demo: bool,
}

/// Create missing tables, optionally seeding demo rows
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => {
            CatalogConfig::from_env()
                .context("Invalid database configuration")?
                .database_url
        }
    };

    let db = Database::connect(&database_url, 1)
        .await
        .context("Failed to open database")?;

    ensure_schema(&db).await.context("Failed to create schema")?;
    tracing::info!("Schema ready");

    if args.seed_demo {
        seed_demo_rows(&db)
            .await
            .context("Failed to insert demo rows")?;
        tracing::info!("Demo rows inserted");
    }

    db.close().await;
    Ok(())
}
