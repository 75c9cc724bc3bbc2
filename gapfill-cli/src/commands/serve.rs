//! HTTP server command
//!
//! Runs the catalogue server: pages, JSON API, uploads and downloads.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gapfill_server::{run_server, CatalogConfig};

/// Arguments for the serve command
///
/// Flags override the matching `GAPFILL_*` environment variables.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5001)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Directory holding uploaded model files (default: ./uploads)
    #[arg(long)]
    pub upload_root: Option<PathBuf>,

    /// Database URL (default: sqlite://gapfill.db)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Largest accepted request body in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(root) = self.upload_root {
            config.upload_root = root;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(bytes) = self.max_upload_bytes {
            config.max_upload_bytes = bytes;
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        config.cors_permissive |= self.cors_permissive;
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = CatalogConfig::from_env().context("Invalid server configuration")?;
    let config = args.apply(config);

    tracing::info!(
        bind = %config.bind_addr,
        upload_root = %config.upload_root.display(),
        "Starting gapfill server"
    );

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".parse().unwrap()),
            upload_root: Some(PathBuf::from("/srv/models")),
            max_connections: Some(9),
            cors_permissive: true,
            ..ServeArgs::default()
        };

        let config = args.apply(CatalogConfig::default());
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.upload_root, PathBuf::from("/srv/models"));
        assert_eq!(config.max_connections, 9);
        assert!(config.cors_permissive);
        assert_eq!(config.database_url, CatalogConfig::default().database_url);
    }

    #[test]
    fn missing_flags_keep_config() {
        let mut base = CatalogConfig::default();
        base.cors_permissive = true;
        base.max_upload_bytes = 1024;

        let config = ServeArgs::default().apply(base);
        assert!(config.cors_permissive);
        assert_eq!(config.max_upload_bytes, 1024);
    }
}
