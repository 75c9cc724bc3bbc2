//! Catalogue configuration - paths, limits and environment loading
//!
//! Configuration is loaded from environment variables:
//! - `GAPFILL_BIND`: Address to listen on (default: 127.0.0.1:5001)
//! - `GAPFILL_UPLOAD_ROOT`: Base directory for uploaded files (default: ./uploads)
//! - `DATABASE_URL`: sqlx connection string (default: sqlite://gapfill.db)
//! - `GAPFILL_DB_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `GAPFILL_MAX_UPLOAD_BYTES`: Request body ceiling (default: 16 MiB)
//! - `GAPFILL_CORS_PERMISSIVE`: Allow any origin (default: false)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Maximum accepted request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DEFAULT_DATABASE_URL: &str = "sqlite://gapfill.db";
const DEFAULT_UPLOAD_ROOT: &str = "uploads";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Catalogue configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Root directory for uploaded files
    pub upload_root: PathBuf,

    /// sqlx database URL
    pub database_url: String,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Request body ceiling in bytes
    pub max_upload_bytes: usize,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,
}

impl CatalogConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse_var("GAPFILL_BIND")?.unwrap_or(defaults.bind_addr),
            upload_root: std::env::var("GAPFILL_UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_root),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_var("GAPFILL_DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            max_upload_bytes: parse_var("GAPFILL_MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            cors_permissive: parse_var("GAPFILL_CORS_PERMISSIVE")?
                .unwrap_or(defaults.cors_permissive),
        })
    }

    /// Create config with explicit upload root and database (for testing)
    pub fn with_paths(upload_root: PathBuf, database_url: impl Into<String>) -> Self {
        Self {
            upload_root,
            database_url: database_url.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            upload_root: PathBuf::from(DEFAULT_UPLOAD_ROOT),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_permissive: false,
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::InvalidValue { var, value }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CatalogConfig::default();

        assert_eq!(config.bind_addr.port(), 5001);
        assert_eq!(config.upload_root, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.max_connections, 5);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn with_paths_overrides_storage_only() {
        let config = CatalogConfig::with_paths(PathBuf::from("/srv/gapfill"), "sqlite::memory:");

        assert_eq!(config.upload_root, PathBuf::from("/srv/gapfill"));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn invalid_number_is_reported() {
        std::env::set_var("GAPFILL_TEST_NUMBER", "lots");
        let err = parse_var::<u32>("GAPFILL_TEST_NUMBER").unwrap_err();
        std::env::remove_var("GAPFILL_TEST_NUMBER");

        assert_eq!(
            err.to_string(),
            "invalid value for GAPFILL_TEST_NUMBER: 'lots'"
        );
    }
}
