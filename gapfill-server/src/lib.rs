//! gapfill-server: catalogue of gap-filled metabolic models
//!
//! Stores model metadata in a relational table and the uploaded model files
//! (plus optional growth/biomass side files) in a fixed directory tree.
//! Exposes browsing, search, upload and download over HTTP.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod storage;
pub mod upload;
pub mod web;

pub use config::{CatalogConfig, ConfigError};
pub use db::{Database, DbError};
pub use http::{build_router, run_server, AppState, ServerError};
