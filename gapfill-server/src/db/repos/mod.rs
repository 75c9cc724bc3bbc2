//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Acquires a pooled connection per call (no shared connection)
//! - Parameterized statements only
//! - Writes run on a caller-owned transaction

pub mod models;
pub mod demo;

pub use models::ModelRepo;
pub use demo::{DemoQuery, DemoRepo};
