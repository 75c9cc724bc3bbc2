//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, one connection per request - no shared global connection
//! - Typed error kinds (`DbError`) instead of driver codes
//! - Uniqueness enforced by the schema, reported as `DbError::Duplicate`
//! - Transactions for writes

pub mod error;
pub mod pool;
pub mod repos;
pub mod rows;
pub mod schema;

pub use error::DbError;
pub use pool::Database;
pub use repos::*;
