//! Database error kinds
//!
//! Driver errors are classified once, here, through `sqlx`'s driver-neutral
//! [`ErrorKind`]. Callers match on [`DbError`] variants instead of codes or
//! message text.

use sqlx::error::ErrorKind;

/// Column name used when a NOT NULL message cannot be parsed.
const UNKNOWN_COLUMN: &str = "a required field";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached or a connection died
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A NOT NULL column received no value
    #[error("Database Constraint Error: '{column}' cannot be empty.")]
    NotNull { column: String },

    /// A unique or primary key constraint was violated
    #[error("Database Constraint Error: Duplicate entry detected.")]
    Duplicate,

    /// Any other database failure
    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Whether this is a constraint violation caused by the submitted data.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::NotNull { .. } | Self::Duplicate)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::NotNullViolation => {
                    return Self::NotNull {
                        column: not_null_column(db_err.message()),
                    }
                }
                ErrorKind::UniqueViolation => return Self::Duplicate,
                _ => {}
            }
        }

        if matches!(
            err,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Protocol(_)
        ) {
            Self::Connection(err)
        } else {
            Self::Query(err)
        }
    }
}

/// Pull the offending column out of a NOT NULL violation message.
///
/// Understands SQLite (`NOT NULL constraint failed: table.column`) and
/// MySQL/MariaDB (`Column 'column' cannot be null`) wording.
fn not_null_column(message: &str) -> String {
    if let Some(rest) = message.split("NOT NULL constraint failed:").nth(1) {
        let qualified = rest.trim();
        let column = qualified.rsplit('.').next().unwrap_or(qualified);
        if !column.is_empty() {
            return column.to_owned();
        }
    }

    let mut quoted = message.split('\'');
    if let (Some(_), Some(column)) = (quoted.next(), quoted.next()) {
        if !column.is_empty() {
            return column.to_owned();
        }
    }

    UNKNOWN_COLUMN.to_owned()
}
