//! Generic row decoding for ad-hoc queries
//!
//! Turns rows of any shape into JSON objects keyed by column name. Columns
//! are tried as integer, then real, then text; NULL stays NULL.

use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

/// Column-name keyed row
pub type RowMap = Map<String, Value>;

/// Decode one row, failing on the first column that is not integer, real or text.
pub fn row_to_map(row: &SqliteRow) -> Result<RowMap, sqlx::Error> {
    let mut map = RowMap::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal())?;
        map.insert(column.name().to_owned(), value);
    }
    Ok(map)
}

fn decode_column(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return Ok(value.map(Value::from).unwrap_or(Value::Null));
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return Ok(value.map(Value::from).unwrap_or(Value::Null));
    }
    row.try_get::<Option<String>, _>(index)
        .map(|value| value.map(Value::String).unwrap_or(Value::Null))
}

/// Decode all rows, dropping (and logging) any that do not fit.
pub fn rows_to_maps(rows: &[SqliteRow], source: &str) -> Vec<RowMap> {
    rows.iter()
        .filter_map(|row| match row_to_map(row) {
            Ok(map) => Some(map),
            Err(err) => {
                tracing::warn!(source, error = %err, "skipping undecodable row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn decodes_mixed_column_types() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let rows = sqlx::query("SELECT 7 AS n, 2.5 AS r, 'x' AS t, NULL AS z")
            .fetch_all(&pool)
            .await
            .unwrap();
        let maps = rows_to_maps(&rows, "test");

        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0]["n"], 7);
        assert_eq!(maps[0]["r"], 2.5);
        assert_eq!(maps[0]["t"], "x");
        assert!(maps[0]["z"].is_null());
    }

    #[tokio::test]
    async fn drops_rows_with_blob_columns() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let rows = sqlx::query("SELECT X'00FF' AS raw")
            .fetch_all(&pool)
            .await
            .unwrap();

        assert!(rows_to_maps(&rows, "test").is_empty());
    }
}
