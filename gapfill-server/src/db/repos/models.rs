//! Model catalogue repository
//!
//! - list/latest: newest first, optional LIMIT
//! - search: case-insensitive substring on growth_media plus growth filter
//! - insert: single parameterized INSERT on a caller-owned transaction

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::db::{Database, DbError};
use crate::models::{GrowthFilter, ModelRecord, NewModel, GROWTH_OUTCOME};

/// Model repository
pub struct ModelRepo<'a> {
    db: &'a Database,
}

impl<'a> ModelRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All models, newest first, optionally capped at `limit` rows.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<ModelRecord>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM gapfill_models ORDER BY id DESC");
        if let Some(limit) = limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let mut conn = self.db.acquire().await?;
        let rows = query.build().fetch_all(&mut *conn).await?;
        Ok(decode_records(&rows))
    }

    /// The `n` most recently inserted models.
    pub async fn latest(&self, n: u32) -> Result<Vec<ModelRecord>, DbError> {
        self.list(Some(n)).await
    }

    /// Models whose growth medium contains `term` (case-insensitive), newest first.
    ///
    /// `%` and `_` in the term match literally.
    pub async fn search(
        &self,
        term: &str,
        filter: GrowthFilter,
    ) -> Result<Vec<ModelRecord>, DbError> {
        let pattern = format!("%{}%", escape_like(&term.to_ascii_lowercase()));

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT * FROM gapfill_models WHERE LOWER(growth_media) LIKE ");
        query.push_bind(pattern).push(" ESCAPE '\\'");

        match filter {
            GrowthFilter::All => {}
            GrowthFilter::Growth => {
                query.push(" AND growth_data = ").push_bind(GROWTH_OUTCOME);
            }
            GrowthFilter::NoGrowth => {
                query
                    .push(" AND (growth_data != ")
                    .push_bind(GROWTH_OUTCOME)
                    .push(" OR growth_data IS NULL)");
            }
        }
        query.push(" ORDER BY id DESC");

        let mut conn = self.db.acquire().await?;
        let rows = query.build().fetch_all(&mut *conn).await?;
        Ok(decode_records(&rows))
    }

    /// Insert a model record and return its id.
    ///
    /// Runs on the caller's connection so it can share a transaction.
    pub async fn insert(conn: &mut SqliteConnection, model: &NewModel) -> Result<i64, DbError> {
        tracing::debug!(?model, "inserting model record");

        let result = sqlx::query(
            r#"
            INSERT INTO gapfill_models
                (species_name, growth_media, gapfill_algorithm, annotation_tool,
                 file_name, file_link, growth_data,
                 growth_file, biomass_file_5mM, biomass_file_20mM)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&model.species_name)
        .bind(&model.growth_media)
        .bind(&model.gapfill_algorithm)
        .bind(&model.annotation_tool)
        .bind(&model.file_name)
        .bind(&model.file_link)
        .bind(&model.growth_data)
        .bind(&model.growth_file)
        .bind(&model.biomass_file_5mm)
        .bind(&model.biomass_file_20mm)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            tracing::error!(file_link = %model.file_link, error = %err, "model insert failed");
            DbError::from(err)
        })?;

        let id = result.last_insert_rowid();
        tracing::info!(id, "model record inserted");
        Ok(id)
    }
}

/// Decode rows into records, dropping (and logging) rows of the wrong shape.
fn decode_records(rows: &[SqliteRow]) -> Vec<ModelRecord> {
    rows.iter()
        .filter_map(|row| match ModelRecord::from_row(row) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed gapfill_models row");
                None
            }
        })
        .collect()
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
