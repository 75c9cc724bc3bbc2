//! Fixed read-only queries for the demo page

use crate::db::rows::{rows_to_maps, RowMap};
use crate::db::{Database, DbError};

/// The example queries shown on the demo page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoQuery {
    MetabolicReactions,
    GapFillResults,
    ExperimentalConditions,
}

impl DemoQuery {
    pub const ALL: [DemoQuery; 3] = [
        Self::MetabolicReactions,
        Self::GapFillResults,
        Self::ExperimentalConditions,
    ];

    fn sql(&self) -> &'static str {
        match self {
            Self::MetabolicReactions => {
                "SELECT reaction_id, reaction_name, metabolites, flux_value \
                 FROM metabolic_reactions WHERE organism_id = ?"
            }
            Self::GapFillResults => {
                "SELECT model_id, reaction_id, reaction_name, source_database \
                 FROM gap_filling_results WHERE model_id = ?"
            }
            Self::ExperimentalConditions => {
                "SELECT experiment_id, media_composition, temperature, growth_outcome \
                 FROM experimental_conditions WHERE experiment_id = ?"
            }
        }
    }

    /// Fixed predicate value.
    fn key(&self) -> &'static str {
        match self {
            Self::MetabolicReactions => "Ecoli_K12",
            Self::GapFillResults => "Model_123",
            Self::ExperimentalConditions => "Exp_20250321",
        }
    }

    /// Template variable holding this query's rows.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MetabolicReactions => "metabolic_reactions",
            Self::GapFillResults => "gapfill_reactions",
            Self::ExperimentalConditions => "experiments",
        }
    }
}

/// Demo query repository
pub struct DemoRepo<'a> {
    db: &'a Database,
}

impl<'a> DemoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Run one demo query.
    pub async fn run(&self, query: DemoQuery) -> Result<Vec<RowMap>, DbError> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query(query.sql())
            .bind(query.key())
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows_to_maps(&rows, query.label()))
    }

    /// Run one demo query, logging a failure and returning no rows instead.
    pub async fn run_or_empty(&self, query: DemoQuery) -> Vec<RowMap> {
        match self.run(query).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(query = query.label(), error = %err, "demo query failed");
                Vec::new()
            }
        }
    }
}
