//! Schema bootstrap
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements for the catalogue table
//! and the three example tables read by the demo page. There is no versioning;
//! an existing table is left untouched.

use super::{Database, DbError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS gapfill_models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    species_name TEXT NOT NULL DEFAULT 'P.simiae',
    growth_media TEXT NOT NULL,
    gapfill_algorithm TEXT,
    annotation_tool TEXT,
    file_name TEXT NOT NULL,
    file_link TEXT NOT NULL UNIQUE,
    growth_data TEXT,
    growth_file TEXT,
    biomass_file_5mM TEXT,
    biomass_file_20mM TEXT
);

CREATE INDEX IF NOT EXISTS idx_gapfill_models_growth_media
    ON gapfill_models (growth_media);

CREATE TABLE IF NOT EXISTS metabolic_reactions (
    reaction_id TEXT NOT NULL,
    organism_id TEXT NOT NULL,
    reaction_name TEXT,
    metabolites TEXT,
    flux_value REAL,
    PRIMARY KEY (organism_id, reaction_id)
);

CREATE TABLE IF NOT EXISTS gap_filling_results (
    model_id TEXT NOT NULL,
    reaction_id TEXT NOT NULL,
    reaction_name TEXT,
    source_database TEXT,
    PRIMARY KEY (model_id, reaction_id)
);

CREATE TABLE IF NOT EXISTS experimental_conditions (
    experiment_id TEXT PRIMARY KEY,
    media_composition TEXT,
    temperature REAL,
    growth_outcome TEXT
);
"#;

const DEMO_ROWS: &str = r#"
INSERT OR IGNORE INTO metabolic_reactions
    (reaction_id, organism_id, reaction_name, metabolites, flux_value)
VALUES
    ('PGI', 'Ecoli_K12', 'glucose-6-phosphate isomerase', 'g6p_c <=> f6p_c', 4.86),
    ('PFK', 'Ecoli_K12', 'phosphofructokinase', 'atp_c + f6p_c --> adp_c + fdp_c + h_c', 7.48),
    ('CS', 'Ecoli_K12', 'citrate synthase', 'accoa_c + h2o_c + oaa_c --> cit_c + coa_c + h_c', 6.01);

INSERT OR IGNORE INTO gap_filling_results
    (model_id, reaction_id, reaction_name, source_database)
VALUES
    ('Model_123', 'rxn00148', 'ATP:pyruvate 2-O-phosphotransferase', 'ModelSEED'),
    ('Model_123', 'R00200', 'pyruvate kinase', 'KEGG');

INSERT OR IGNORE INTO experimental_conditions
    (experiment_id, media_composition, temperature, growth_outcome)
VALUES
    ('Exp_20250321', 'M9 + 20 mM glucose', 30.0, 'Growth');
"#;

/// Create every table the server reads or writes.
pub async fn ensure_schema(db: &Database) -> Result<(), DbError> {
    sqlx::raw_sql(SCHEMA).execute(db.pool()).await?;
    tracing::info!("database schema ready");
    Ok(())
}

/// Insert the fixed example rows selected by the demo page.
pub async fn seed_demo_rows(db: &Database) -> Result<(), DbError> {
    sqlx::raw_sql(DEMO_ROWS).execute(db.pool()).await?;
    tracing::info!("demo rows seeded");
    Ok(())
}
