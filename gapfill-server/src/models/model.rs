//! Model catalogue records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Species recorded for every uploaded model.
pub const DEFAULT_SPECIES: &str = "P.simiae";

/// Row of `gapfill_models`, serialized as a column-name keyed object
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: i64,
    pub species_name: String,
    pub growth_media: Option<String>,
    pub gapfill_algorithm: Option<String>,
    pub annotation_tool: Option<String>,
    pub file_name: String,
    /// Path of the primary file relative to the upload root
    pub file_link: String,
    pub growth_data: Option<String>,
    pub growth_file: Option<String>,
    #[sqlx(rename = "biomass_file_5mM")]
    #[serde(rename = "biomass_file_5mM")]
    pub biomass_file_5mm: Option<String>,
    #[sqlx(rename = "biomass_file_20mM")]
    #[serde(rename = "biomass_file_20mM")]
    pub biomass_file_20mm: Option<String>,
}

/// Metadata for a model about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewModel {
    pub species_name: String,
    pub growth_media: Option<String>,
    pub gapfill_algorithm: Option<String>,
    pub annotation_tool: Option<String>,
    pub file_name: String,
    pub file_link: String,
    pub growth_data: Option<String>,
    pub growth_file: Option<String>,
    pub biomass_file_5mm: Option<String>,
    pub biomass_file_20mm: Option<String>,
}

impl NewModel {
    /// Start a record for a saved primary file; everything else is unset.
    pub fn for_file(file_name: impl Into<String>, file_link: impl Into<String>) -> Self {
        Self {
            species_name: DEFAULT_SPECIES.to_owned(),
            growth_media: None,
            gapfill_algorithm: None,
            annotation_tool: None,
            file_name: file_name.into(),
            file_link: file_link.into(),
            growth_data: None,
            growth_file: None,
            biomass_file_5mm: None,
            biomass_file_20mm: None,
        }
    }
}
