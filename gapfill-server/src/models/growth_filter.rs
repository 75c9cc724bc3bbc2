//! Growth-outcome filter for model search

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Value of `growth_data` that marks a model as growing on its medium.
pub const GROWTH_OUTCOME: &str = "Growth";

/// Which growth outcomes a search should return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthFilter {
    /// No growth predicate
    #[default]
    All,
    /// Only rows with `growth_data = 'Growth'`
    Growth,
    /// Rows whose `growth_data` is anything else, including NULL
    NoGrowth,
}

impl GrowthFilter {
    /// Parse a form value, treating unknown values as [`GrowthFilter::All`].
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(growth_filter = raw, "unknown growth filter, using 'all'");
                Self::All
            }),
        }
    }

    /// Form value for this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Growth => "growth",
            Self::NoGrowth => "no_growth",
        }
    }
}

impl FromStr for GrowthFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "growth" => Ok(Self::Growth),
            "no_growth" => Ok(Self::NoGrowth),
            other => Err(ValidationError::InvalidVariant {
                field: "growth_filter",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for GrowthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
