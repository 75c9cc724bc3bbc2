//! Upload file kinds and their fixed subdirectories

use super::{SafeFileName, ValidationError};

/// Multipart field carrying the primary model file.
pub const PRIMARY_FIELD: &str = "modelUpload";

/// Extensions accepted for the primary model file.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".xml", ".tsv"];

/// Format of the primary model file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Xml,
    Tsv,
}

impl ModelFormat {
    /// Pick the format from a sanitized filename.
    pub fn from_file_name(name: &SafeFileName) -> Result<Self, ValidationError> {
        match name.extension().as_str() {
            ".xml" => Ok(Self::Xml),
            ".tsv" => Ok(Self::Tsv),
            other => Err(ValidationError::UnsupportedExtension {
                extension: other.to_owned(),
                allowed: ALLOWED_EXTENSIONS,
            }),
        }
    }

    /// Subdirectory of the upload root holding files of this format.
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Xml => "xml_files",
            Self::Tsv => "main_tsv_files",
        }
    }
}

/// Optional TSV side file attached to a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideFile {
    Growth,
    Biomass5mM,
    Biomass20mM,
}

impl SideFile {
    pub const ALL: [SideFile; 3] = [Self::Growth, Self::Biomass5mM, Self::Biomass20mM];

    /// Multipart field name.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Growth => "growth_file_upload",
            Self::Biomass5mM => "biomass_5mM_upload",
            Self::Biomass20mM => "biomass_20mM_upload",
        }
    }

    /// Subdirectory of the upload root.
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Growth => "growth_file",
            Self::Biomass5mM => "5mM",
            Self::Biomass20mM => "20mM",
        }
    }

    /// Column storing the relative path.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Growth => "growth_file",
            Self::Biomass5mM => "biomass_file_5mM",
            Self::Biomass20mM => "biomass_file_20mM",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Side files must be TSV.
    pub fn accepts(&self, name: &SafeFileName) -> bool {
        name.extension() == ".tsv"
    }
}

/// Every subdirectory the upload tree is expected to contain.
pub fn upload_subdirs() -> impl Iterator<Item = &'static str> {
    [ModelFormat::Xml.subdir(), ModelFormat::Tsv.subdir()]
        .into_iter()
        .chain(SideFile::ALL.into_iter().map(|kind| kind.subdir()))
}
