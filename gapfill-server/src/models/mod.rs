//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod file_name;
pub mod file_kind;
pub mod growth_filter;
pub mod model;

pub use validation::ValidationError;
pub use file_name::SafeFileName;
pub use file_kind::{upload_subdirs, ModelFormat, SideFile, ALLOWED_EXTENSIONS, PRIMARY_FIELD};
pub use growth_filter::{GrowthFilter, GROWTH_OUTCOME};
pub use model::{ModelRecord, NewModel, DEFAULT_SPECIES};
