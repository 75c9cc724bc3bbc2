//! Model upload: multipart parsing and the save-then-insert transaction

pub mod form;
pub mod transaction;

pub use form::{UploadForm, UploadedFile};
pub use transaction::{create_model, CreatedModel, UploadError};
