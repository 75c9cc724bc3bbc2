//! On-disk storage of uploaded model files

pub mod saved;
pub mod upload_root;

pub use saved::SavedFiles;
pub use upload_root::{normalize_relative, DownloadError, DownloadTarget, UploadRoot};
