//! Upload tree layout and path resolution
//!
//! Layout under the root:
//! - `xml_files/`, `main_tsv_files/`: primary model files
//! - `growth_file/`, `5mM/`, `20mM/`: optional TSV side files
//!
//! Stored paths are relative to the root and always use `/`.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::SavedFiles;
use crate::models::{upload_subdirs, SafeFileName};

/// Download resolution error
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Invalid file path.")]
    InvalidPath,

    #[error("File not found.")]
    NotFound,

    #[error("The requested path points to a directory, not a downloadable file.")]
    IsDirectory,

    #[error("Could not send file due to server permission error.")]
    PermissionDenied,

    #[error("Could not send file due to an internal server error.")]
    Io(#[source] io::Error),
}

/// A file ready to be streamed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub path: PathBuf,
    pub file_name: String,
}

/// Root directory of uploaded files
#[derive(Debug, Clone)]
pub struct UploadRoot {
    root: PathBuf,
}

impl UploadRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the root and every fixed subdirectory.
    pub async fn ensure_layout(&self) -> io::Result<()> {
        for subdir in upload_subdirs() {
            tokio::fs::create_dir_all(self.root.join(subdir)).await?;
        }
        tracing::info!(upload_root = %self.root.display(), "upload tree ready");
        Ok(())
    }

    /// Stored (relative) path for `name` inside `subdir`.
    pub fn relative_path(subdir: &str, name: &SafeFileName) -> String {
        format!("{}/{}", subdir, name.as_str())
    }

    /// Absolute location of a stored relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Write `contents` to a path that must not exist yet.
    ///
    /// The existence check and the creation are one `create_new` open, so
    /// two writers racing for the same name cannot both succeed. The path is
    /// tracked in `saved` as soon as it is created. Fails with
    /// [`io::ErrorKind::AlreadyExists`] only when the destination itself is
    /// taken; a parent directory that cannot be created is a plain I/O error.
    pub async fn write_new(
        &self,
        relative: &str,
        contents: &[u8],
        saved: &mut SavedFiles,
    ) -> io::Result<PathBuf> {
        let dest = self.absolute(relative);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                io::Error::other(format!(
                    "cannot create directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .await?;
        saved.track(dest.clone());

        file.write_all(contents).await?;
        file.flush().await?;
        tracing::debug!(path = %dest.display(), bytes = contents.len(), "file written");
        Ok(dest)
    }

    /// Whether a stored relative path is an existing regular file.
    pub async fn holds_file(&self, relative: &str) -> bool {
        tokio::fs::metadata(self.absolute(relative))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Resolve a client-requested relative path for download.
    ///
    /// The path is normalized lexically first; anything absolute or still
    /// climbing out with `..` is rejected before the filesystem is touched.
    pub async fn open_download(&self, requested: &str) -> Result<DownloadTarget, DownloadError> {
        let relative = normalize_relative(requested).ok_or(DownloadError::InvalidPath)?;
        let path = self.root.join(&relative);

        let meta = tokio::fs::metadata(&path).await.map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DownloadError::NotFound,
            io::ErrorKind::PermissionDenied => DownloadError::PermissionDenied,
            _ => DownloadError::Io(err),
        })?;
        if meta.is_dir() {
            return Err(DownloadError::IsDirectory);
        }

        let file_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(DownloadTarget { path, file_name })
    }
}

/// Lexically normalize a relative path.
///
/// Drops empty and `.` segments and folds `..` into the segment before it.
/// Returns `None` for absolute paths and for paths that would still contain
/// a `..` segment after folding.
pub fn normalize_relative(requested: &str) -> Option<PathBuf> {
    if requested.starts_with('/') || requested.starts_with('\\') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in requested.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return None;
                }
            }
            other => segments.push(other),
        }
    }

    Some(segments.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_use_forward_slash() {
        let name = SafeFileName::new("model1.xml", "modelUpload").unwrap();
        assert_eq!(UploadRoot::relative_path("xml_files", &name), "xml_files/model1.xml");

        let root = UploadRoot::new("/srv/uploads");
        assert_eq!(
            root.absolute("5mM/biomass.tsv"),
            PathBuf::from("/srv/uploads/5mM/biomass.tsv")
        );
    }

    #[test]
    fn normalizes_safe_paths() {
        assert_eq!(
            normalize_relative("xml_files/model1.xml"),
            Some(PathBuf::from("xml_files/model1.xml"))
        );
        assert_eq!(
            normalize_relative("xml_files/./sub/../model1.xml"),
            Some(PathBuf::from("xml_files/model1.xml"))
        );
        assert_eq!(normalize_relative("a//b"), Some(PathBuf::from("a/b")));
    }

    #[test]
    fn rejects_escaping_paths() {
        assert_eq!(normalize_relative("../../etc/passwd"), None);
        assert_eq!(normalize_relative("xml_files/../../secret"), None);
        assert_eq!(normalize_relative("/etc/passwd"), None);
        assert_eq!(normalize_relative("\\windows\\system32"), None);
    }

    #[tokio::test]
    async fn ensure_layout_creates_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(dir.path().join("uploads"));
        root.ensure_layout().await.unwrap();

        for subdir in ["xml_files", "main_tsv_files", "growth_file", "5mM", "20mM"] {
            assert!(root.path().join(subdir).is_dir(), "{subdir} missing");
        }
    }

    #[tokio::test]
    async fn write_new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(dir.path());
        let mut saved = SavedFiles::new();

        let path = root.write_new("xml_files/m.xml", b"<sbml/>", &mut saved).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<sbml/>");

        let err = root
            .write_new("xml_files/m.xml", b"other", &mut saved)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(saved.paths().len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), b"<sbml/>");

        saved.commit();
    }

    #[tokio::test]
    async fn blocked_parent_is_not_reported_as_existing() {
        let dir = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(dir.path());
        std::fs::write(dir.path().join("growth_file"), b"not a directory").unwrap();
        let mut saved = SavedFiles::new();

        let err = root
            .write_new("growth_file/g.tsv", b"t\tod", &mut saved)
            .await
            .unwrap_err();

        assert_ne!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(saved.paths().is_empty());
    }

    #[tokio::test]
    async fn holds_file_only_for_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(dir.path());
        root.ensure_layout().await.unwrap();
        std::fs::write(dir.path().join("5mM/b.tsv"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("5mM/nested.tsv")).unwrap();

        assert!(root.holds_file("5mM/b.tsv").await);
        assert!(!root.holds_file("5mM/nested.tsv").await);
        assert!(!root.holds_file("5mM/missing.tsv").await);
    }

    #[tokio::test]
    async fn open_download_classifies_targets() {
        let dir = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(dir.path());
        root.ensure_layout().await.unwrap();
        std::fs::write(dir.path().join("xml_files/m.xml"), b"<sbml/>").unwrap();

        let target = root.open_download("xml_files/m.xml").await.unwrap();
        assert_eq!(target.file_name, "m.xml");

        assert!(matches!(
            root.open_download("xml_files/missing.xml").await,
            Err(DownloadError::NotFound)
        ));
        assert!(matches!(
            root.open_download("xml_files").await,
            Err(DownloadError::IsDirectory)
        ));
        assert!(matches!(
            root.open_download("../outside.txt").await,
            Err(DownloadError::InvalidPath)
        ));
    }
}
