//! Scope guard for files written during one upload attempt
//!
//! Every file created by an attempt is tracked here. Unless the attempt
//! reaches [`SavedFiles::commit`], dropping the guard deletes whatever it
//! tracked, so an early `?` return cannot leave orphaned files behind.

use std::io;
use std::path::{Path, PathBuf};

/// Files written by the current upload attempt
#[derive(Debug, Default)]
pub struct SavedFiles {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl SavedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path this attempt created.
    pub fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Keep the files; the upload succeeded.
    pub fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.paths)
    }

    /// Guard previously committed paths again, for a commit that failed.
    pub fn rearm(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            committed: false,
        }
    }
}

impl Drop for SavedFiles {
    fn drop(&mut self) {
        if self.committed || self.paths.is_empty() {
            return;
        }

        tracing::warn!(count = self.paths.len(), "removing files saved by failed upload");
        for path in &self.paths {
            remove_if_file(path);
        }
    }
}

/// Best-effort removal; failures are logged, never raised.
fn remove_if_file(path: &Path) {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_file() => match std::fs::remove_file(path) {
            Ok(()) => tracing::info!(path = %path.display(), "cleaned up file"),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "could not delete file during cleanup")
            }
        },
        Ok(_) => tracing::warn!(
            path = %path.display(),
            "cleanup skipped: path exists but is not a file"
        ),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "cleanup target already gone")
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "could not inspect file during cleanup")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_removes_tracked_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        let b = dir.path().join("b.tsv");
        std::fs::write(&a, b"<sbml/>").unwrap();
        std::fs::write(&b, b"x\ty").unwrap();

        {
            let mut saved = SavedFiles::new();
            saved.track(a.clone());
            saved.track(b.clone());
        }

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn commit_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        std::fs::write(&a, b"<sbml/>").unwrap();

        let mut saved = SavedFiles::new();
        saved.track(a.clone());
        let kept = saved.commit();

        assert_eq!(kept, vec![a.clone()]);
        assert!(a.exists());
    }

    #[test]
    fn rearmed_paths_are_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xml");
        std::fs::write(&a, b"<sbml/>").unwrap();

        let mut saved = SavedFiles::new();
        saved.track(a.clone());
        let kept = saved.commit();
        assert!(a.exists());

        drop(SavedFiles::rearm(kept));
        assert!(!a.exists());
    }

    #[test]
    fn cleanup_tolerates_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("20mM");
        std::fs::create_dir(&sub).unwrap();

        {
            let mut saved = SavedFiles::new();
            saved.track(dir.path().join("never-written.tsv"));
            saved.track(sub.clone());
        }

        assert!(sub.is_dir());
    }
}
