//! Model upload transaction
//!
//! Validate the primary file, save it and any side files, then insert the
//! record in one database transaction. Files saved by a failed attempt are
//! removed when the [`SavedFiles`] guard drops.

use std::io;

use axum::extract::multipart::MultipartError;
use sqlx::Connection;

use super::form::{UploadForm, UploadedFile};
use crate::db::{Database, DbError, ModelRepo};
use crate::models::{
    ModelFormat, NewModel, SafeFileName, SideFile, ValidationError, PRIMARY_FIELD,
};
use crate::storage::{SavedFiles, UploadRoot};

/// Upload failure
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Main file '{file_name}' already exists at '{file_link}'. Upload cancelled.")]
    Conflict { file_name: String, file_link: String },

    #[error("Failed to save {what}.")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] DbError),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
}

/// Result of a committed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedModel {
    pub id: i64,
    pub file_name: String,
    pub file_link: String,
}

/// Run the full upload: save files, insert the record, commit.
pub async fn create_model(
    db: &Database,
    root: &UploadRoot,
    form: UploadForm,
) -> Result<CreatedModel, UploadError> {
    let primary = form.primary.as_ref().ok_or(ValidationError::MissingField {
        field: PRIMARY_FIELD,
    })?;
    if primary.file_name.is_empty() {
        return Err(ValidationError::EmptyFileName {
            field: PRIMARY_FIELD,
        }
        .into());
    }
    let file_name = SafeFileName::new(&primary.file_name, PRIMARY_FIELD)?;
    let format = ModelFormat::from_file_name(&file_name)?;
    let file_link = UploadRoot::relative_path(format.subdir(), &file_name);

    let mut saved = SavedFiles::new();

    match root.write_new(&file_link, &primary.bytes, &mut saved).await {
        Ok(_) => tracing::info!(%file_link, "main model file saved"),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            tracing::warn!(%file_link, "main model file already exists");
            return Err(UploadError::Conflict {
                file_name: file_name.into_string(),
                file_link,
            });
        }
        Err(source) => {
            return Err(UploadError::Io {
                what: "main model file",
                source,
            })
        }
    }

    let mut model = NewModel::for_file(file_name.as_str(), file_link.as_str());
    model.growth_media = form.growth_media.clone();
    model.gapfill_algorithm = form.gapfill_algorithm.clone();
    model.annotation_tool = form.annotation_tool.clone();
    model.growth_data = form.growth_data.clone();

    for kind in SideFile::ALL {
        let Some(file) = form.side_file(kind) else {
            continue;
        };
        let link = save_side_file(root, kind, file, &mut saved).await?;
        match kind {
            SideFile::Growth => model.growth_file = link,
            SideFile::Biomass5mM => model.biomass_file_5mm = link,
            SideFile::Biomass20mM => model.biomass_file_20mm = link,
        }
    }

    let id = insert_record(db, &model, saved).await?;

    Ok(CreatedModel {
        id,
        file_name: model.file_name,
        file_link: model.file_link,
    })
}

/// Save one side file and return its stored path.
///
/// Unusable names are skipped (`Ok(None)`). A regular file already at the
/// destination is reused as-is and not tracked for cleanup; anything else
/// occupying the destination is a save failure.
async fn save_side_file(
    root: &UploadRoot,
    kind: SideFile,
    file: &UploadedFile,
    saved: &mut SavedFiles,
) -> Result<Option<String>, UploadError> {
    if file.file_name.is_empty() {
        tracing::debug!(field = kind.field(), "side file part has no filename");
        return Ok(None);
    }

    let name = match SafeFileName::new(&file.file_name, kind.field()) {
        Ok(name) => name,
        Err(err) => {
            tracing::warn!(field = kind.field(), error = %err, "skipping side file");
            return Ok(None);
        }
    };
    if !kind.accepts(&name) {
        tracing::warn!(field = kind.field(), file = %name, "side file is not .tsv, skipping");
        return Ok(None);
    }

    let link = UploadRoot::relative_path(kind.subdir(), &name);
    match root.write_new(&link, &file.bytes, saved).await {
        Ok(_) => tracing::info!(column = kind.column(), %link, "side file saved"),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            if !root.holds_file(&link).await {
                tracing::error!(field = kind.field(), %link, "side file destination is not a regular file");
                return Err(UploadError::Io {
                    what: "optional side file",
                    source: err,
                });
            }
            tracing::warn!(column = kind.column(), %link, "side file already exists, using existing path");
        }
        Err(source) => {
            tracing::error!(field = kind.field(), %link, error = %source, "side file save failed");
            return Err(UploadError::Io {
                what: "optional side file",
                source,
            });
        }
    }

    Ok(Some(link))
}

/// Insert the record and settle the saved files.
///
/// The guard is defused before the commit is awaited: once the commit may
/// have landed, the files it references are never removed. A commit that
/// reports failure re-arms the cleanup.
async fn insert_record(
    db: &Database,
    model: &NewModel,
    saved: SavedFiles,
) -> Result<i64, DbError> {
    let mut conn = db.acquire().await?;
    let mut tx = conn.begin().await.map_err(DbError::from)?;

    let id = match ModelRepo::insert(&mut tx, model).await {
        Ok(id) => id,
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(error = %rollback, "rollback failed");
            }
            return Err(err);
        }
    };

    let kept = saved.commit();
    if let Err(err) = tx.commit().await {
        tracing::error!(id, error = %err, "commit failed");
        drop(SavedFiles::rearm(kept));
        return Err(err.into());
    }

    tracing::info!(id, file_link = %model.file_link, "upload committed");
    Ok(id)
}
