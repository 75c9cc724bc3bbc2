//! Multipart upload form

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};

use crate::models::{SideFile, PRIMARY_FIELD};

/// One file part of the upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, unsanitized; empty when none was sent
    pub file_name: String,
    pub bytes: Bytes,
}

/// Parsed upload request
#[derive(Debug, Default)]
pub struct UploadForm {
    pub primary: Option<UploadedFile>,
    pub side_files: Vec<(SideFile, UploadedFile)>,
    pub growth_media: Option<String>,
    pub gapfill_algorithm: Option<String>,
    pub annotation_tool: Option<String>,
    pub growth_data: Option<String>,
}

impl UploadForm {
    /// Read every part of the request.
    ///
    /// The first part of each known name wins; unknown parts are drained and
    /// ignored. Blank text fields come back as `None`.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();

            if name == PRIMARY_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                if form.primary.is_none() {
                    form.primary = Some(UploadedFile { file_name, bytes });
                }
                continue;
            }

            if let Some(kind) = SideFile::from_field(&name) {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                if form.side_file(kind).is_none() {
                    form.side_files.push((kind, UploadedFile { file_name, bytes }));
                }
                continue;
            }

            let slot = match name.as_str() {
                "growth_media" => &mut form.growth_media,
                "gapfill_algorithm" => &mut form.gapfill_algorithm,
                "annotation_tool" => &mut form.annotation_tool,
                "growth_data" => &mut form.growth_data,
                _ => {
                    tracing::debug!(field = %name, "ignoring unknown upload field");
                    field.bytes().await?;
                    continue;
                }
            };
            let value = field.text().await?;
            if slot.is_none() {
                *slot = non_blank(value);
            }
        }

        Ok(form)
    }

    /// File sent for the given side-file slot, if any.
    pub fn side_file(&self, kind: SideFile) -> Option<&UploadedFile> {
        self.side_files
            .iter()
            .find(|(sent, _)| *sent == kind)
            .map(|(_, file)| file)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
