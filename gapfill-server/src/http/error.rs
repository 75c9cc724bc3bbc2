//! API error types with IntoResponse
//!
//! Every error becomes `{ "error": message }` with a matching status code.
//! Internal detail is logged here and never sent to the client.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::storage::DownloadError;
use crate::upload::UploadError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request was understood but refused (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Resource already exists (409)
    Conflict { message: String },

    /// Body could not be read; carries the extractor's status (400/413)
    Rejected { status: StatusCode, message: String },

    /// Database unreachable (503)
    Unavailable { message: String },

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Rejected { status, .. } => *status,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Rejected { message, .. }
            | Self::Unavailable { message }
            | Self::Internal { message } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), message = %self.message(), "request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            e if e.is_integrity() => Self::BadRequest {
                message: e.to_string(),
            },
            DbError::Connection(ref source) => {
                tracing::error!(error = %source, "database connection error");
                Self::Unavailable {
                    message: "Database connection error.".into(),
                }
            }
            other => {
                tracing::error!(error = %other, "database error");
                Self::Internal {
                    message: "Database operation failed.".into(),
                }
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        tracing::warn!(error = %e, "multipart request rejected");
        Self::Rejected {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Validation(e) => e.into(),
            UploadError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            UploadError::Io { ref source, .. } => {
                tracing::error!(error = %source, "upload write failed");
                Self::Internal {
                    message: e.to_string(),
                }
            }
            UploadError::Store(e) => e.into(),
            UploadError::Multipart(e) => e.into(),
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(e: DownloadError) -> Self {
        match e {
            DownloadError::InvalidPath | DownloadError::IsDirectory => Self::BadRequest {
                message: e.to_string(),
            },
            DownloadError::NotFound => Self::NotFound {
                message: e.to_string(),
            },
            DownloadError::PermissionDenied => Self::Internal {
                message: e.to_string(),
            },
            DownloadError::Io(ref source) => {
                tracing::error!(error = %source, "download failed");
                Self::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(ValidationError::MissingField {
            field: "modelUpload",
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No 'modelUpload' file part provided.");
    }

    #[tokio::test]
    async fn constraint_errors_are_400_with_message() {
        let err = ApiError::from(DbError::NotNull {
            column: "growth_media".into(),
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Database Constraint Error: 'growth_media' cannot be empty."
        );

        let (status, body) = body_of(ApiError::from(DbError::Duplicate)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Database Constraint Error: Duplicate entry detected."
        );
    }

    #[tokio::test]
    async fn database_errors_hide_driver_text() {
        let unavailable = ApiError::from(DbError::Connection(sqlx::Error::PoolTimedOut));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) =
            body_of(ApiError::from(DbError::Query(sqlx::Error::RowNotFound))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database operation failed.");
    }

    #[tokio::test]
    async fn upload_errors_map_to_statuses() {
        let conflict = ApiError::from(UploadError::Conflict {
            file_name: "m.xml".into(),
            file_link: "xml_files/m.xml".into(),
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let io = ApiError::from(UploadError::Io {
            what: "main model file",
            source: std::io::Error::other("disk full"),
        });
        let (status, body) = body_of(io).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to save main model file.");
    }

    #[tokio::test]
    async fn download_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(DownloadError::InvalidPath).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DownloadError::IsDirectory).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DownloadError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DownloadError::PermissionDenied).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
