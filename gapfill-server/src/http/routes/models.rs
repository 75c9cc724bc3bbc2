//! Model catalogue JSON API

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::db::ModelRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ModelRecord;
use crate::upload::{create_model, UploadForm};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: i64,
    pub file_name: String,
    pub message: &'static str,
}

/// GET /api/models - every model, newest first
#[instrument(skip(state))]
async fn list_models(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ModelRecord>>, ApiError> {
    let models = ModelRepo::new(&state.db).list(None).await?;
    tracing::debug!(count = models.len(), "listed models");
    Ok(Json(models))
}

/// POST /api/models - upload a model file with optional side files
#[instrument(skip_all)]
async fn upload_model(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let multipart = multipart.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    let form = UploadForm::from_multipart(multipart).await?;
    let created = create_model(&state.db, &state.uploads, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: created.id,
            file_name: created.file_name,
            message: "Upload successful.",
        }),
    ))
}

/// Model API routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/models", get(list_models).post(upload_model))
}
