//! Uploaded file downloads

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::Response,
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /download/{*path} - stream a stored file as an attachment
async fn download(
    State(state): State<Arc<AppState>>,
    Path(requested): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let target = state.uploads.open_download(&requested).await.map_err(|err| {
        tracing::warn!(path = %requested, error = %err, "download refused");
        err
    })?;

    let response = match ServeFile::new(&target.path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let mut response = response.map(Body::new);

    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, attachment(&target.file_name));

    tracing::info!(path = %target.path.display(), "file sent");
    Ok(response)
}

/// `Content-Disposition` value naming `file_name` as an attachment.
///
/// Quotes and backslashes are escaped inside the quoted-string; a name the
/// header cannot carry falls back to a bare `attachment`.
fn attachment(file_name: &str) -> HeaderValue {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("attachment; filename=\"{escaped}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Download routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/download/{*path}", get(download))
}
