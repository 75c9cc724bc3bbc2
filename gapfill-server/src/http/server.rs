//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::CatalogConfig;
use crate::db::schema::ensure_schema;
use crate::db::{Database, DbError};
use crate::storage::UploadRoot;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: UploadRoot,
    pub config: CatalogConfig,
}

impl AppState {
    pub fn new(db: Database, config: CatalogConfig) -> Self {
        Self {
            uploads: UploadRoot::new(config.upload_root.clone()),
            db,
            config,
        }
    }

    /// Connect to the database, create missing tables and the upload tree.
    pub async fn prepare(config: CatalogConfig) -> Result<Self, ServerError> {
        let db = Database::connect(&config.database_url, config.max_connections).await?;
        ensure_schema(&db).await?;

        let state = Self::new(db, config);
        state.uploads.ensure_layout().await?;
        Ok(state)
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::pages::router())
        .merge(routes::models::router())
        .merge(routes::download::router())
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn cors_layer(config: &CatalogConfig) -> CorsLayer {
    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    let port = config.bind_addr.port();
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| format!("http://{host}:{port}").parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let config = CatalogConfig::from_env()?;
/// run_server(config).await?;
/// ```
pub async fn run_server(config: CatalogConfig) -> Result<(), ServerError> {
    let bind_addr = config.bind_addr;
    let state = AppState::prepare(config).await?;
    let db = state.db.clone();
    tracing::info!(
        upload_root = %state.uploads.path().display(),
        max_upload_bytes = state.config.max_upload_bytes,
        "catalogue ready"
    );

    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::with_paths(
            dir.path().join("uploads"),
            format!("sqlite://{}", dir.path().join("catalogue.db").display()),
        );
        let state = AppState::prepare(config).await.unwrap();
        (dir, build_router(state))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ping_endpoint() {
        let (_dir, app) = test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "pong");
    }

    #[tokio::test]
    async fn test_empty_catalogue() {
        let (_dir, app) = test_app().await;

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/models").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "[]");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No models found."));
    }

    #[tokio::test]
    async fn test_info_pages_render() {
        let (_dir, app) = test_app().await;

        for uri in ["/about", "/help", "/intro", "/linked_databases", "/visualization", "/demo"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_search_with_unknown_filter() {
        let (_dir, app) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("media_search=glucose&growth_filter=sometimes"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Results for \"glucose\""));
    }

    #[tokio::test]
    async fn test_upload_requires_multipart() {
        let (_dir, app) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/models")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("\"error\""));
    }

    #[test]
    fn default_cors_is_localhost_only() {
        let config = CatalogConfig::default();
        assert!(!config.cors_permissive);
        assert_eq!(config.bind_addr.port(), 5001);
        let _ = cors_layer(&config);
    }
}
