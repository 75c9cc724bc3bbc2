//! Liveness endpoint

use axum::{routing::get, Router};

/// GET /ping
async fn ping() -> &'static str {
    "pong"
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/ping", get(ping))
}
