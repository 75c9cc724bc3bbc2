//! HTML pages

pub mod templates;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Datelike;
use tera::Context;

/// Context every page starts from; carries `current_year` for the footer.
pub fn page_context() -> Context {
    let mut context = Context::new();
    context.insert("current_year", &chrono::Local::now().year());
    context
}

/// Render a page, or a plain 500 if the template fails.
pub fn render_page(name: &str, context: &Context) -> Response {
    match templates::render(name, context) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(template = name, error = ?err, "template render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected server error occurred while rendering the page.",
            )
                .into_response()
        }
    }
}
