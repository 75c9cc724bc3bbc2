//! HTML pages: latest models, search, demo queries and static info pages
//!
//! Database failures never fail these pages; they render with an error
//! message or empty tables instead.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::db::{DemoQuery, DemoRepo, ModelRepo};
use crate::http::server::AppState;
use crate::models::{GrowthFilter, ModelRecord};
use crate::web::{page_context, render_page};

/// Models shown on the home page.
const LATEST_COUNT: u32 = 5;

/// Informational pages: route and template.
const INFO_PAGES: [(&str, &str); 5] = [
    ("/about", "about.html"),
    ("/help", "help.html"),
    ("/intro", "intro.html"),
    ("/linked_databases", "linked_databases.html"),
    ("/visualization", "visualization.html"),
];

/// POST /search form
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub media_search: String,
    pub growth_filter: Option<String>,
}

/// GET / - the most recent uploads
async fn index(State(state): State<Arc<AppState>>) -> Response {
    let (models, error_message) = match ModelRepo::new(&state.db).latest(LATEST_COUNT).await {
        Ok(models) => {
            tracing::info!(count = models.len(), "retrieved models for index");
            (models, None)
        }
        Err(err) => {
            tracing::error!(error = %err, "could not load latest models");
            (
                Vec::new(),
                Some(
                    "Database connection or query error retrieving models. Please try again later."
                        .to_owned(),
                ),
            )
        }
    };

    let mut context = page_context();
    context.insert("search_results", &models);
    context.insert("growth_filter", GrowthFilter::All.as_str());
    context.insert("error_message", &error_message);
    render_page("index.html", &context)
}

/// POST /search - models by growth medium and outcome
///
/// A body that is not a readable form searches with empty fields.
async fn search(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "search form unreadable, using defaults");
            SearchForm::default()
        }
    };
    let term = form.media_search.trim();
    let filter = GrowthFilter::from_form(form.growth_filter.as_deref());

    let (models, error_message): (Vec<ModelRecord>, Option<String>) =
        match ModelRepo::new(&state.db).search(term, filter).await {
            Ok(models) => {
                tracing::info!(term, %filter, count = models.len(), "search completed");
                (models, None)
            }
            Err(err) => {
                tracing::error!(term, %filter, error = %err, "search failed");
                let message =
                    format!("Database error during search for '{term}'. Please try again later.");
                (Vec::new(), Some(message))
            }
        };

    let mut context = page_context();
    context.insert("search_results", &models);
    context.insert("media_search", term);
    context.insert("growth_filter", filter.as_str());
    context.insert("error_message", &error_message);
    render_page("index.html", &context)
}

/// GET /demo - fixed example queries, each allowed to fail on its own
async fn demo(State(state): State<Arc<AppState>>) -> Response {
    let repo = DemoRepo::new(&state.db);

    let mut context = page_context();
    for query in DemoQuery::ALL {
        let rows = repo.run_or_empty(query).await;
        context.insert(query.label(), &rows);
    }
    render_page("demo.html", &context)
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/demo", get(demo));

    for (path, template) in INFO_PAGES {
        router = router.route(
            path,
            get(move || async move {
                tracing::debug!(template, "rendering info page");
                render_page(template, &page_context())
            }),
        );
    }

    router
}
