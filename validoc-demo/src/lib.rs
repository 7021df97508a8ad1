//! Demo service: validated, documented endpoints on top of `validoc`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod state;
pub mod views;

use axum::response::Redirect;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use validoc::{DocsConfig, Router};

use state::AppState;
use views::UserApi;

/// The `/api` routes, before state and docs are attached.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/predict/{source}/{target}", validoc::post!(handlers::predict))
        .route("/header", validoc::post!(handlers::with_code_header))
        .route("/file_upload", validoc::post!(handlers::with_file))
        .view("/user", UserApi)
}

/// The full application: API routes, docs endpoints and request tracing.
pub fn app(state: AppState, docs: DocsConfig) -> axum::Router {
    let swagger = docs.url("swagger");

    Router::new()
        .nest("/api", api_routes())
        .with_docs(docs)
        .with_state(state)
        .finish()
        .route(
            "/",
            get(move || {
                let swagger = swagger.clone();
                async move { Redirect::temporary(&swagger) }
            }),
        )
        .layer(TraceLayer::new_for_http())
}
