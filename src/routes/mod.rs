use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod pix;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().merge(pix::router())
}

/// Full application: API, health, docs, and the storefront pages. Any GET the
/// other routes do not match is answered with `index.html`, including GETs on
/// the POST-only API paths.
pub fn create_app(state: AppState, static_dir: &Path) -> Router {
    let landing = ServeFile::new(static_dir.join("index.html"));
    let pages = ServeDir::new(static_dir).fallback(landing.clone());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .method_not_allowed_fallback(move |request: Request| landing_page(landing.clone(), request))
        .fallback_service(pages)
        .with_state(state)
}

async fn landing_page(landing: ServeFile, request: Request) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    landing.oneshot(request).await.into_response()
}
