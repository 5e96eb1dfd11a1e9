//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /redirect/{key}` - Redirect page (public)
//! - `GET  /health`         - Health check: storage and template (public)
//! - `GET|POST /link`       - Link creation form (rate limited)
//! - `/api/*`               - Image and link API (rate limited)
//! - `/assets/*`            - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on writes and image rendering
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Directory served under `/assets`.
pub const ASSETS_DIR: &str = "assets";

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer address, so the returned service must
/// be served with connect info (see [`crate::server::run`]).
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::routes().layer(rate_limit::layer());

    let web_router = Router::new()
        .merge(web::routes::public_routes())
        .merge(web::routes::form_routes().layer(rate_limit::layer()));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web_router)
        .nest_service("/assets", ServeDir::new(ASSETS_DIR))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
