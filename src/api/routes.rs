//! API route configuration.

use crate::api::handlers::{create_link_handler, generate_image_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET  /generate-image` - Caption image (`?text=`)
/// - `POST /links`          - Create a short link from form fields
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-image", get(generate_image_handler))
        .route("/links", post(create_link_handler))
}
