//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{link_form_handler, link_form_submit_handler, redirect_page_handler};
use axum::{Router, routing::get};

/// Pages that only read storage.
///
/// # Endpoints
///
/// - `GET /redirect/{key}` - Caption image, then navigation to the destination
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/redirect/{key}", get(redirect_page_handler))
}

/// Link creation form; write access, rate limited by the caller.
///
/// # Endpoints
///
/// - `GET  /link` - Empty form
/// - `POST /link` - Submit the form, re-render with the result
pub fn form_routes() -> Router<AppState> {
    Router::new().route(
        "/link",
        get(link_form_handler).post(link_form_submit_handler),
    )
}
