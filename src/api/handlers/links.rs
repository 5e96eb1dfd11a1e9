//! Handler for the link creation endpoint.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkForm, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link from form fields.
///
/// # Endpoint
///
/// `POST /api/links` (`application/x-www-form-urlencoded`)
///
/// # Request Body
///
/// ```text
/// url=https%3A%2F%2Fexample.com&contexto=hello
/// ```
///
/// # Response
///
/// ```json
/// {
///   "key": "k3x9aa",
///   "shortUrl": "https://taqui.example/redirect/k3x9aa",
///   "originalUrl": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `url` or `contexto` is missing or empty, or if
/// the body is not a decodable url-encoded form.
/// Returns 500 on storage failure.
pub async fn create_link_handler(
    State(state): State<AppState>,
    form: Result<Form<CreateLinkForm>, FormRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Form(form) = form?;
    form.validate()?;

    let link = state
        .link_service
        .create_link(&form.url, &form.contexto)
        .await?;

    let short_url = state.link_service.short_url(&link.key);

    Ok(Json(CreateLinkResponse {
        key: link.key,
        short_url,
        original_url: link.url,
    }))
}
