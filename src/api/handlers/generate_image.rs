//! Handler for the caption image endpoint.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::image::GenerateImageQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Renders the caption over the template image.
///
/// # Endpoint
///
/// `GET /api/generate-image?text=<caption>`
///
/// # Response
///
/// `200 OK` with `Content-Type: image/png` and the composited image bytes.
///
/// # Errors
///
/// Returns 400 Bad Request if `text` is missing or empty.
/// Returns 500 if the template image cannot be loaded.
pub async fn generate_image_handler(
    State(state): State<AppState>,
    query: Result<Query<GenerateImageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let compositor = state.compositor.clone();
    let text = query.text;

    let png = tokio::task::spawn_blocking(move || compositor.compose(&text))
        .await
        .map_err(|e| {
            AppError::internal("Image rendering task failed", json!({ "reason": e.to_string() }))
        })??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        png,
    ))
}
