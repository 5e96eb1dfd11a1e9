//! DTOs for the caption image endpoint.

use serde::Deserialize;
use validator::Validate;

/// Query string of `GET /api/generate-image`.
///
/// A missing `text` parameter deserializes as empty and fails validation.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateImageQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Query parameter 'text' is required"))]
    pub text: String,
}
