//! DTOs for link creation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Form fields accepted by link creation (API and web form).
///
/// Missing fields deserialize as empty strings so they are reported as
/// validation errors rather than extractor rejections.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateLinkForm {
    /// Destination URL. Stored as given.
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Caption rendered on the redirect page.
    #[serde(default)]
    #[validate(length(min = 1, message = "Contexto is required"))]
    pub contexto: String,
}

/// Successful link creation result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub key: String,
    pub short_url: String,
    pub original_url: String,
}
