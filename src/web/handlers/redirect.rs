//! Handler for the redirect page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use url::form_urlencoded;

use crate::error::AppError;
use crate::state::AppState;

/// Template for the redirect page.
///
/// Renders `templates/redirect.html`: the caption image, a countdown, and a
/// meta refresh to the destination URL.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate {
    pub url: String,
    pub contexto: String,
    /// `None` when the link has no caption to render.
    pub image_src: Option<String>,
    pub delay_seconds: u64,
}

/// Resolves `key` and renders the redirect page.
///
/// # Endpoint
///
/// `GET /redirect/{key}`
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 on storage failure.
pub async fn redirect_page_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<RedirectTemplate, AppError> {
    let link = state.link_service.resolve(&key).await?;

    let image_src = link.has_caption().then(|| caption_image_src(&link.contexto));

    Ok(RedirectTemplate {
        url: link.url,
        contexto: link.contexto,
        image_src,
        delay_seconds: state.redirect_delay_seconds,
    })
}

/// Path of the generated caption image for `contexto`.
pub fn caption_image_src(contexto: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(contexto.as_bytes()).collect();
    format!("/api/generate-image?text={}", encoded)
}
