//! Link creation page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::links::CreateLinkForm;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the link creation page.
///
/// Renders `templates/link.html` with the form, and either the resulting
/// short URL or the validation message from the last submission.
#[derive(Template, WebTemplate)]
#[template(path = "link.html")]
pub struct LinkFormTemplate {
    pub url: String,
    pub contexto: String,
    pub short_url: Option<String>,
    pub error: Option<String>,
}

/// Renders the empty link form.
///
/// # Endpoint
///
/// `GET /link`
pub async fn link_form_handler() -> impl IntoResponse {
    LinkFormTemplate {
        url: String::new(),
        contexto: String::new(),
        short_url: None,
        error: None,
    }
}

/// Handles a form submission.
///
/// # Endpoint
///
/// `POST /link`
///
/// # Errors
///
/// Validation failures re-render the form with `400 Bad Request` and keep
/// the submitted values. Storage failures propagate as [`AppError`].
pub async fn link_form_submit_handler(
    State(state): State<AppState>,
    form: Result<Form<CreateLinkForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;

    match state
        .link_service
        .create_link(&form.url, &form.contexto)
        .await
    {
        Ok(link) => Ok(LinkFormTemplate {
            url: String::new(),
            contexto: String::new(),
            short_url: Some(state.link_service.short_url(&link.key)),
            error: None,
        }
        .into_response()),
        Err(AppError::Validation { message, .. }) => Ok((
            StatusCode::BAD_REQUEST,
            LinkFormTemplate {
                url: form.url,
                contexto: form.contexto,
                short_url: None,
                error: Some(message),
            },
        )
            .into_response()),
        Err(e) => Err(e),
    }
}
