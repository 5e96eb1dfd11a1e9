//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::imaging::CaptionCompositor;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub compositor: Arc<CaptionCompositor>,
    /// Seconds the redirect page waits before navigating to the destination.
    pub redirect_delay_seconds: u64,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        compositor: Arc<CaptionCompositor>,
        redirect_delay_seconds: u64,
    ) -> Self {
        Self {
            link_service,
            compositor,
            redirect_delay_seconds,
        }
    }
}
