//! # Taqui
//!
//! Short links that show a caption image before redirecting, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`Link`](domain::entities::Link) entity and repository trait
//! - **Application Layer** ([`application`]) - Link creation, key policy, resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file / SQLite storage, caption compositing
//! - **API Layer** ([`api`]) - Image and link endpoints, DTOs, middleware
//! - **Web Layer** ([`web`]) - Link form and redirect pages
//!
//! ## Quick Start
//!
//! ```bash
//! export LINK_BACKEND=sqlite
//! export DATABASE_URL="sqlite://links.db"
//! export TEMPLATE_IMAGE_PATH="assets/template.png"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::imaging::CaptionCompositor;
    pub use crate::state::AppState;
}
