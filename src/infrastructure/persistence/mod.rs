//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`JsonFileLinkRepository`] - whole-map JSON document on disk
//! - [`SqliteLinkRepository`] - single `links` table via SQLx
//!
//! [`build_link_repository`] picks one according to [`Config::link_backend`].

pub mod json_file_link_repository;
pub mod sqlite_link_repository;

pub use json_file_link_repository::JsonFileLinkRepository;
pub use sqlite_link_repository::{SqliteLinkRepository, connect_pool};

use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, LinkBackend};
use crate::domain::repositories::LinkRepository;

/// Builds the link repository selected by configuration.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
pub async fn build_link_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.link_backend {
        LinkBackend::Sqlite => {
            let pool = connect_pool(&config.database_url, config.db_max_connections).await?;
            tracing::info!("Link storage: SQLite");
            Ok(Arc::new(SqliteLinkRepository::new(Arc::new(pool))))
        }
        LinkBackend::JsonFile => {
            let repository = JsonFileLinkRepository::new(&config.links_file);
            tracing::info!("Link storage: JSON file {}", repository.path().display());
            Ok(Arc::new(repository))
        }
    }
}
