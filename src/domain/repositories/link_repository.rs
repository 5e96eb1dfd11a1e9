//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// Both operations are keyed by [`Link::key`]. A missing record is reported
/// as [`AppError::NotFound`], which callers must keep distinct from storage
/// failures ([`AppError::Internal`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileLinkRepository`] - single JSON document
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - single SQLite table
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_json_file.rs`, `tests/repository_sqlite.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts the link, replacing any record stored under the same key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the underlying storage is unavailable.
    async fn save(&self, link: &Link) -> Result<(), AppError>;

    /// Loads the link stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `key`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn load(&self, key: &str) -> Result<Link, AppError>;

    /// Probes the backing store without touching any record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached or read.
    async fn health_check(&self) -> Result<(), AppError>;
}
