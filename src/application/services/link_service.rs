//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::key_generator::{generate_key, validate_key};
use serde_json::json;

/// Attempts at drawing an unused key before giving up.
const MAX_KEY_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Wraps whichever [`LinkRepository`] backend is configured and owns the
/// key-generation and short-URL policies.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    public_base_url: Option<String>,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `public_base_url` (without trailing slash) prefixes generated short
    /// URLs; when `None` they are site-relative paths.
    pub fn new(link_repository: Arc<dyn LinkRepository>, public_base_url: Option<String>) -> Self {
        Self {
            link_repository,
            public_base_url,
        }
    }

    /// Creates a link under a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` or `contexto` is empty.
    /// Returns [`AppError::Internal`] on storage errors or when no unused key
    /// is found within the attempt budget.
    pub async fn create_link(&self, url: &str, contexto: &str) -> Result<Link, AppError> {
        validate_fields(url, contexto)?;

        let key = self.generate_unused_key().await?;
        let link = Link::new(key, url, contexto);
        self.link_repository.save(&link).await?;

        tracing::info!(key = %link.key, "Short link created");
        Ok(link)
    }

    /// Creates or overwrites the link stored under an explicit `key`.
    ///
    /// Last write wins: an existing record under `key` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the key or a field is invalid.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_link_with_key(
        &self,
        key: &str,
        url: &str,
        contexto: &str,
    ) -> Result<Link, AppError> {
        validate_key(key)?;
        validate_fields(url, contexto)?;

        let link = Link::new(key, url, contexto);
        self.link_repository.save(&link).await?;

        tracing::info!(key = %link.key, "Short link stored under explicit key");
        Ok(link)
    }

    /// Resolves a key to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link is stored under `key`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, key: &str) -> Result<Link, AppError> {
        let link = self.link_repository.load(key).await?;
        tracing::debug!(key = %key, "Short link resolved");
        Ok(link)
    }

    /// Probes the storage backend.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.health_check().await
    }

    /// Builds the shareable URL of the redirect page for `key`.
    pub fn short_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/redirect/{}", base.trim_end_matches('/'), key),
            None => format!("/redirect/{}", key),
        }
    }

    /// Draws random keys until one is not present in storage.
    ///
    /// The check and the later save are separate operations, so two
    /// concurrent creations can still pick the same key.
    async fn generate_unused_key(&self) -> Result<String, AppError> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = generate_key();

            match self.link_repository.load(&key).await {
                Err(AppError::NotFound { .. }) => return Ok(key),
                Ok(_) => tracing::debug!(key = %key, "Generated key already taken"),
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique key",
            json!({ "reason": "Too many collisions", "attempts": MAX_KEY_ATTEMPTS }),
        ))
    }
}

fn validate_fields(url: &str, contexto: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::bad_request(
            "URL is required",
            json!({ "field": "url" }),
        ));
    }

    if contexto.is_empty() {
        return Err(AppError::bad_request(
            "Contexto is required",
            json!({ "field": "contexto" }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    fn not_found(key: &str) -> AppError {
        AppError::not_found("Link not found", json!({ "key": key }))
    }

    fn service(mock: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(mock), None)
    }

    #[tokio::test]
    async fn test_create_link_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_load()
            .times(1)
            .returning(|key| Err(not_found(key)));

        mock_link_repo
            .expect_save()
            .withf(|link| {
                link.url == "https://example.com" && link.contexto == "hello" && link.key.len() == 6
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = service(mock_link_repo)
            .create_link("https://example.com", "hello")
            .await;

        let link = result.unwrap();
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.contexto, "hello");
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut probes = 0;

        mock_link_repo
            .expect_load()
            .times(3)
            .returning(move |key| {
                probes += 1;
                if probes < 3 {
                    Ok(Link::new(key, "https://taken.example", "taken"))
                } else {
                    Err(not_found(key))
                }
            });

        mock_link_repo.expect_save().times(1).returning(|_| Ok(()));

        let result = service(mock_link_repo)
            .create_link("https://example.com", "hello")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_gives_up_after_max_attempts() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_load()
            .times(MAX_KEY_ATTEMPTS)
            .returning(|key| Ok(Link::new(key, "https://taken.example", "taken")));

        mock_link_repo.expect_save().times(0);

        let result = service(mock_link_repo)
            .create_link("https://example.com", "hello")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_link_propagates_storage_error_from_probe() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_load()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        mock_link_repo.expect_save().times(0);

        let result = service(mock_link_repo)
            .create_link("https://example.com", "hello")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_link_rejects_empty_fields() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_load().times(0);
        mock_link_repo.expect_save().times(0);

        let svc = service(mock_link_repo);

        let err = svc.create_link("", "hello").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("URL"));

        let err = svc.create_link("https://example.com", "").await.unwrap_err();
        assert!(err.to_string().contains("Contexto"));
    }

    #[tokio::test]
    async fn test_create_link_with_key_skips_probe() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo.expect_load().times(0);
        mock_link_repo
            .expect_save()
            .withf(|link| link.key == "ab12cd")
            .times(1)
            .returning(|_| Ok(()));

        let link = service(mock_link_repo)
            .create_link_with_key("ab12cd", "https://example.com", "hello")
            .await
            .unwrap();

        assert_eq!(link.key, "ab12cd");
    }

    #[tokio::test]
    async fn test_create_link_with_invalid_key() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_save().times(0);

        let result = service(mock_link_repo)
            .create_link_with_key("Bad Key", "https://example.com", "hello")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_not_found_stays_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_load()
            .withf(|key| key == "doesnotexist")
            .times(1)
            .returning(|key| Err(not_found(key)));

        let result = service(mock_link_repo).resolve("doesnotexist").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_short_url_relative_and_absolute() {
        let relative = service(MockLinkRepository::new());
        assert_eq!(relative.short_url("ab12cd"), "/redirect/ab12cd");

        let absolute = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            Some("https://taqui.example/".to_string()),
        );
        assert_eq!(
            absolute.short_url("ab12cd"),
            "https://taqui.example/redirect/ab12cd"
        );
    }
}
