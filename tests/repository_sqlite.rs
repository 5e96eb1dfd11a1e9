mod common;

use std::sync::Arc;
use taqui::domain::entities::Link;
use taqui::domain::repositories::LinkRepository;
use taqui::error::AppError;
use taqui::infrastructure::persistence::SqliteLinkRepository;

async fn create_repo() -> (SqliteLinkRepository, sqlx::SqlitePool) {
    let pool = common::create_test_pool().await;
    (SqliteLinkRepository::new(Arc::new(pool.clone())), pool)
}

#[tokio::test]
async fn test_save_and_load() {
    let (repo, _pool) = create_repo().await;

    let link = Link::new("ab12cd", "https://example.com", "hello");
    repo.save(&link).await.unwrap();

    let loaded = repo.load("ab12cd").await.unwrap();
    assert_eq!(loaded, link);
}

#[tokio::test]
async fn test_load_not_found() {
    let (repo, _pool) = create_repo().await;

    let result = repo.load("doesnotexist").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_save_overwrites_existing_key() {
    let (repo, pool) = create_repo().await;

    repo.save(&Link::new("ab12cd", "https://first.example", "first"))
        .await
        .unwrap();
    repo.save(&Link::new("ab12cd", "https://second.example", "second"))
        .await
        .unwrap();

    let loaded = repo.load("ab12cd").await.unwrap();
    assert_eq!(loaded.url, "https://second.example");
    assert_eq!(loaded.contexto, "second");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_null_contexto_loads_as_empty() {
    let (repo, pool) = create_repo().await;
    common::insert_link(&pool, "nocap", "https://example.com", None).await;

    let loaded = repo.load("nocap").await.unwrap();

    assert_eq!(loaded.url, "https://example.com");
    assert_eq!(loaded.contexto, "");
    assert!(!loaded.has_caption());
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (repo, _pool) = create_repo().await;

    repo.save(&Link::new("aaaaaa", "https://a.example", "a"))
        .await
        .unwrap();
    repo.save(&Link::new("bbbbbb", "https://b.example", "b"))
        .await
        .unwrap();

    assert_eq!(repo.load("aaaaaa").await.unwrap().url, "https://a.example");
    assert_eq!(repo.load("bbbbbb").await.unwrap().url, "https://b.example");
}

#[tokio::test]
async fn test_unicode_round_trip() {
    let (repo, _pool) = create_repo().await;

    let link = Link::new("uni", "https://exemplo.com.br/ação", "tá aqui 👀");
    repo.save(&link).await.unwrap();

    assert_eq!(repo.load("uni").await.unwrap(), link);
}

#[tokio::test]
async fn test_health_check() {
    let (repo, _pool) = create_repo().await;

    assert!(repo.health_check().await.is_ok());
}

#[tokio::test]
async fn test_health_check_fails_on_closed_pool() {
    let (repo, pool) = create_repo().await;
    pool.close().await;

    assert!(matches!(
        repo.health_check().await,
        Err(AppError::Internal { .. })
    ));
}
