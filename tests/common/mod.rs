#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taqui::application::services::LinkService;
use taqui::domain::repositories::LinkRepository;
use taqui::infrastructure::imaging::CaptionCompositor;
use taqui::infrastructure::persistence::{SqliteLinkRepository, connect_pool};
use taqui::state::AppState;
use tempfile::TempDir;

pub const TEMPLATE_COLOR: Rgba<u8> = Rgba([200, 30, 30, 255]);

/// Fresh in-memory database with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    connect_pool("sqlite::memory:", 1).await.unwrap()
}

pub async fn insert_link(pool: &SqlitePool, key: &str, url: &str, contexto: Option<&str>) {
    sqlx::query("INSERT INTO links (key, url, contexto) VALUES (?1, ?2, ?3)")
        .bind(key)
        .bind(url)
        .bind(contexto)
        .execute(pool)
        .await
        .unwrap();
}

/// Writes a solid-color PNG template into `dir`.
pub fn write_template(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("template.png");
    RgbaImage::from_pixel(width, height, TEMPLATE_COLOR)
        .save(&path)
        .unwrap();
    path
}

/// Keeps the temporary directory holding the template alive for the test.
pub struct TestContext {
    pub state: AppState,
    pub pool: SqlitePool,
    pub dir: TempDir,
}

pub async fn create_test_context() -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path(), 320, 240);
    create_context_with_template(dir, template).await
}

/// Context whose template path does not exist.
pub async fn create_context_without_template() -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("missing.png");
    create_context_with_template(dir, template).await
}

async fn create_context_with_template(dir: TempDir, template: PathBuf) -> TestContext {
    let pool = create_test_pool().await;
    let link_repo: Arc<dyn LinkRepository> =
        Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone())));

    let state = create_test_state(link_repo, template);

    TestContext { state, pool, dir }
}

pub fn create_test_state(link_repo: Arc<dyn LinkRepository>, template: PathBuf) -> AppState {
    let link_service = Arc::new(LinkService::new(link_repo, None));
    let compositor = Arc::new(CaptionCompositor::new(template, None));

    AppState::new(link_service, compositor, 5)
}
