//! SQLite implementation of link repository.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape of the `links` table. `contexto` is nullable in the schema.
#[derive(sqlx::FromRow)]
struct LinkRow {
    key: String,
    url: String,
    contexto: Option<String>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.key, row.url, row.contexto.unwrap_or_default())
    }
}

/// Opens a SQLite pool and applies the embedded migrations.
///
/// The database file is created if it does not exist. For `sqlite::memory:`
/// pass `max_connections = 1`, since every connection opens its own
/// in-memory database.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened,
/// or a migration fails.
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid SQLite URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(pool)
}

/// SQLite repository with `key` as primary key.
///
/// `save` is a single upsert statement and `load` a point lookup; atomicity
/// of each statement is left to SQLite.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn save(&self, link: &Link) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (key, url, contexto)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                url = excluded.url,
                contexto = excluded.contexto
            "#,
        )
        .bind(&link.key)
        .bind(&link.url)
        .bind(&link.contexto)
        .execute(self.pool.as_ref())
        .await?;

        tracing::debug!(key = %link.key, "Link saved to SQLite");
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT key, url, contexto FROM links WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "key": key })))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
