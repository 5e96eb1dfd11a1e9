//! JSON file implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

type LinkMap = BTreeMap<String, Link>;

/// Distinguishes temp files of concurrent writers within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Link repository backed by a single JSON document.
///
/// The document is an object keyed by link key, each value being the full
/// [`Link`] record. Every save reads the whole map, mutates it, and rewrites
/// the file wholesale through a temp file and rename.
///
/// Saves issued through one repository instance are serialized. Separate
/// processes (or separate instances pointing at the same file) can still
/// interleave read-modify-write cycles and lose an update. Each write uses
/// its own temp file (`<path>.<pid>.<n>.tmp`), so concurrent writers never
/// rename each other's file away.
pub struct JsonFileLinkRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLinkRepository {
    /// Creates a repository for the document at `path`.
    ///
    /// The file is created on first save; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<LinkMap, AppError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LinkMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&data).map_err(|e| {
            AppError::internal(
                "Malformed link storage",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })
    }

    async fn write_map(&self, links: &LinkMap) -> Result<(), AppError> {
        let data = serde_json::to_string_pretty(links)?;

        let tmp = self.temp_path();

        tokio::fs::write(&tmp, data).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{}.{}.tmp", std::process::id(), n));
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl LinkRepository for JsonFileLinkRepository {
    async fn save(&self, link: &Link) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut links = self.read_map().await?;
        links.insert(link.key.clone(), link.clone());
        self.write_map(&links).await?;

        tracing::debug!(key = %link.key, total = links.len(), "Link saved to JSON file");
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Link, AppError> {
        let mut links = self.read_map().await?;

        links
            .remove(key)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "key": key })))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.read_map().await.map(|_| ())
    }
}
