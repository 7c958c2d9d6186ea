use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::PersistenceError;
use crate::models::document::StoreDocument;

/// Where the store document lives. JobStore is the only caller.
///
/// Carried in `JobStore` as `Arc<dyn DocumentBackend>`.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Returns `None` when nothing has been persisted yet (first boot).
    async fn load(&self) -> Result<Option<StoreDocument>, PersistenceError>;

    async fn persist(&self, doc: &StoreDocument) -> Result<(), PersistenceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file
// ────────────────────────────────────────────────────────────────────────────

/// Pretty-printed JSON file on local disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn load(&self) -> Result<Option<StoreDocument>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No data file at {}; starting empty", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let doc: StoreDocument = serde_json::from_slice(&bytes)?;
        info!(
            "Loaded {} users, {} employers, {} jobs, {} applications from {}",
            doc.users.len(),
            doc.employers.len(),
            doc.jobs.len(),
            doc.applications.len(),
            self.path.display()
        );
        Ok(Some(doc))
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous document intact.
    async fn persist(&self, doc: &StoreDocument) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(doc)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Persisted {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the document in process memory. Stands in for browser local storage.
#[derive(Default)]
pub struct MemoryBackend {
    stored: Mutex<Option<StoreDocument>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<StoreDocument>, PersistenceError> {
        Ok(self.stored.lock().await.clone())
    }

    async fn persist(&self, doc: &StoreDocument) -> Result<(), PersistenceError> {
        *self.stored.lock().await = Some(doc.clone());
        Ok(())
    }
}
