use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::log::dto::LogEntry;

/// Durable home of the daily log. One fixed location, read once at startup,
/// fully overwritten on every mutation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whatever is currently stored; missing or undecodable content yields
    /// the empty log and is reported only as a diagnostic.
    async fn load(&self) -> Vec<LogEntry>;
    /// Serializes the full sequence and overwrites the stored copy.
    async fn persist(&self, entries: &[LogEntry]) -> anyhow::Result<()>;
}

/// File-backed store: the log lives as one JSON array on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Vec<LogEntry> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read log file");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "stored log is undecodable, starting empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, entries: &[LogEntry]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

/// Volatile store for tests and for running without a writable disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryStore {
    pub async fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }

    async fn persist(&self, entries: &[LogEntry]) -> anyhow::Result<()> {
        *self.entries.lock().await = entries.to_vec();
        Ok(())
    }
}
