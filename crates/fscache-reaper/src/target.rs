//! Directory-backed cache host

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fscache_core::{EntryTimes, ReapTarget, ReaperError};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Treats every regular file directly under `root` as a cache entry
///
/// The file name is the key, access time is the last read and
/// modification time is the last write.
pub struct DirTarget {
    root: PathBuf,
}

impl DirTarget {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to a path directly under `root`
    fn entry_path(&self, key: &str) -> Result<PathBuf, ReaperError> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(ReaperError::Target(format!("Invalid cache key: {}", key))),
        }
    }
}

#[async_trait]
impl ReapTarget for DirTarget {
    async fn entries(&self) -> Result<Vec<EntryTimes>, ReaperError> {
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        let mut entries = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                // Removed between listing and stat
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(key) = entry.file_name().into_string() else {
                continue;
            };

            let modified = metadata.modified()?;
            // Not every platform reports atime
            let accessed = metadata.accessed().unwrap_or(modified);

            entries.push(EntryTimes {
                key,
                last_read: DateTime::<Utc>::from(accessed),
                last_write: DateTime::<Utc>::from(modified),
            });
        }

        Ok(entries)
    }

    async fn remove(&self, key: &str) -> Result<bool, ReaperError> {
        match tokio::fs::remove_file(self.entry_path(key)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reports what would be reaped without touching the inner target
pub struct DryRun<T> {
    inner: T,
}

impl<T> DryRun<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: ReapTarget> ReapTarget for DryRun<T> {
    async fn entries(&self) -> Result<Vec<EntryTimes>, ReaperError> {
        self.inner.entries().await
    }

    async fn remove(&self, key: &str) -> Result<bool, ReaperError> {
        info!("Would reap: {}", key);
        Ok(true)
    }
}
