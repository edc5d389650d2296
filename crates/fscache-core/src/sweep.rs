//! Sweep driver for applying a reaper to a cache host

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::ReaperError;
use crate::reaper::Reaper;

/// Timestamps of a single tracked entry, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTimes {
    pub key: String,
    pub last_read: DateTime<Utc>,
    pub last_write: DateTime<Utc>,
}

/// Result of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Entries the reaper was asked about
    pub scanned: usize,
    /// Entries removed by the host
    pub reaped: usize,
    /// Entries the host failed to remove
    pub failed: usize,
}

/// Cache host boundary
///
/// The host owns entry storage and timestamps; the sweep only reads the
/// listing and asks the host to remove what the reaper selects.
#[async_trait]
pub trait ReapTarget: Send + Sync {
    /// List every tracked entry with its last read/write times
    async fn entries(&self) -> Result<Vec<EntryTimes>, ReaperError>;

    /// Remove an entry. Returns false if it was already gone.
    async fn remove(&self, key: &str) -> Result<bool, ReaperError>;
}

/// Run a single pass over every entry the host tracks
pub async fn sweep(
    reaper: &dyn Reaper,
    target: &dyn ReapTarget,
) -> Result<SweepStats, ReaperError> {
    let entries = target.entries().await?;
    let mut stats = SweepStats::default();

    for entry in entries {
        stats.scanned += 1;
        if !reaper.reap(&entry.key, entry.last_read, entry.last_write) {
            continue;
        }

        match target.remove(&entry.key).await {
            Ok(true) => {
                debug!("Reaped entry: {}", entry.key);
                stats.reaped += 1;
            }
            Ok(false) => {
                debug!("Entry already gone: {}", entry.key);
            }
            Err(e) => {
                warn!("Failed to reap entry {}: {}", entry.key, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// Spawn a background task that sweeps `target` on the reaper's schedule
///
/// The first sweep runs right away. After every completed sweep the
/// reaper is asked how long to wait before the next one.
pub fn spawn_reaper_task(
    reaper: Arc<dyn Reaper>,
    target: Arc<dyn ReapTarget>,
) -> tokio::task::JoinHandle<()> {
    info!("Starting background reaper task");

    tokio::spawn(async move {
        loop {
            scheduled_sweep(reaper.as_ref(), target.as_ref()).await;

            // Negative periods sweep again immediately
            let wait = reaper.next().to_std().unwrap_or_default();
            debug!("Next reap in {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    })
}

async fn scheduled_sweep(reaper: &dyn Reaper, target: &dyn ReapTarget) {
    match sweep(reaper, target).await {
        Ok(stats) => {
            if stats.reaped > 0 || stats.failed > 0 {
                info!(
                    "Scheduled reap: {} scanned, {} removed, {} failed",
                    stats.scanned, stats.reaped, stats.failed
                );
            }
        }
        Err(e) => {
            warn!("Error during scheduled reap: {}", e);
        }
    }
}
