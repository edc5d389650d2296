//! Expiry policies
//!
//! A [`Reaper`] controls when entries expire from the cache. The host asks
//! it for the wait interval before each pass, then asks it about every
//! tracked entry during the pass.

mod mode;
mod policy;

use chrono::{DateTime, Duration, Utc};

pub use mode::{ParseReapModeError, ReapMode};
pub use policy::ThresholdReaper;

/// Expiry policy consulted by the cache host.
pub trait Reaper: Send + Sync {
    /// Time to wait before the next scheduled pass.
    fn next(&self) -> Duration;

    /// Given a key and the last read/write times of an entry, return true
    /// to remove it from the cache, false to keep it.
    fn reap(&self, key: &str, last_read: DateTime<Utc>, last_write: DateTime<Utc>) -> bool;
}
