//! Threshold expiry policy

use chrono::{DateTime, Duration, Utc};

use super::{ReapMode, Reaper};

/// Reaper that runs every `period` and expires entries whose tracked
/// timestamp is older than `expiry`.
///
/// Zero or negative durations are accepted as given: a zero expiry reaps
/// anything not touched in the current instant, a negative one reaps
/// essentially everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdReaper {
    expiry: Duration,
    period: Duration,
    mode: ReapMode,
}

impl ThresholdReaper {
    /// Create a reaper in the default mode, see [`ThresholdReaper::last_read`].
    pub fn new(expiry: Duration, period: Duration) -> Self {
        Self::last_read(expiry, period)
    }

    /// Reap entries whose last read is older than `expiry`.
    pub fn last_read(expiry: Duration, period: Duration) -> Self {
        Self::with_mode(expiry, period, ReapMode::LastRead)
    }

    /// Reap entries whose last write is older than `expiry`, ignoring reads.
    pub fn last_write(expiry: Duration, period: Duration) -> Self {
        Self::with_mode(expiry, period, ReapMode::LastWrite)
    }

    pub fn with_mode(expiry: Duration, period: Duration, mode: ReapMode) -> Self {
        Self {
            expiry,
            period,
            mode,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn mode(&self) -> ReapMode {
        self.mode
    }

    /// Instant before which a tracked timestamp is expired, given `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match now.checked_sub_signed(self.expiry) {
            Some(cutoff) => cutoff,
            // Saturate at the edge of the representable range
            None if self.expiry > Duration::zero() => DateTime::<Utc>::MIN_UTC,
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Expiry decision against an explicit clock reading.
    pub fn reap_at(
        &self,
        now: DateTime<Utc>,
        last_read: DateTime<Utc>,
        last_write: DateTime<Utc>,
    ) -> bool {
        let tracked = match self.mode {
            ReapMode::LastRead => last_read,
            ReapMode::LastWrite => last_write,
        };
        tracked < self.cutoff(now)
    }
}

impl Reaper for ThresholdReaper {
    fn next(&self) -> Duration {
        self.period
    }

    fn reap(&self, _key: &str, last_read: DateTime<Utc>, last_write: DateTime<Utc>) -> bool {
        self.reap_at(Utc::now(), last_read, last_write)
    }
}
