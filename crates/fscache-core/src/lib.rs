//! fscache Core Expiry Logic
//!
//! This crate provides the expiry-decision policy for the file cache,
//! plus the sweep driver a cache host uses to apply it.

pub mod config;
pub mod error;
pub mod reaper;
pub mod sweep;

pub use config::ReaperConfig;
pub use error::ReaperError;
pub use reaper::{ParseReapModeError, ReapMode, Reaper, ThresholdReaper};
pub use sweep::{EntryTimes, ReapTarget, SweepStats, spawn_reaper_task, sweep};
