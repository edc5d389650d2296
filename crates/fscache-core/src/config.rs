//! Reaper configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::reaper::{ReapMode, ThresholdReaper};

/// Threshold reaper settings, as read from the `[reaper]` config section
///
/// Durations are plain seconds. Zero and negative values are passed
/// through to the reaper unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReaperConfig {
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: i64,
    #[serde(default = "default_period_secs")]
    pub period_secs: i64,
    #[serde(default)]
    pub mode: ReapMode,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            expiry_secs: default_expiry_secs(),
            period_secs: default_period_secs(),
            mode: ReapMode::default(),
        }
    }
}

fn default_expiry_secs() -> i64 {
    3600 // 1 hour
}

fn default_period_secs() -> i64 {
    600 // 10 minutes
}

impl ReaperConfig {
    pub fn expiry(&self) -> Duration {
        seconds(self.expiry_secs)
    }

    pub fn period(&self) -> Duration {
        seconds(self.period_secs)
    }

    /// Build the reaper described by this config
    pub fn build(&self) -> ThresholdReaper {
        ThresholdReaper::with_mode(self.expiry(), self.period(), self.mode)
    }
}

/// Seconds to a duration, clamped to the representable range
fn seconds(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(if secs < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: ReaperConfig = toml::from_str("").unwrap();
        assert_eq!(config, ReaperConfig::default());
        assert_eq!(config.expiry(), Duration::hours(1));
        assert_eq!(config.period(), Duration::minutes(10));
        assert_eq!(config.mode, ReapMode::LastRead);
    }

    #[test]
    fn test_parse_full_section() {
        let config: ReaperConfig = toml::from_str(
            r#"
            expiry_secs = 86400
            period_secs = 300
            mode = "last_write"
            "#,
        )
        .unwrap();

        let reaper = config.build();
        assert_eq!(reaper.expiry(), Duration::days(1));
        assert_eq!(reaper.period(), Duration::minutes(5));
        assert_eq!(reaper.mode(), ReapMode::LastWrite);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result: Result<ReaperConfig, _> = toml::from_str(r#"mode = "fifo""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_values_pass_through() {
        let config: ReaperConfig = toml::from_str("expiry_secs = -30\nperiod_secs = 0").unwrap();
        let reaper = config.build();
        assert_eq!(reaper.expiry(), Duration::seconds(-30));
        assert_eq!(reaper.period(), Duration::zero());
    }

    #[test]
    fn test_huge_values_clamp() {
        let config = ReaperConfig {
            expiry_secs: i64::MAX,
            period_secs: i64::MIN,
            mode: ReapMode::LastRead,
        };
        assert_eq!(config.expiry(), Duration::MAX);
        assert_eq!(config.period(), Duration::MIN);
    }
}
