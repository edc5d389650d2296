//! Timestamp selection for threshold expiry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing a reap mode
#[derive(Debug, Clone)]
pub struct ParseReapModeError(String);

impl fmt::Display for ParseReapModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid reap mode: {}", self.0)
    }
}

impl std::error::Error for ParseReapModeError {}

/// Which entry timestamp is compared against the expiry cutoff
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReapMode {
    /// Expire entries that have not been read recently
    #[default]
    LastRead,
    /// Expire entries that have not been written recently; reads do not
    /// extend their life
    LastWrite,
}

impl ReapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReapMode::LastRead => "last_read",
            ReapMode::LastWrite => "last_write",
        }
    }
}

impl fmt::Display for ReapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReapMode {
    type Err = ParseReapModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_read" | "read" | "atime" => Ok(ReapMode::LastRead),
            "last_write" | "write" | "mtime" => Ok(ReapMode::LastWrite),
            _ => Err(ParseReapModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("last_read".parse::<ReapMode>().unwrap(), ReapMode::LastRead);
        assert_eq!("Last-Write".parse::<ReapMode>().unwrap(), ReapMode::LastWrite);
        assert_eq!("atime".parse::<ReapMode>().unwrap(), ReapMode::LastRead);
        assert_eq!("mtime".parse::<ReapMode>().unwrap(), ReapMode::LastWrite);
    }

    #[test]
    fn test_as_str_parses_back() {
        for mode in [ReapMode::LastRead, ReapMode::LastWrite] {
            assert_eq!(mode.as_str().parse::<ReapMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "lru".parse::<ReapMode>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid reap mode: lru");
    }

    #[test]
    fn test_default_is_last_read() {
        assert_eq!(ReapMode::default(), ReapMode::LastRead);
    }
}
