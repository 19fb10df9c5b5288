// src/config.rs
// =============================================================================
// Gallery configuration.
//
// Everything the gallery needs to know at startup lives in one struct that is
// passed around explicitly:
// - which GitHub user to show
// - which API host to talk to (tests point this at a mock server)
// - the creation-date cutoff and whether older repositories are excluded
// - an optional request timeout
//
// The defaults match the values the gallery has always shipped with.
// =============================================================================

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::time::Duration;

/// GitHub user shown when no username is given
pub const DEFAULT_USERNAME: &str = "bgiobbe";

/// Public GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default creation-date cutoff, 2022-08-01
pub const DEFAULT_CUTOFF: (i32, u32, u32) = (2022, 8, 1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Owner of the repositories in the gallery
    pub username: String,
    /// Base URL of the GitHub REST API
    pub api_base: String,
    /// Repositories created on or before this day are dropped when
    /// `exclude_before_cutoff` is set
    pub cutoff: NaiveDate,
    /// Off by default: every repository is listed
    pub exclude_before_cutoff: bool,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_CUTOFF;
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            cutoff: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            exclude_before_cutoff: false,
            timeout: None,
        }
    }
}

impl GalleryConfig {
    // The instant list rendering compares creation times against, or None
    // when exclusion is switched off.
    //
    // The cutoff day starts at midnight UTC, so a repository created at
    // 2022-08-01T00:00:00Z is still excluded (the comparison is strict).
    pub fn exclusion(&self) -> Option<DateTime<Utc>> {
        self.exclude_before_cutoff
            .then(|| self.cutoff.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.username, "bgiobbe");
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.cutoff, NaiveDate::from_ymd_opt(2022, 8, 1).unwrap());
        assert!(!config.exclude_before_cutoff);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_exclusion_disabled_by_default() {
        assert_eq!(GalleryConfig::default().exclusion(), None);
    }

    #[test]
    fn test_exclusion_starts_at_midnight_utc() {
        let config = GalleryConfig {
            exclude_before_cutoff: true,
            ..GalleryConfig::default()
        };
        assert_eq!(
            config.exclusion(),
            Some(Utc.with_ymd_and_hms(2022, 8, 1, 0, 0, 0).unwrap())
        );
    }
}
