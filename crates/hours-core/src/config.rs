//! Estimation settings.

use chrono::NaiveTime;
use thiserror::Error;

/// Commits further apart than this start a new session.
pub const DEFAULT_MAX_SESSION_GAP_MINUTES: u32 = 120;

/// Extra time credited once per run for the first commit.
pub const DEFAULT_FIRST_COMMIT_BONUS_MINUTES: u32 = 120;

pub const DEFAULT_WORK_START: &str = "09:00";
pub const DEFAULT_WORK_END: &str = "17:00";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),
    #[error("maximum session gap must be at least one minute")]
    ZeroSessionGap,
}

/// Parse an `HH:MM` time of day.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ConfigError::InvalidTime(s.to_string()))
}

/// Configuration for commit filtering and session estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateConfig {
    /// Largest gap between two commits that still counts as one session.
    /// Default: 120.
    pub max_session_gap_minutes: u32,

    /// Added once to the total, not once per session.
    /// Default: 120.
    pub first_commit_bonus_minutes: u32,

    /// Start of the inclusive work window. Default: 09:00.
    pub work_start: NaiveTime,

    /// End of the inclusive work window. Default: 17:00.
    ///
    /// A window ending before it starts is not wrapped past midnight and
    /// matches nothing.
    pub work_end: NaiveTime,

    /// Drop commits made on Saturday or Sunday.
    pub skip_weekends: bool,

    /// Only count commits by this author e-mail, compared case-insensitively.
    pub author: Option<String>,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            max_session_gap_minutes: DEFAULT_MAX_SESSION_GAP_MINUTES,
            first_commit_bonus_minutes: DEFAULT_FIRST_COMMIT_BONUS_MINUTES,
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            skip_weekends: false,
            author: None,
        }
    }
}

impl EstimateConfig {
    /// Build a validated configuration from user-facing values.
    pub fn new(
        max_session_gap_minutes: u32,
        first_commit_bonus_minutes: u32,
        work_start: &str,
        work_end: &str,
        skip_weekends: bool,
    ) -> Result<Self, ConfigError> {
        if max_session_gap_minutes == 0 {
            return Err(ConfigError::ZeroSessionGap);
        }

        let work_start = parse_time_of_day(work_start)?;
        let work_end = parse_time_of_day(work_end)?;
        if work_start > work_end {
            tracing::warn!(
                %work_start,
                %work_end,
                "work window ends before it starts; no commits will match"
            );
        }

        Ok(Self {
            max_session_gap_minutes,
            first_commit_bonus_minutes,
            work_start,
            work_end,
            skip_weekends,
            author: None,
        })
    }

    #[must_use]
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author.filter(|a| !a.trim().is_empty());
        self
    }
}
