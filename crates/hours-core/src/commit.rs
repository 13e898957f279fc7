//! Commit records as supplied by the log provider.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Timelike, Weekday};

/// A single commit from the version-control history.
///
/// The timestamp keeps the offset it was recorded with, so time-of-day and
/// weekday reflect the author's wall clock rather than the local machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    /// Author e-mail address.
    pub author: String,
}

impl CommitRecord {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        message: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            author: author.into(),
        }
    }

    /// Wall-clock time of the commit truncated to whole minutes.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        let time = self.timestamp.time();
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
    }

    /// Returns true for commits made on a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.timestamp.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// A provider of commit history.
///
/// This trait lets estimation run against different history sources
/// (e.g., `git log` in hours-git, or fixtures in tests).
pub trait CommitSource {
    type Error;

    /// Returns every commit the source knows about, in any order.
    fn read_commits(&self) -> Result<Vec<CommitRecord>, Self::Error>;
}
