//! Core domain logic for git-hours.
//!
//! This crate contains the fundamental types and logic for:
//! - Filtering: keeping commits made inside the configured work window
//! - Estimation: grouping commits into sessions and summing their length

mod commit;
mod config;
mod estimate;
mod filter;

pub use commit::{CommitRecord, CommitSource};
pub use config::{
    ConfigError, DEFAULT_FIRST_COMMIT_BONUS_MINUTES, DEFAULT_MAX_SESSION_GAP_MINUTES,
    DEFAULT_WORK_END, DEFAULT_WORK_START, EstimateConfig, parse_time_of_day,
};
pub use estimate::{Session, estimate_from_sessions, estimate_hours, sessions};
pub use filter::filter_commits;
