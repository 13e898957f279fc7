//! Work-hour and weekend filtering.

use crate::{CommitRecord, EstimateConfig};

/// Keep the commits made inside the configured work window.
///
/// A commit is retained when its time of day (hour and minute only) lies in
/// `[work_start, work_end]` inclusive, it is not on a weekend when
/// `skip_weekends` is set, and it matches `author` when one is configured.
/// Input order is preserved.
pub fn filter_commits(commits: &[CommitRecord], config: &EstimateConfig) -> Vec<CommitRecord> {
    let retained: Vec<CommitRecord> = commits
        .iter()
        .filter(|commit| within_work_hours(commit, config))
        .filter(|commit| !(config.skip_weekends && commit.is_weekend()))
        .filter(|commit| matches_author(commit, config.author.as_deref()))
        .cloned()
        .collect();

    tracing::debug!(
        total = commits.len(),
        retained = retained.len(),
        "filtered commits"
    );
    retained
}

fn within_work_hours(commit: &CommitRecord, config: &EstimateConfig) -> bool {
    let time = commit.time_of_day();
    config.work_start <= time && time <= config.work_end
}

fn matches_author(commit: &CommitRecord, author: Option<&str>) -> bool {
    author.is_none_or(|wanted| commit.author.trim().eq_ignore_ascii_case(wanted.trim()))
}
