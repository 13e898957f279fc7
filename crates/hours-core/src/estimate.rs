//! Session-based work time estimation.
//!
//! # Algorithm Summary
//!
//! 1. Sort commits chronologically
//! 2. Walk adjacent pairs; a gap longer than `max_session_gap_minutes`
//!    (in whole minutes) closes the current session
//! 3. Sum the span of every session in fractional hours
//! 4. Add the first-commit bonus once and round to the nearest hour
//!
//! A session made of a single commit spans zero time. The bonus is credited
//! once per run, not once per session.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use crate::{CommitRecord, EstimateConfig};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// A maximal run of commits with no gap above the configured maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub commit_count: usize,
}

impl Session {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "session spans are far below 2^52 milliseconds"
    )]
    fn hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / MS_PER_HOUR
    }
}

/// Partition commits into sessions, in chronological order.
///
/// The input does not need to be sorted. Every commit lands in exactly one
/// session; a lone commit forms a zero-span session.
pub fn sessions(commits: &[CommitRecord], config: &EstimateConfig) -> Vec<Session> {
    if commits.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&CommitRecord> = commits.iter().collect();
    sorted.sort_by_key(|commit| commit.timestamp);

    let max_gap = i64::from(config.max_session_gap_minutes);
    let mut result = Vec::new();
    let mut current = Session {
        start: sorted[0].timestamp,
        end: sorted[0].timestamp,
        commit_count: 1,
    };

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let gap_minutes = (next.timestamp - prev.timestamp).num_minutes();

        if gap_minutes > max_gap {
            tracing::debug!(
                start = %current.start,
                end = %current.end,
                commits = current.commit_count,
                gap_minutes,
                "session closed"
            );
            result.push(current);
            current = Session {
                start: next.timestamp,
                end: next.timestamp,
                commit_count: 1,
            };
        } else {
            current.end = next.timestamp;
            current.commit_count += 1;
        }
    }

    result.push(current);
    result
}

/// Estimate total hours worked, rounded to the nearest hour.
///
/// Sums the span of each session and adds `first_commit_bonus_minutes`
/// exactly once. Returns 0 for fewer than two commits.
pub fn estimate_hours(commits: &[CommitRecord], config: &EstimateConfig) -> u32 {
    if commits.len() < 2 {
        return 0;
    }
    estimate_from_sessions(&sessions(commits, config), config)
}

/// Same as [`estimate_hours`] for an already computed partition.
///
/// Returns 0 when the sessions hold fewer than two commits in total.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "total is non-negative and bounded by the history length in hours"
)]
pub fn estimate_from_sessions(sessions: &[Session], config: &EstimateConfig) -> u32 {
    if sessions.iter().map(|s| s.commit_count).sum::<usize>() < 2 {
        return 0;
    }

    let worked: f64 = sessions.iter().map(Session::hours).sum();
    let bonus = f64::from(config.first_commit_bonus_minutes) / 60.0;
    let total = worked + bonus;

    tracing::debug!(
        sessions = sessions.len(),
        worked_hours = worked,
        bonus_hours = bonus,
        "estimated work time"
    );
    total.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(ts: &str) -> CommitRecord {
        CommitRecord::new(
            DateTime::parse_from_rfc3339(ts).unwrap(),
            "work",
            "dev@example.com",
        )
    }

    fn commits(timestamps: &[&str]) -> Vec<CommitRecord> {
        timestamps.iter().map(|ts| commit(ts)).collect()
    }

    fn config(max_gap: u32, bonus: u32) -> EstimateConfig {
        EstimateConfig {
            max_session_gap_minutes: max_gap,
            first_commit_bonus_minutes: bonus,
            ..EstimateConfig::default()
        }
    }

    #[test]
    fn test_no_commits_is_zero() {
        assert_eq!(estimate_hours(&[], &config(120, 120)), 0);
    }

    #[test]
    fn test_single_commit_is_zero() {
        let single = commits(&["2025-03-04T09:00:00+00:00"]);
        assert_eq!(estimate_hours(&single, &config(120, 120)), 0);

        let found = sessions(&single, &config(120, 120));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].commit_count, 1);
        assert!(found[0].duration().is_zero());
        assert_eq!(estimate_from_sessions(&found, &config(120, 120)), 0);
    }

    #[test]
    fn test_no_commits_have_no_sessions() {
        assert!(sessions(&[], &config(120, 120)).is_empty());
        assert_eq!(estimate_from_sessions(&[], &config(120, 120)), 0);
    }

    #[test]
    fn test_estimate_from_sessions_matches_estimate_hours() {
        let input = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T10:20:00+00:00",
            "2025-03-04T15:00:00+00:00",
            "2025-03-05T09:00:00+00:00",
            "2025-03-05T09:30:00+00:00",
        ]);
        let found = sessions(&input, &config(120, 90));
        assert_eq!(found.len(), 3);
        // 80m + 0m + 30m + 90m bonus = 3h20m
        assert_eq!(estimate_from_sessions(&found, &config(120, 90)), 3);
        assert_eq!(estimate_hours(&input, &config(120, 90)), 3);
    }

    #[test]
    fn test_two_commits_within_gap_form_one_session() {
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T11:00:00+00:00"]);
        // 2h span + 2h bonus
        assert_eq!(estimate_hours(&input, &config(120, 120)), 4);
    }

    #[test]
    fn test_two_commits_beyond_gap_only_get_bonus() {
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T13:00:00+00:00"]);
        let found = sessions(&input, &config(120, 120));
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.duration().is_zero()));
        assert_eq!(estimate_hours(&input, &config(120, 120)), 2);
    }

    #[test]
    fn test_bonus_applied_once_not_per_session() {
        let input = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T10:00:00+00:00",
            "2025-03-05T09:00:00+00:00",
            "2025-03-05T10:00:00+00:00",
        ]);
        assert_eq!(sessions(&input, &config(120, 120)).len(), 2);
        // 1h + 1h + 2h bonus, not 1h + 1h + 2 * 2h
        assert_eq!(estimate_hours(&input, &config(120, 120)), 4);
    }

    #[test]
    fn test_all_gaps_within_limit_spans_first_to_last() {
        let input = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T10:30:00+00:00",
            "2025-03-04T12:15:00+00:00",
            "2025-03-04T13:45:00+00:00",
        ]);
        // 4.75h span + 1h bonus = 5.75
        assert_eq!(estimate_hours(&input, &config(120, 60)), 6);
        let found = sessions(&input, &config(120, 60));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].commit_count, 4);
    }

    #[test]
    fn test_every_commit_alone_leaves_only_bonus() {
        let input = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-05T09:00:00+00:00",
            "2025-03-06T09:00:00+00:00",
        ]);
        assert_eq!(sessions(&input, &config(60, 90)).len(), 3);
        // round(1.5)
        assert_eq!(estimate_hours(&input, &config(60, 90)), 2);
        assert_eq!(estimate_hours(&input, &config(60, 0)), 0);
    }

    #[test]
    fn test_gap_equal_to_limit_stays_in_session() {
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T11:00:00+00:00"]);
        assert_eq!(sessions(&input, &config(120, 0)).len(), 1);
    }

    #[test]
    fn test_gap_compared_in_whole_minutes() {
        // 120m59s truncates to 120 minutes
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T11:00:59+00:00"]);
        assert_eq!(sessions(&input, &config(120, 0)).len(), 1);

        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T11:01:00+00:00"]);
        assert_eq!(sessions(&input, &config(120, 0)).len(), 2);
    }

    #[test]
    fn test_hours_accumulate_fractionally_before_rounding() {
        // Two 40 minute sessions: 80 minutes total rounds to 1, not 0 + 0
        let input = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T09:40:00+00:00",
            "2025-03-04T14:00:00+00:00",
            "2025-03-04T14:40:00+00:00",
        ]);
        assert_eq!(estimate_hours(&input, &config(60, 0)), 1);
    }

    #[test]
    fn test_half_hour_rounds_up() {
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T09:30:00+00:00"]);
        assert_eq!(estimate_hours(&input, &config(120, 0)), 1);
    }

    #[test]
    fn test_order_does_not_matter() {
        let sorted = commits(&[
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T09:50:00+00:00",
            "2025-03-04T13:00:00+00:00",
            "2025-03-04T14:20:00+00:00",
            "2025-03-06T10:00:00+00:00",
        ]);
        let expected = estimate_hours(&sorted, &config(120, 120));

        let mut reversed = sorted.clone();
        reversed.reverse();
        assert_eq!(estimate_hours(&reversed, &config(120, 120)), expected);

        let shuffled = vec![
            sorted[3].clone(),
            sorted[0].clone(),
            sorted[4].clone(),
            sorted[2].clone(),
            sorted[1].clone(),
        ];
        assert_eq!(estimate_hours(&shuffled, &config(120, 120)), expected);
        assert_eq!(
            sessions(&shuffled, &config(120, 120)),
            sessions(&sorted, &config(120, 120))
        );
    }

    #[test]
    fn test_sessions_cover_every_commit_without_overlap() {
        let input = commits(&[
            "2025-03-04T15:00:00+00:00",
            "2025-03-04T09:00:00+00:00",
            "2025-03-04T09:30:00+00:00",
            "2025-03-04T16:00:00+00:00",
            "2025-03-05T09:00:00+00:00",
        ]);
        let found = sessions(&input, &config(90, 0));
        assert_eq!(found.iter().map(|s| s.commit_count).sum::<usize>(), input.len());
        for pair in found.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn test_gap_measured_across_offsets() {
        // 09:00+02:00 and 08:30+00:00 are 90 minutes apart
        let input = commits(&["2025-03-04T09:00:00+02:00", "2025-03-04T08:30:00+00:00"]);
        let found = sessions(&input, &config(120, 0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].duration(), Duration::minutes(90));
    }

    #[test]
    fn test_session_serializes_non_utc_offset() {
        let input = commits(&["2025-03-04T09:00:00+02:00", "2025-03-04T09:30:00+02:00"]);
        let found = sessions(&input, &config(120, 0));
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(json["start"], "2025-03-04T09:00:00+02:00");
    }

    #[test]
    fn test_session_serializes_timestamps() {
        let input = commits(&["2025-03-04T09:00:00+00:00", "2025-03-04T10:00:00+00:00"]);
        let found = sessions(&input, &config(120, 0));
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(json["start"], "2025-03-04T09:00:00Z");
        assert_eq!(json["end"], "2025-03-04T10:00:00Z");
        assert_eq!(json["commit_count"], 2);
    }
}
