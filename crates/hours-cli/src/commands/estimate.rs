//! Estimate command: read history, filter it, and report worked hours.

use std::io::Write;

use anyhow::{Context, Result};
use hours_core::{
    CommitSource, EstimateConfig, Session, estimate_from_sessions, filter_commits, sessions,
};
use serde::Serialize;

/// Result of one estimation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub total_hours: u32,
    /// Commits left after filtering.
    pub commit_count: usize,
    pub session_count: usize,
    pub sessions: Vec<Session>,
}

impl Estimate {
    pub const fn is_empty(&self) -> bool {
        self.commit_count == 0
    }
}

/// Read commits from `source` and estimate hours worked.
pub fn compute<S>(source: &S, config: &EstimateConfig) -> Result<Estimate>
where
    S: CommitSource,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let commits = source
        .read_commits()
        .context("failed to read commit history")?;
    let filtered = filter_commits(&commits, config);
    let sessions = sessions(&filtered, config);

    Ok(Estimate {
        total_hours: estimate_from_sessions(&sessions, config),
        commit_count: filtered.len(),
        session_count: sessions.len(),
        sessions,
    })
}

pub fn run<W, S>(writer: &mut W, source: &S, config: &EstimateConfig, json: bool) -> Result<()>
where
    W: Write,
    S: CommitSource,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let estimate = compute(source, config)?;

    if json {
        serde_json::to_writer_pretty(&mut *writer, &estimate)?;
        writeln!(writer)?;
    } else if estimate.is_empty() {
        writeln!(writer, "No commits found within the specified work hours.")?;
    } else {
        writeln!(writer, "Estimated work time: {} hours", estimate.total_hours)?;
    }

    Ok(())
}
