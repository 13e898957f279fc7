//! git history reader.
//!
//! Runs `git log` in a repository and turns its output into
//! [`CommitRecord`]s for estimation.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::DateTime;
use hours_core::{CommitRecord, CommitSource};
use thiserror::Error;

/// Separates fields within one log record.
const FIELD_SEP: char = '\x1f';

/// Terminates each log record. Subjects never contain it.
const RECORD_SEP: char = '\x1e';

/// Author date (strict ISO 8601), author e-mail, subject.
const LOG_FORMAT: &str = "--format=%aI%x1f%ae%x1f%s%x1e";

/// Errors that can occur while reading history.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git log exited with {status}: {stderr}")]
    LogFailed { status: String, stderr: String },
}

/// Commit history of a git working tree or bare repository.
#[derive(Debug, Clone)]
pub struct GitLog {
    repo_path: PathBuf,
}

impl GitLog {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

impl CommitSource for GitLog {
    type Error = GitError;

    fn read_commits(&self) -> Result<Vec<CommitRecord>, GitError> {
        read_commits(&self.repo_path)
    }
}

/// Read every commit reachable from `HEAD` in the repository at `repo`.
///
/// A repository without any commits yields an empty list.
pub fn read_commits(repo: &Path) -> Result<Vec<CommitRecord>, GitError> {
    if !is_git_repo(repo)? {
        return Err(GitError::NotARepository(repo.to_path_buf()));
    }

    if !has_commits(repo)? {
        tracing::debug!(repo = %repo.display(), "repository has no commits yet");
        return Ok(Vec::new());
    }

    let output = git(repo, &["log", "--no-color", LOG_FORMAT])?;
    if !output.status.success() {
        return Err(GitError::LogFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let commits = parse_log(&stdout);
    tracing::debug!(repo = %repo.display(), count = commits.len(), "read git log");
    Ok(commits)
}

/// Parse output produced with the record and field separators used by
/// [`read_commits`]. Malformed records are skipped.
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| {
            let commit = parse_record(record);
            if commit.is_none() {
                tracing::warn!(record, "skipping malformed git log record");
            }
            commit
        })
        .collect()
}

fn parse_record(record: &str) -> Option<CommitRecord> {
    let mut fields = record.splitn(3, FIELD_SEP);
    let date = fields.next()?.trim();
    let author = fields.next()?.trim();
    let message = fields.next()?.trim_end();

    let timestamp = DateTime::parse_from_rfc3339(date).ok()?;
    Some(CommitRecord::new(timestamp, message, author))
}

fn is_git_repo(path: &Path) -> Result<bool, GitError> {
    if !path.is_dir() {
        return Ok(false);
    }
    let output = git(path, &["rev-parse", "--git-dir"])?;
    Ok(output.status.success())
}

/// Returns false while `HEAD` is unborn, as in a freshly initialised repo.
fn has_commits(repo: &Path) -> Result<bool, GitError> {
    let output = git(repo, &["rev-parse", "--verify", "--quiet", "HEAD"])?;
    Ok(output.status.success())
}

fn git(repo: &Path, args: &[&str]) -> Result<Output, GitError> {
    Ok(Command::new("git")
        .args(args)
        .current_dir(repo)
        .env("LC_ALL", "C")
        .output()?)
}
