//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// Estimate hours worked from git commit history.
///
/// Commits are grouped into sessions: consecutive commits closer together
/// than the maximum gap belong to the same session. The estimate is the sum
/// of session lengths plus a one-time bonus for the first commit.
#[derive(Debug, Parser)]
#[command(name = "git-hours", version, about, long_about = None)]
pub struct Cli {
    /// Max minutes between commits in the same session [default: 120].
    #[arg(short = 'm', long = "max-diff", value_name = "MINUTES")]
    pub max_diff: Option<u32>,

    /// Extra minutes added for the first commit [default: 120].
    #[arg(short = 'f', long = "first-add", value_name = "MINUTES")]
    pub first_add: Option<u32>,

    /// Work start time [default: 09:00].
    #[arg(short = 's', long, value_name = "HH:MM")]
    pub work_start: Option<String>,

    /// Work end time [default: 17:00].
    #[arg(short = 'e', long, value_name = "HH:MM")]
    pub work_end: Option<String>,

    /// Exclude commits on weekends.
    #[arg(long, overrides_with = "no_skip_weekends")]
    pub skip_weekends: bool,

    /// Count weekend commits even when a config file skips them.
    #[arg(long, overrides_with = "skip_weekends")]
    pub no_skip_weekends: bool,

    /// Path to the git repository [default: .].
    #[arg(short, long, value_name = "REPO_PATH")]
    pub path: Option<PathBuf>,

    /// Only count commits by this author e-mail.
    #[arg(short, long, value_name = "EMAIL")]
    pub author: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line, which take precedence over
    /// config files and the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_session_gap_minutes: self.max_diff,
            first_commit_bonus_minutes: self.first_add,
            work_start: self.work_start.clone(),
            work_end: self.work_end.clone(),
            skip_weekends: if self.skip_weekends {
                Some(true)
            } else if self.no_skip_weekends {
                Some(false)
            } else {
                None
            },
            repo_path: self.path.clone(),
            author: self.author.clone(),
        }
    }
}
