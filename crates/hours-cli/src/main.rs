use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hours_cli::commands::estimate;
use hours_cli::{Cli, Config};
use hours_git::GitLog;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only the estimate
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let estimate_config = config
        .estimate_config()
        .context("invalid estimation settings")?;
    let source = GitLog::new(&config.repo_path);

    let mut stdout = std::io::stdout().lock();
    estimate::run(&mut stdout, &source, &estimate_config, cli.json)
        .with_context(|| {
            format!(
                "failed to estimate hours for {}",
                source.repo_path().display()
            )
        })
}
