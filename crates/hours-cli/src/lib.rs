//! git-hours CLI library.
//!
//! This crate provides the CLI interface for git-hours.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::{Config, ConfigOverrides};
