//! CLI subcommand implementations.

pub mod estimate;
