//! CLI subcommand implementations.

pub mod calendar;
pub mod shell;
pub mod stats;
