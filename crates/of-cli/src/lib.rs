//! OmniaFortis CLI library.
//!
//! Holds the interactive shell, the report commands, and configuration
//! for the `of` binary.

pub mod app;
mod cli;
pub mod commands;
mod config;
pub mod render;

pub use app::{App, Flow, ShellCommand};
pub use cli::{Cli, Commands};
pub use config::{Config, WeightUnit};
