//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::calendar::CalendarArgs;
use crate::commands::shell::ShellArgs;
use crate::commands::stats::StatsArgs;

/// OmniaFortis: a workout log.
///
/// Compose workouts in an interactive shell, export the log, and view
/// totals and a training calendar.
#[derive(Debug, Parser)]
#[command(name = "of", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive logging session.
    Shell(ShellArgs),

    /// Show total workouts, total volume, and today's workouts.
    Stats(StatsArgs),

    /// Show a month of training with workout days marked.
    Calendar(CalendarArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["of", "stats", "--json", "-v", "--config", "of.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("of.toml")));
        let Some(Commands::Stats(args)) = cli.command else {
            panic!("expected stats");
        };
        assert!(args.json);
    }

    #[test]
    fn test_calendar_month_is_validated() {
        assert!(Cli::try_parse_from(["of", "calendar", "--month", "2024-13"]).is_err());
        let cli = Cli::try_parse_from(["of", "calendar", "--month", "2024-02"]).unwrap();
        let Some(Commands::Calendar(args)) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!(args.month.map(|m| m.days_in_month()), Some(29));
    }
}
