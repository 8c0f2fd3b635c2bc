//! Command-line interface definition for Timetabler
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for editing, importing and viewing the timetable.

use crate::theme::Theme;
use crate::timetable::calendar::{WeekSelection, WEEK_COUNT};
use crate::timetable::periods::PERIOD_COUNT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Timetabler - personal class timetable editor
///
/// Add or bulk-import class sessions, check for clashes and view the
/// week as a period x day grid.
#[derive(Parser, Debug, Clone)]
#[command(name = "timetabler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the schedule database location
    #[arg(long, env = "TIMETABLER_DB")]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Timetabler
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add one class session
    Add {
        /// Course display name
        #[arg(short, long)]
        name: String,

        /// Course code, e.g. IT3080
        #[arg(short = 'C', long)]
        code: String,

        /// Day of week, 2 (Monday) to 7 (Saturday)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(2..=7))]
        day: u8,

        /// First period
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=PERIOD_COUNT as i64))]
        start: u8,

        /// Last period
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=PERIOD_COUNT as i64))]
        end: u8,

        /// Room
        #[arg(short, long, default_value = "")]
        room: String,

        /// Class type label (LT, BT, TN, ...)
        #[arg(short = 't', long = "type")]
        class_type: Option<String>,

        /// Week range, e.g. "1-8,10-18"; empty means every week
        #[arg(short, long, default_value = "")]
        weeks: String,
    },

    /// Bulk-import sessions from pasted text
    Import {
        /// File to read; omit or pass "-" for stdin
        file: Option<PathBuf>,
    },

    /// List sessions
    List {
        /// Only sessions held in this week (all, current, next, prev, 1-52)
        #[arg(short, long, default_value = "all")]
        week: WeekSelection,
    },

    /// Delete a session by id or unique id prefix
    Delete {
        /// Session id
        id: String,
    },

    /// Delete every session and course color
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the weekly grid
    Grid {
        /// Week to show (all, current, next, prev, 1-52)
        #[arg(short, long, default_value = "all")]
        week: WeekSelection,
    },

    /// Academic week calendar
    Week {
        /// Week subcommand
        #[command(subcommand)]
        command: Option<WeekCommand>,
    },

    /// Light/dark theme preference
    Theme {
        /// Theme subcommand
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },

    /// Check whether a slot is free
    Check {
        /// Day of week, 2 (Monday) to 7 (Saturday)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(2..=7))]
        day: u8,

        /// First period
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=PERIOD_COUNT as i64))]
        start: u8,

        /// Last period
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=PERIOD_COUNT as i64))]
        end: u8,
    },
}

/// Week calendar subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WeekCommand {
    /// Show the current academic week
    Current,

    /// Show the date range of one week
    Show {
        /// Week number
        #[arg(value_parser = clap::value_parser!(u8).range(1..=WEEK_COUNT as i64))]
        week: u8,
    },

    /// List all weeks with their date ranges
    List,
}

/// Theme subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ThemeCommand {
    /// Print the saved theme
    Get,

    /// Save a theme
    Set {
        /// light or dark
        theme: Theme,
    },

    /// Switch between light and dark
    Toggle,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_path: None,
            command: Commands::Grid {
                week: WeekSelection::All,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.storage_path.is_none());
        assert!(matches!(
            cli.command,
            Commands::Grid {
                week: WeekSelection::All
            }
        ));
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::try_parse_from([
            "timetabler",
            "add",
            "--name",
            "Computer Networks",
            "--code",
            "IT3080",
            "--day",
            "2",
            "--start",
            "1",
            "--end",
            "3",
            "--room",
            "D9-301",
            "--type",
            "LT",
            "--weeks",
            "1-8",
        ])
        .unwrap();

        if let Commands::Add {
            name,
            code,
            day,
            start,
            end,
            room,
            class_type,
            weeks,
        } = cli.command
        {
            assert_eq!(name, "Computer Networks");
            assert_eq!(code, "IT3080");
            assert_eq!((day, start, end), (2, 1, 3));
            assert_eq!(room, "D9-301");
            assert_eq!(class_type, Some("LT".to_string()));
            assert_eq!(weeks, "1-8");
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_parse_add_rejects_day_out_of_range() {
        let result = Cli::try_parse_from([
            "timetabler", "add", "-n", "X", "-C", "X1", "-d", "8", "-s", "1", "-e", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_add_rejects_period_out_of_range() {
        let result = Cli::try_parse_from([
            "timetabler", "add", "-n", "X", "-C", "X1", "-d", "2", "-s", "1", "-e", "13",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_import_stdin() {
        let cli = Cli::try_parse_from(["timetabler", "import"]).unwrap();
        assert!(matches!(cli.command, Commands::Import { file: None }));
    }

    #[test]
    fn test_cli_parse_import_file() {
        let cli = Cli::try_parse_from(["timetabler", "import", "tkb.txt"]).unwrap();
        if let Commands::Import { file } = cli.command {
            assert_eq!(file, Some(PathBuf::from("tkb.txt")));
        } else {
            panic!("Expected Import command");
        }
    }

    #[test]
    fn test_cli_parse_grid_week() {
        let cli = Cli::try_parse_from(["timetabler", "grid", "--week", "next"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Grid {
                week: WeekSelection::Next
            }
        ));

        let cli = Cli::try_parse_from(["timetabler", "grid", "-w", "12"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Grid {
                week: WeekSelection::Week(12)
            }
        ));
    }

    #[test]
    fn test_cli_parse_grid_invalid_week() {
        assert!(Cli::try_parse_from(["timetabler", "grid", "--week", "53"]).is_err());
    }

    #[test]
    fn test_cli_parse_week_show() {
        let cli = Cli::try_parse_from(["timetabler", "week", "show", "5"]).unwrap();
        if let Commands::Week { command } = cli.command {
            assert_eq!(command, Some(WeekCommand::Show { week: 5 }));
        } else {
            panic!("Expected Week command");
        }
    }

    #[test]
    fn test_cli_parse_theme_set() {
        let cli = Cli::try_parse_from(["timetabler", "theme", "set", "dark"]).unwrap();
        if let Commands::Theme { command } = cli.command {
            assert_eq!(command, Some(ThemeCommand::Set { theme: Theme::Dark }));
        } else {
            panic!("Expected Theme command");
        }
    }

    #[test]
    fn test_cli_parse_reset_yes() {
        let cli = Cli::try_parse_from(["timetabler", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset { yes: true }));
    }

    #[test]
    fn test_cli_parse_check() {
        let cli =
            Cli::try_parse_from(["timetabler", "check", "-d", "3", "-s", "2", "-e", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check {
                day: 3,
                start: 2,
                end: 4
            }
        ));
    }

    #[test]
    fn test_cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "timetabler",
            "--config",
            "custom.yaml",
            "--storage-path",
            "/tmp/tkb.db",
            "-v",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
        assert_eq!(cli.storage_path, Some("/tmp/tkb.db".to_string()));
        assert!(cli.verbose);
    }
}
