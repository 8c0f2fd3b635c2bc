//! Configuration management for Timetabler
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TimetableError};
use crate::import::ImportOptions;
use crate::timetable::calendar::{is_week_start, WeekCalendar};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Largest accepted clock-time tolerance in minutes
const MAX_TIME_TOLERANCE: u16 = 30;

/// Main configuration structure for Timetabler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the schedule database lives
    #[serde(default)]
    pub storage: StorageConfig,
    /// Academic calendar anchor
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Bulk import behavior
    #[serde(default)]
    pub import: ImportOptions,
    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Warnings raised while loading, held until logging is initialized
    #[serde(skip)]
    load_warnings: Vec<String>,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database path; `None` uses the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Academic calendar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Monday on which academic week 1 starts
    #[serde(default = "default_first_week_start")]
    pub first_week_start: NaiveDate,
}

fn default_first_week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 11).unwrap_or_default()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_week_start: default_first_week_start(),
        }
    }
}

impl CalendarConfig {
    /// Week calendar anchored at `first_week_start`
    pub fn week_calendar(&self) -> WeekCalendar {
        WeekCalendar::new(self.first_week_start)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `timetabler=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,

    /// Optional file receiving a copy of the log
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "timetabler=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            let mut config = Self::default();
            config
                .load_warnings
                .push(format!("Config file not found at {}, using defaults", path));
            config
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TimetableError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TimetableError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(db_path) = std::env::var("TIMETABLER_DB") {
            self.storage.path = Some(PathBuf::from(&db_path));
            tracing::debug!(db_path = %db_path, "Env override: TIMETABLER_DB");
        }

        if let Ok(first_week) = std::env::var("TIMETABLER_FIRST_WEEK") {
            match first_week.parse::<NaiveDate>() {
                Ok(date) => {
                    self.calendar.first_week_start = date;
                    tracing::debug!(first_week = %date, "Env override: TIMETABLER_FIRST_WEEK");
                }
                Err(_) => {
                    self.load_warnings
                        .push(format!("Invalid TIMETABLER_FIRST_WEEK: {}", first_week));
                }
            }
        }

        if let Ok(tolerance) = std::env::var("TIMETABLER_TIME_TOLERANCE") {
            match tolerance.parse::<u16>() {
                Ok(v) => {
                    self.import.time_tolerance_minutes = v;
                    tracing::debug!(tolerance = v, "Env override: TIMETABLER_TIME_TOLERANCE");
                }
                Err(_) => {
                    self.load_warnings
                        .push(format!("Invalid TIMETABLER_TIME_TOLERANCE: {}", tolerance));
                }
            }
        }

        if let Ok(level) = std::env::var("TIMETABLER_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(json_logs) = std::env::var("TIMETABLER_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json_format = v,
                Err(_) => {
                    self.load_warnings.push(format!(
                        "Invalid value for TIMETABLER_JSON_LOGS: {}",
                        json_logs
                    ));
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(PathBuf::from(path));
        }
        if cli.verbose {
            self.logging.level = "timetabler=debug".to_string();
        }
    }

    /// Drain warnings collected by [`Config::load`]
    ///
    /// `load` runs before the subscriber exists, so the caller logs these
    /// once logging is up.
    pub fn take_load_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.load_warnings)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.import.time_tolerance_minutes > MAX_TIME_TOLERANCE {
            return Err(TimetableError::Config(format!(
                "time_tolerance_minutes must be at most {}",
                MAX_TIME_TOLERANCE
            ))
            .into());
        }

        if !is_week_start(self.calendar.first_week_start) {
            return Err(TimetableError::Config(format!(
                "first_week_start must be a Monday, got {}",
                self.calendar.first_week_start
            ))
            .into());
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(TimetableError::Config(format!(
                "Invalid log level: {}",
                self.logging.level
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.path.is_none());
        assert_eq!(
            config.calendar.first_week_start,
            NaiveDate::from_ymd_opt(2025, 8, 11).unwrap()
        );
        assert_eq!(config.import.time_tolerance_minutes, 5);
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_tolerance_too_large() {
        let mut config = Config::default();
        config.import.time_tolerance_minutes = 45;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_first_week_not_monday() {
        let mut config = Config::default();
        config.calendar.first_week_start = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
storage:
  path: /tmp/tkb/schedule.db
calendar:
  first_week_start: 2026-02-02
import:
  time_tolerance_minutes: 10
logging:
  level: debug
  json_format: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/tkb/schedule.db"))
        );
        assert_eq!(
            config.calendar.first_week_start,
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
        );
        assert_eq!(config.import.time_tolerance_minutes, 10);
        assert!(config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("import: {}\n").unwrap();
        assert_eq!(config.import.time_tolerance_minutes, 5);
        assert_eq!(config.logging.level, "timetabler=warn");
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = Cli::try_parse_from(["timetabler", "list"]).unwrap();
        let mut config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(config.import.time_tolerance_minutes, 5);

        let warnings = config.take_load_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config file not found"));
        assert!(config.take_load_warnings().is_empty());
    }

    #[test]
    #[serial]
    fn test_invalid_env_value_is_held_as_warning() {
        std::env::set_var("TIMETABLER_TIME_TOLERANCE", "soon");
        let cli = Cli::try_parse_from(["timetabler", "list"]).unwrap();
        let mut config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        std::env::remove_var("TIMETABLER_TIME_TOLERANCE");

        assert_eq!(config.import.time_tolerance_minutes, 5);
        assert!(config
            .take_load_warnings()
            .iter()
            .any(|w| w == "Invalid TIMETABLER_TIME_TOLERANCE: soon"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("TIMETABLER_TIME_TOLERANCE", "12");
        std::env::set_var("TIMETABLER_FIRST_WEEK", "2026-01-05");
        let cli = Cli::try_parse_from(["timetabler", "list"]).unwrap();
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        std::env::remove_var("TIMETABLER_TIME_TOLERANCE");
        std::env::remove_var("TIMETABLER_FIRST_WEEK");

        assert_eq!(config.import.time_tolerance_minutes, 12);
        assert_eq!(
            config.calendar.first_week_start,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "timetabler",
            "--verbose",
            "--storage-path",
            "/tmp/x.db",
            "list",
        ])
        .unwrap();
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.logging.level, "timetabler=debug");
    }
}
