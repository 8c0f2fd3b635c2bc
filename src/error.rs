//! Error types for Timetabler
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Timetabler operations
///
/// Covers configuration loading, storage access, session validation and
/// conflict rejection. Per-group import failures are reported separately
/// through [`crate::import::GroupError`] since they never abort an import.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage errors (opening, reading or writing the snapshot database)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A session failed validation before reaching the store
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// A manual add overlaps an existing session on the same day
    #[error("Schedule conflict: {candidate} overlaps {existing}")]
    ScheduleConflict {
        /// Description of the rejected session
        candidate: String,
        /// Description of the session already occupying the slot
        existing: String,
    },

    /// An id or id prefix matched no session
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// An id prefix matched more than one session
    #[error("Ambiguous session id '{prefix}': matches {count} sessions")]
    AmbiguousSessionId {
        /// The prefix supplied by the caller
        prefix: String,
        /// Number of sessions sharing the prefix
        count: usize,
    },

    /// Bulk import failed as a whole (no groups, conflicts, nothing added)
    #[error("Import error: {0}")]
    Import(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Timetabler operations
///
/// Uses `anyhow::Error` so callers get rich context and easy propagation.
pub type Result<T> = anyhow::Result<T>;
