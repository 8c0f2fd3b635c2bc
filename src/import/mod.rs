//! Bulk import of pasted schedule text
//!
//! [`ImportParser`] turns text into session drafts and per-group issues.
//! Admission into the schedule, including the batch-wide conflict check,
//! happens in [`crate::schedule::ScheduleStore::import`].

pub mod cursor;
pub mod parser;

pub use parser::{DayMarker, GroupShape, ImportParser, SessionLines};

use crate::timetable::session::SessionDraft;
use crate::timetable::weeks::WeekRangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default clock-time tolerance when matching period boundaries
pub const DEFAULT_TIME_TOLERANCE_MINUTES: u16 = 5;

/// Import tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Allowed distance between a clock time and a period boundary
    #[serde(default = "default_time_tolerance")]
    pub time_tolerance_minutes: u16,
}

fn default_time_tolerance() -> u16 {
    DEFAULT_TIME_TOLERANCE_MINUTES
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            time_tolerance_minutes: default_time_tolerance(),
        }
    }
}

/// Why one group (or one meeting inside it) was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("not enough lines (need {expected}, found {found})")]
    InsufficientLines { expected: usize, found: usize },

    #[error("missing or invalid day marker: '{0}'")]
    InvalidDayMarker(String),

    #[error("unrecognised period format: '{0}'")]
    UnparseablePeriods(String),

    #[error("time {time} is more than {tolerance} minutes from any period boundary")]
    TimeOutsideTolerance { time: String, tolerance: u16 },

    #[error("time {0} is before the first period")]
    TimeBeforeFirstPeriod(String),

    #[error("invalid periods: {0}")]
    InvalidPeriods(String),

    #[error("invalid weeks: {0}")]
    InvalidWeeks(WeekRangeError),

    #[error("missing course code or name in '{0}'")]
    MissingMetadata(String),

    #[error("multi-session block with {sessions} meetings needs {expected} lines after the sequence number, found {found}")]
    LineCountMismatch {
        sessions: usize,
        expected: usize,
        found: usize,
    },
}

/// A skipped group with its position in the pasted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIssue {
    /// 1-based group number
    pub group: usize,
    /// 1-based meeting number inside a multi-session group
    pub sub_session: Option<usize>,
    /// What went wrong
    pub error: GroupError,
}

impl GroupIssue {
    pub fn new(group: usize, sub_session: Option<usize>, error: GroupError) -> Self {
        Self {
            group,
            sub_session,
            error,
        }
    }
}

impl fmt::Display for GroupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_session {
            Some(n) => write!(f, "Group {}, session {}: {}", self.group, n, self.error),
            None => write!(f, "Group {}: {}", self.group, self.error),
        }
    }
}

/// Parser output: well-formed drafts plus everything that was skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub drafts: Vec<SessionDraft>,
    pub errors: Vec<GroupIssue>,
    pub warnings: Vec<String>,
}

/// Two sessions that would occupy the same slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPair {
    /// The imported session
    pub candidate: String,
    /// The session it collides with, already stored or earlier in the batch
    pub other: String,
    /// Whether `other` is already in the schedule
    pub other_is_existing: bool,
}

impl fmt::Display for ConflictPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = if self.other_is_existing {
            "existing"
        } else {
            "imported"
        };
        write!(f, "{} <-> {} [{}]", self.candidate, self.other, origin)
    }
}

/// Whether the batch was admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// All drafts were added; holds the new ids
    Committed { added: Vec<String> },
    /// A conflict voided the batch; nothing was added
    Rejected { conflicts: Vec<ConflictPair> },
}

/// Final report shown to the user once per import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub errors: Vec<GroupIssue>,
    pub warnings: Vec<String>,
}

impl ImportReport {
    /// Number of sessions added
    pub fn added_count(&self) -> usize {
        match &self.outcome {
            ImportOutcome::Committed { added } => added.len(),
            ImportOutcome::Rejected { .. } => 0,
        }
    }

    /// Whether a conflict voided the batch
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, ImportOutcome::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_issue_display() {
        let issue = GroupIssue::new(3, None, GroupError::InvalidDayMarker("X".to_string()));
        assert_eq!(issue.to_string(), "Group 3: missing or invalid day marker: 'X'");

        let issue = GroupIssue::new(
            2,
            Some(1),
            GroupError::TimeOutsideTolerance {
                time: "7:00".to_string(),
                tolerance: 5,
            },
        );
        assert_eq!(
            issue.to_string(),
            "Group 2, session 1: time 7:00 is more than 5 minutes from any period boundary"
        );
    }

    #[test]
    fn test_import_options_default() {
        assert_eq!(ImportOptions::default().time_tolerance_minutes, 5);
    }

    #[test]
    fn test_report_counts() {
        let report = ImportReport {
            outcome: ImportOutcome::Committed {
                added: vec!["a".to_string(), "b".to_string()],
            },
            errors: Vec::new(),
            warnings: Vec::new(),
        };
        assert_eq!(report.added_count(), 2);
        assert!(!report.is_rejected());

        let report = ImportReport {
            outcome: ImportOutcome::Rejected {
                conflicts: Vec::new(),
            },
            errors: Vec::new(),
            warnings: Vec::new(),
        };
        assert_eq!(report.added_count(), 0);
        assert!(report.is_rejected());
    }
}
