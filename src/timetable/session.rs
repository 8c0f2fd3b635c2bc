//! Session records and their building blocks

use crate::error::TimetableError;
use crate::timetable::periods::{MORNING_LAST_PERIOD, PERIOD_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Teaching day, numbered by the institutional convention Monday=2 ... Saturday=7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All teaching days in column order
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Institutional day number (2-7)
    pub fn number(&self) -> u8 {
        match self {
            Day::Monday => 2,
            Day::Tuesday => 3,
            Day::Wednesday => 4,
            Day::Thursday => 5,
            Day::Friday => 6,
            Day::Saturday => 7,
        }
    }

    /// Zero-based grid column
    pub fn column(&self) -> usize {
        usize::from(self.number() - 2)
    }

    /// English day name
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl TryFrom<u8> for Day {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Day::Monday),
            3 => Ok(Day::Tuesday),
            4 => Ok(Day::Wednesday),
            5 => Ok(Day::Thursday),
            6 => Ok(Day::Friday),
            7 => Ok(Day::Saturday),
            other => Err(format!("day must be between 2 and 7, got {}", other)),
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.number()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.number())
    }
}

/// Part of the day a class is held in, from the `S`/`C`/`T` marker suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// `S` (sáng)
    Morning,
    /// `C` (chiều)
    Afternoon,
    /// `T` (tối)
    Evening,
}

impl Slot {
    /// Parse the marker letter, case-insensitively
    pub fn from_marker(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'S' => Some(Slot::Morning),
            'C' => Some(Slot::Afternoon),
            'T' => Some(Slot::Evening),
            _ => None,
        }
    }

    /// Afternoon and evening periods live in the 7-12 half of the table
    pub fn is_late(&self) -> bool {
        matches!(self, Slot::Afternoon | Slot::Evening)
    }
}

/// Inclusive range of periods, always within 1-12 with start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodRange {
    #[serde(rename = "startPeriod")]
    start: u8,
    #[serde(rename = "endPeriod")]
    end: u8,
}

impl PeriodRange {
    /// Validate and build a range
    pub fn new(start: u8, end: u8) -> Result<Self, TimetableError> {
        if start == 0 || end > PERIOD_COUNT {
            return Err(TimetableError::InvalidSession(format!(
                "periods must be between 1 and {}, got {}-{}",
                PERIOD_COUNT, start, end
            )));
        }
        if start > end {
            return Err(TimetableError::InvalidSession(format!(
                "start period {} is after end period {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// First period
    pub fn start(&self) -> u8 {
        self.start
    }

    /// Last period
    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of periods covered
    pub fn span(&self) -> u8 {
        self.end - self.start + 1
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &PeriodRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Whether the range is inside the table bounds with start <= end
    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.end <= PERIOD_COUNT && self.start <= self.end
    }
}

/// Move local period numbers of an afternoon/evening slot into the 7-12 half
pub fn shift_for_slot(slot: Slot, start: u8, end: u8) -> (u8, u8) {
    if slot.is_late() && start <= MORNING_LAST_PERIOD && end <= MORNING_LAST_PERIOD {
        (start + MORNING_LAST_PERIOD, end + MORNING_LAST_PERIOD)
    } else {
        (start, end)
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tiết {}-{}", self.start, self.end)
    }
}

/// Physical-education courses have codes starting with `PE` and a digit
///
/// # Examples
///
/// ```
/// use timetabler::timetable::session::is_physical_education;
///
/// assert!(is_physical_education("PE1014"));
/// assert!(is_physical_education("pe2"));
/// assert!(!is_physical_education("PEX101"));
/// ```
pub fn is_physical_education(code: &str) -> bool {
    let mut chars = code.chars();
    let prefix: String = chars.by_ref().take(2).collect();
    prefix.eq_ignore_ascii_case("PE") && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Generate a new unique session id
pub fn new_session_id() -> String {
    Ulid::new().to_string()
}

/// A session that has not been admitted to the store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    /// Course display name
    pub name: String,
    /// Course code
    pub code: String,
    /// Teaching day
    pub day: Day,
    /// Periods occupied
    pub periods: PeriodRange,
    /// Room
    pub room: String,
    /// Optional class type label (lecture, lab, ...)
    pub class_type: Option<String>,
    /// Weeks the session recurs on; empty means every week
    pub weeks: Vec<u8>,
}

impl SessionDraft {
    /// Whether the draft belongs to a PE course
    pub fn is_physical_education(&self) -> bool {
        is_physical_education(&self.code)
    }
}

impl fmt::Display for SessionDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} {}",
            self.name, self.code, self.day, self.periods
        )
    }
}

/// A scheduled session held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique identifier, immutable after creation
    pub id: String,
    pub name: String,
    pub code: String,
    pub day: Day,
    #[serde(flatten)]
    pub periods: PeriodRange,
    pub room: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    #[serde(default)]
    is_physical_education: bool,
    #[serde(default)]
    pub weeks: Vec<u8>,
    color: String,
}

impl SessionRecord {
    /// Admit a draft under a fresh id with the course color
    pub(crate) fn from_draft(draft: SessionDraft, color: String) -> Self {
        let is_physical_education = draft.is_physical_education();
        Self {
            id: new_session_id(),
            name: draft.name,
            code: draft.code,
            day: draft.day,
            periods: draft.periods,
            room: draft.room,
            class_type: draft.class_type,
            is_physical_education,
            weeks: draft.weeks,
            color,
        }
    }

    /// Palette class assigned to this session's course
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether the session belongs to a PE course; fixed by the code at admission
    pub fn is_physical_education(&self) -> bool {
        self.is_physical_education
    }

    /// Whether the session occurs in `week`; sessions without weeks occur every week
    pub fn occurs_in_week(&self, week: u8) -> bool {
        self.weeks.is_empty() || self.weeks.contains(&week)
    }
}

impl fmt::Display for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} {}",
            self.name, self.code, self.day, self.periods
        )
    }
}
