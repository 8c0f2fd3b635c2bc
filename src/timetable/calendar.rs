//! Academic week calendar
//!
//! Maps academic week numbers (1-52) to the Monday each week starts on.
//! Week 1 starts on the configured first Monday of the academic year and
//! every following week starts seven days later.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// Number of academic weeks in the calendar
pub const WEEK_COUNT: u8 = 52;

/// Fixed mapping from week number to start date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCalendar {
    first_week_start: NaiveDate,
}

impl WeekCalendar {
    /// Create a calendar whose week 1 starts on `first_week_start`
    pub fn new(first_week_start: NaiveDate) -> Self {
        Self { first_week_start }
    }

    /// Start date of `week`, `None` outside 1-52
    pub fn week_start(&self, week: u8) -> Option<NaiveDate> {
        if !(1..=WEEK_COUNT).contains(&week) {
            return None;
        }
        self.first_week_start
            .checked_add_days(Days::new(7 * (u64::from(week) - 1)))
    }

    /// First and last day (inclusive) of `week`
    pub fn week_range(&self, week: u8) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.week_start(week)?;
        let end = start.checked_add_days(Days::new(6))?;
        Some((start, end))
    }

    /// Week containing `date`, `None` before week 1 or after week 52
    pub fn week_of(&self, date: NaiveDate) -> Option<u8> {
        let days = (date - self.first_week_start).num_days();
        if days < 0 {
            return None;
        }
        let week = days / 7 + 1;
        u8::try_from(week)
            .ok()
            .filter(|w| *w <= WEEK_COUNT)
    }

    /// Week to display for `today`, clamped into 1-52
    pub fn current_week(&self, today: NaiveDate) -> u8 {
        match self.week_of(today) {
            Some(week) => week,
            None if today < self.first_week_start => 1,
            None => WEEK_COUNT,
        }
    }

    /// All weeks with their start dates
    pub fn weeks(&self) -> impl Iterator<Item = (u8, NaiveDate)> + '_ {
        (1..=WEEK_COUNT).filter_map(move |w| self.week_start(w).map(|d| (w, d)))
    }
}

/// Whether a date is a Monday, the required first day of week 1
pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Week selection as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekSelection {
    /// Show every session regardless of weeks
    All,
    /// The week containing today
    Current,
    /// The week after the current one
    Next,
    /// The week before the current one
    Previous,
    /// A specific week number
    Week(u8),
}

impl WeekSelection {
    /// Resolve against the calendar; `None` means every week
    pub fn resolve(&self, calendar: &WeekCalendar, today: NaiveDate) -> Option<u8> {
        let current = calendar.current_week(today);
        match self {
            WeekSelection::All => None,
            WeekSelection::Current => Some(current),
            WeekSelection::Next => Some((current + 1).min(WEEK_COUNT)),
            WeekSelection::Previous => Some(current.saturating_sub(1).max(1)),
            WeekSelection::Week(w) => Some(*w),
        }
    }
}

impl FromStr for WeekSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(WeekSelection::All),
            "current" => Ok(WeekSelection::Current),
            "next" => Ok(WeekSelection::Next),
            "prev" | "previous" => Ok(WeekSelection::Previous),
            other => match other.parse::<u8>() {
                Ok(w) if (1..=WEEK_COUNT).contains(&w) => Ok(WeekSelection::Week(w)),
                _ => Err(format!(
                    "invalid week '{}': expected all, current, next, prev or 1-{}",
                    s, WEEK_COUNT
                )),
            },
        }
    }
}

impl fmt::Display for WeekSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekSelection::All => write!(f, "all"),
            WeekSelection::Current => write!(f, "current"),
            WeekSelection::Next => write!(f, "next"),
            WeekSelection::Previous => write!(f, "prev"),
            WeekSelection::Week(w) => write!(f, "{}", w),
        }
    }
}
