//! Timetable domain model
//!
//! Reference data (the period table and the academic week calendar), the
//! session record types, week-range expressions and the conflict rule.

pub mod calendar;
pub mod conflict;
pub mod periods;
pub mod session;
pub mod weeks;

pub use calendar::{WeekCalendar, WeekSelection, WEEK_COUNT};
pub use conflict::has_conflict;
pub use periods::{ClockTime, PeriodTime, PERIOD_COUNT, PERIOD_TIMES};
pub use session::{Day, PeriodRange, SessionDraft, SessionRecord, Slot};
pub use weeks::{format_weeks, parse_weeks, WeekRangeError};
