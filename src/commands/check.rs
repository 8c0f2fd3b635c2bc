//! Slot availability check

use crate::error::{Result, TimetableError};
use crate::schedule::ScheduleStore;
use crate::timetable::conflict::conflicts_with;
use crate::timetable::session::{Day, PeriodRange};
use colored::Colorize;

/// Report whether `(day, start..=end)` is free; returns `true` when it is
pub fn check_slot(store: &ScheduleStore, day: u8, start: u8, end: u8) -> Result<bool> {
    let day = Day::try_from(day).map_err(TimetableError::InvalidSession)?;
    let periods = PeriodRange::new(start, end)?;

    if !store.has_conflict(day, periods, None) {
        println!("{}", format!("{} {} is free", day, periods).green());
        return Ok(true);
    }

    println!("{}", format!("{} {} is taken by:", day, periods).red());
    for session in conflicts_with(store.sessions(), day, periods, None) {
        println!("  {}", session);
    }
    Ok(false)
}
