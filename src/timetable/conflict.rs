//! Time-slot conflict detection
//!
//! Two sessions conflict when they share a day and their inclusive period
//! ranges overlap. Week sets are not consulted.

use crate::timetable::session::{Day, PeriodRange, SessionDraft, SessionRecord};

/// Whether `(day, periods)` overlaps any session in `sessions`
///
/// `exclude_id` skips one record, so an edited session is not compared with
/// itself.
pub fn has_conflict(
    sessions: &[SessionRecord],
    day: Day,
    periods: PeriodRange,
    exclude_id: Option<&str>,
) -> bool {
    conflicts_with(sessions, day, periods, exclude_id)
        .next()
        .is_some()
}

/// Sessions overlapping `(day, periods)`
pub fn conflicts_with<'a>(
    sessions: &'a [SessionRecord],
    day: Day,
    periods: PeriodRange,
    exclude_id: Option<&'a str>,
) -> impl Iterator<Item = &'a SessionRecord> + 'a {
    sessions.iter().filter(move |s| {
        exclude_id != Some(s.id.as_str()) && s.day == day && periods.overlaps(&s.periods)
    })
}

/// Whether two drafts occupy an overlapping slot
pub fn drafts_overlap(a: &SessionDraft, b: &SessionDraft) -> bool {
    a.day == b.day && a.periods.overlaps(&b.periods)
}
