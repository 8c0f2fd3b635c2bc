//! Manual session editing: add, list, delete, reset

use crate::error::{Result, TimetableError};
use crate::schedule::ScheduleStore;
use crate::timetable::calendar::{WeekCalendar, WeekSelection};
use crate::timetable::periods::period_time;
use crate::timetable::session::{Day, PeriodRange, SessionDraft, SessionRecord};
use crate::timetable::weeks::{format_weeks, parse_weeks};
use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{format, Table};
use std::io::{BufRead, Write};

/// Fields of a manually entered session
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub name: String,
    pub code: String,
    pub day: u8,
    pub start: u8,
    pub end: u8,
    pub room: String,
    pub class_type: Option<String>,
    pub weeks: String,
}

impl NewSession {
    /// Validate the raw fields into a draft
    ///
    /// # Errors
    ///
    /// Returns `InvalidSession` for an unknown day, a bad period range or a
    /// bad week expression
    pub fn into_draft(self) -> Result<SessionDraft> {
        let day = Day::try_from(self.day).map_err(TimetableError::InvalidSession)?;
        let periods = PeriodRange::new(self.start, self.end)?;
        let weeks = parse_weeks(&self.weeks)
            .map_err(|e| TimetableError::InvalidSession(e.to_string()))?;

        Ok(SessionDraft {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            day,
            periods,
            room: self.room.trim().to_string(),
            class_type: self
                .class_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            weeks,
        })
    }
}

/// Add one session and print the result
pub fn add_session(store: &mut ScheduleStore, session: NewSession) -> Result<SessionRecord> {
    let draft = session.into_draft()?;
    let record = store.add(draft)?;

    println!("{}", format!("Added {}", record).green());
    println!("  id: {}", record.id.cyan());
    Ok(record)
}

/// Sessions matching a week selection, ordered by day then period
pub fn select_sessions<'a>(
    store: &'a ScheduleStore,
    calendar: &WeekCalendar,
    week: WeekSelection,
    today: NaiveDate,
) -> Vec<&'a SessionRecord> {
    let week = week.resolve(calendar, today);
    let mut sessions: Vec<&SessionRecord> = store
        .sessions()
        .iter()
        .filter(|s| week.map_or(true, |w| s.occurs_in_week(w)))
        .collect();
    sessions.sort_by_key(|s| (s.day, s.periods.start()));
    sessions
}

/// Print sessions as a table
pub fn list_sessions(
    store: &ScheduleStore,
    calendar: &WeekCalendar,
    week: WeekSelection,
    today: NaiveDate,
) -> Result<()> {
    let sessions = select_sessions(store, calendar, week, today);

    if sessions.is_empty() {
        println!("{}", "No sessions scheduled.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Day".bold(),
        "Periods".bold(),
        "Time".bold(),
        "Course".bold(),
        "Code".bold(),
        "Room".bold(),
        "Type".bold(),
        "Weeks".bold()
    ]);

    for session in &sessions {
        let time = match (
            period_time(session.periods.start()),
            period_time(session.periods.end()),
        ) {
            (Some(first), Some(last)) => format!("{} - {}", first.start, last.end),
            _ => "-".to_string(),
        };
        let weeks = if session.weeks.is_empty() {
            "all".to_string()
        } else {
            format_weeks(&session.weeks)
        };

        table.add_row(prettytable::row![
            session.id.cyan(),
            session.day,
            session.periods,
            time,
            session.name,
            session.code,
            session.room,
            session.class_type.as_deref().unwrap_or("-"),
            weeks
        ]);
    }

    println!("\nSessions ({}):", sessions.len());
    table.printstd();
    println!();
    Ok(())
}

/// Delete a session by id or unique id prefix
pub fn delete_session(store: &mut ScheduleStore, id_or_prefix: &str) -> Result<()> {
    let id = store.resolve_id(id_or_prefix)?;
    match store.remove(&id)? {
        Some(removed) => {
            println!("{}", format!("Deleted {}", removed).green());
            Ok(())
        }
        None => Err(TimetableError::SessionNotFound(id).into()),
    }
}

/// Ask a yes/no question on `output`, reading the answer from `input`
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Delete everything, after confirmation unless `yes` is set
pub fn reset_schedule(store: &mut ScheduleStore, yes: bool) -> Result<()> {
    if store.is_empty() {
        println!("{}", "Schedule is already empty.".yellow());
        return Ok(());
    }

    if !yes {
        let prompt = format!("Delete all {} sessions?", store.sessions().len());
        let stdin = std::io::stdin();
        if !confirm(&prompt, &mut stdin.lock(), &mut std::io::stdout())? {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.reset_all()?;
    println!("{}", "Schedule cleared.".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::io::Cursor;

    fn new_session(code: &str, day: u8, start: u8, end: u8, weeks: &str) -> NewSession {
        NewSession {
            name: format!("Course {}", code),
            code: code.to_string(),
            day,
            start,
            end,
            room: " D9-301 ".to_string(),
            class_type: Some("LT".to_string()),
            weeks: weeks.to_string(),
        }
    }

    fn calendar() -> WeekCalendar {
        WeekCalendar::new(NaiveDate::from_ymd_opt(2025, 8, 11).unwrap())
    }

    #[test]
    fn test_into_draft_trims_and_parses() {
        let draft = new_session("IT3080", 3, 2, 4, "1-3,5").into_draft().unwrap();
        assert_eq!(draft.day, Day::Tuesday);
        assert_eq!(draft.periods, PeriodRange::new(2, 4).unwrap());
        assert_eq!(draft.room, "D9-301");
        assert_eq!(draft.weeks, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_into_draft_rejects_bad_fields() {
        assert!(new_session("X", 1, 1, 2, "").into_draft().is_err());
        assert!(new_session("X", 2, 5, 2, "").into_draft().is_err());
        assert!(new_session("X", 2, 1, 2, "9-3").into_draft().is_err());
    }

    #[test]
    fn test_blank_class_type_becomes_none() {
        let mut session = new_session("X", 2, 1, 2, "");
        session.class_type = Some("  ".to_string());
        assert_eq!(session.into_draft().unwrap().class_type, None);
    }

    #[test]
    fn test_add_and_delete_by_prefix() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        let record = add_session(&mut store, new_session("IT3080", 2, 1, 3, "")).unwrap();

        delete_session(&mut store, &record.id[..24]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        assert!(delete_session(&mut store, "01ZZZ").is_err());
    }

    #[test]
    fn test_select_sessions_filters_and_orders() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        add_session(&mut store, new_session("B", 4, 1, 2, "")).unwrap();
        add_session(&mut store, new_session("A", 2, 7, 9, "1-4")).unwrap();
        add_session(&mut store, new_session("C", 2, 1, 3, "10")).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 8, 12).unwrap();

        let all = select_sessions(&store, &calendar(), WeekSelection::All, today);
        let codes: Vec<&str> = all.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "A", "B"]);

        let current = select_sessions(&store, &calendar(), WeekSelection::Current, today);
        let codes: Vec<&str> = current.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_confirm_answers() {
        let mut out = Vec::new();
        assert!(confirm("Sure?", &mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(confirm("Sure?", &mut Cursor::new("YES\n"), &mut out).unwrap());
        assert!(!confirm("Sure?", &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!confirm("Sure?", &mut Cursor::new(""), &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Sure? [y/N]"));
    }

    #[test]
    fn test_reset_with_yes() {
        let mut store = ScheduleStore::open(MemoryStore::new());
        add_session(&mut store, new_session("A", 2, 1, 2, "")).unwrap();
        reset_schedule(&mut store, true).unwrap();
        assert!(store.is_empty());
    }
}
