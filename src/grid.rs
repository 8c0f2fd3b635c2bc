//! Weekly grid projection
//!
//! [`render_grid`] lays the schedule out as 12 period rows by 6 day columns.
//! A session occupies the cell of its first period and spans down over the
//! rest of its range; the spanned cells are marked as covered. The result is
//! a plain value, painted by the CLI or any other front end.

use crate::timetable::periods::PERIOD_COUNT;
use crate::timetable::session::{Day, SessionRecord};

/// Which sessions to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekFilter {
    /// Every session
    All,
    /// Sessions held in this academic week
    Week(u8),
}

impl WeekFilter {
    /// Build from an optional week number
    pub fn from_week(week: Option<u8>) -> Self {
        week.map_or(WeekFilter::All, WeekFilter::Week)
    }

    fn admits(&self, session: &SessionRecord) -> bool {
        match self {
            WeekFilter::All => true,
            WeekFilter::Week(w) => session.occurs_in_week(*w),
        }
    }
}

/// Display data for a placed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCell {
    pub id: String,
    pub name: String,
    pub code: String,
    pub room: String,
    pub class_type: Option<String>,
    pub color: String,
    /// Number of period rows the cell spans
    pub row_span: u8,
    /// PE sessions are drawn at reduced height
    pub compact: bool,
}

/// One grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Empty,
    Session(SessionCell),
    /// Merged into the session cell above; holds that session's id
    Covered(String),
}

/// Period x day grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<GridCell>>,
}

impl Grid {
    fn empty() -> Self {
        Self {
            rows: vec![vec![GridCell::Empty; Day::ALL.len()]; PERIOD_COUNT as usize],
        }
    }

    /// Cell at `(day, period)`, period 1-based
    pub fn cell(&self, day: Day, period: u8) -> Option<&GridCell> {
        let row = usize::from(period).checked_sub(1)?;
        self.rows.get(row)?.get(day.column())
    }

    /// Rows in period order, each holding the six day columns
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    /// Number of sessions placed
    pub fn session_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| matches!(c, GridCell::Session(_)))
            .count()
    }

    fn is_free(&self, column: usize, start: u8, end: u8) -> bool {
        (start..=end).all(|p| matches!(self.rows[usize::from(p) - 1][column], GridCell::Empty))
    }
}

/// Project sessions onto a fresh grid
pub fn render_grid(sessions: &[SessionRecord], filter: WeekFilter) -> Grid {
    let mut grid = Grid::empty();

    for session in sessions.iter().filter(|s| filter.admits(s)) {
        let column = session.day.column();
        let start = session.periods.start();
        let end = session.periods.end();

        if !grid.is_free(column, start, end) {
            tracing::warn!(
                id = %session.id,
                "Skipping {} in grid: slot already occupied",
                session
            );
            continue;
        }

        grid.rows[usize::from(start) - 1][column] = GridCell::Session(SessionCell {
            id: session.id.clone(),
            name: session.name.clone(),
            code: session.code.clone(),
            room: session.room.clone(),
            class_type: session.class_type.clone(),
            color: session.color().to_string(),
            row_span: session.periods.span(),
            compact: session.is_physical_education(),
        });

        for period in start + 1..=end {
            grid.rows[usize::from(period) - 1][column] = GridCell::Covered(session.id.clone());
        }
    }

    grid
}
