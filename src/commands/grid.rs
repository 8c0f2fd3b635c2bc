//! Terminal painting of the weekly grid

use crate::error::Result;
use crate::grid::{render_grid, Grid, GridCell, SessionCell, WeekFilter};
use crate::schedule::ScheduleStore;
use crate::theme::Theme;
use crate::timetable::calendar::{WeekCalendar, WeekSelection};
use crate::timetable::periods::{MORNING_LAST_PERIOD, PERIOD_TIMES};
use crate::timetable::session::Day;
use chrono::NaiveDate;
use colored::{Color, ColoredString, Colorize};
use prettytable::{format, Cell, Row, Table};

use super::format_date;

const LUNCH_BREAK: &str = "Lunch break";

/// Terminal color for a palette class under `theme`
pub fn palette_color(class: &str, theme: Theme) -> Color {
    let index = class
        .strip_prefix("color-")
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(1);

    let (light, dark) = match index {
        1 => (Color::Blue, Color::BrightCyan),
        2 => (Color::Green, Color::BrightGreen),
        3 => (Color::Magenta, Color::BrightMagenta),
        4 => (Color::Red, Color::BrightRed),
        5 => (Color::Cyan, Color::BrightBlue),
        _ => (Color::Yellow, Color::BrightYellow),
    };

    match theme {
        Theme::Light => light,
        Theme::Dark => dark,
    }
}

fn paint(text: &str, color: Color, bold: bool) -> ColoredString {
    let painted = text.color(color);
    if bold {
        painted.bold()
    } else {
        painted
    }
}

fn session_text(cell: &SessionCell, theme: Theme) -> String {
    let color = palette_color(&cell.color, theme);
    let mut lines = vec![paint(&cell.name, color, true).to_string()];

    if !cell.compact {
        let mut detail = cell.code.clone();
        if let Some(class_type) = &cell.class_type {
            detail.push_str(&format!(" ({})", class_type));
        }
        lines.push(paint(&detail, color, false).to_string());
    }
    if !cell.room.is_empty() {
        lines.push(paint(&cell.room, color, false).to_string());
    }

    lines.join("\n")
}

fn cell_text(grid: &Grid, cell: &GridCell, theme: Theme) -> String {
    match cell {
        GridCell::Empty => String::new(),
        GridCell::Session(session) => session_text(session, theme),
        GridCell::Covered(id) => {
            let color = grid
                .rows()
                .iter()
                .flatten()
                .find_map(|c| match c {
                    GridCell::Session(s) if &s.id == id => Some(palette_color(&s.color, theme)),
                    _ => None,
                })
                .unwrap_or(Color::White);
            paint("┆", color, false).to_string()
        }
    }
}

/// Lay a grid out as a printable table
pub fn build_table(grid: &Grid, theme: Theme) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut header = vec![Cell::new(&"Tiết".bold().to_string())];
    header.extend(
        Day::ALL
            .iter()
            .map(|day| Cell::new(&day.name().bold().to_string())),
    );
    table.set_titles(Row::new(header));

    for (row, period) in grid.rows().iter().zip(PERIOD_TIMES.iter()) {
        let label = format!("Tiết {}\n{}", period.period, period);
        let mut cells = vec![Cell::new(&label)];
        cells.extend(row.iter().map(|cell| Cell::new(&cell_text(grid, cell, theme))));
        table.add_row(Row::new(cells));

        if period.period == MORNING_LAST_PERIOD {
            let mut lunch = vec![Cell::new(&LUNCH_BREAK.dimmed().to_string())];
            lunch.extend(Day::ALL.iter().map(|_| Cell::new("")));
            table.add_row(Row::new(lunch));
        }
    }

    table
}

/// Render and print the grid for a week selection
pub fn show_grid(
    store: &ScheduleStore,
    theme: Theme,
    calendar: &WeekCalendar,
    week: WeekSelection,
    today: NaiveDate,
) -> Result<()> {
    let resolved = week.resolve(calendar, today);
    let grid = render_grid(store.sessions(), WeekFilter::from_week(resolved));

    let heading = match resolved.and_then(|w| calendar.week_range(w).map(|r| (w, r))) {
        Some((w, (start, end))) => format!(
            "Week {} ({} - {})",
            w,
            format_date(start),
            format_date(end)
        ),
        None => "All weeks".to_string(),
    };

    println!("\n{}", heading.bold());
    build_table(&grid, theme).printstd();
    println!("{} session(s) shown", grid.session_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timetable::session::{PeriodRange, SessionDraft};

    fn store() -> ScheduleStore {
        let mut store = ScheduleStore::open(MemoryStore::new());
        store
            .add(SessionDraft {
                name: "Computer Networks".to_string(),
                code: "IT3080".to_string(),
                day: Day::Monday,
                periods: PeriodRange::new(1, 3).unwrap(),
                room: "D9-301".to_string(),
                class_type: Some("LT".to_string()),
                weeks: vec![],
            })
            .unwrap();
        store
    }

    #[test]
    fn test_palette_color_depends_on_theme() {
        assert_eq!(palette_color("color-1", Theme::Light), Color::Blue);
        assert_eq!(palette_color("color-1", Theme::Dark), Color::BrightCyan);
        assert_eq!(palette_color("bogus", Theme::Light), Color::Blue);
    }

    #[test]
    fn test_build_table_has_lunch_row() {
        let store = store();
        let grid = render_grid(store.sessions(), WeekFilter::All);
        let table = build_table(&grid, Theme::Light);
        assert_eq!(table.len(), 13);
    }

    #[test]
    fn test_table_contains_session_and_continuation() {
        colored::control::set_override(false);
        let store = store();
        let grid = render_grid(store.sessions(), WeekFilter::All);
        let table = build_table(&grid, Theme::Dark);

        let first = table.get_row(0).unwrap();
        let text = first.get_cell(1).unwrap().get_content();
        assert!(text.contains("Computer Networks"));
        assert!(text.contains("IT3080 (LT)"));
        assert!(text.contains("D9-301"));

        let second = table.get_row(1).unwrap();
        assert_eq!(second.get_cell(1).unwrap().get_content(), "┆");
        assert_eq!(second.get_cell(2).unwrap().get_content(), "");

        let lunch = table.get_row(6).unwrap();
        assert_eq!(lunch.get_cell(0).unwrap().get_content(), LUNCH_BREAK);
        colored::control::unset_override();
    }
}
