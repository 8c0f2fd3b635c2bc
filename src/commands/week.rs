//! Academic week calendar display

use crate::cli::WeekCommand;
use crate::error::Result;
use crate::timetable::calendar::WeekCalendar;
use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{format, Table};

use super::format_date;

/// One line describing `week`, e.g. `Week 3: 25/08/2025 - 31/08/2025`
pub fn describe_week(calendar: &WeekCalendar, week: u8) -> Option<String> {
    let (start, end) = calendar.week_range(week)?;
    Some(format!(
        "Week {}: {} - {}",
        week,
        format_date(start),
        format_date(end)
    ))
}

/// Handle `week` subcommands; no subcommand shows the current week
pub fn handle_week(
    calendar: &WeekCalendar,
    command: Option<WeekCommand>,
    today: NaiveDate,
) -> Result<()> {
    match command.unwrap_or(WeekCommand::Current) {
        WeekCommand::Current => {
            let week = calendar.current_week(today);
            if let Some(line) = describe_week(calendar, week) {
                println!("{}", line.bold());
            }
            if calendar.week_of(today).is_none() {
                println!(
                    "{}",
                    format!("{} is outside the academic year", format_date(today)).yellow()
                );
            }
        }
        WeekCommand::Show { week } => match describe_week(calendar, week) {
            Some(line) => println!("{}", line),
            None => println!("{}", format!("No week {}", week).yellow()),
        },
        WeekCommand::List => {
            let current = calendar.week_of(today);
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row!["Week".bold(), "From".bold(), "To".bold()]);

            for (week, start) in calendar.weeks() {
                let end = calendar
                    .week_range(week)
                    .map(|(_, end)| format_date(end))
                    .unwrap_or_default();
                let label = if current == Some(week) {
                    format!("{} *", week).green().bold()
                } else {
                    week.to_string().normal()
                };
                table.add_row(prettytable::row![label, format_date(start), end]);
            }

            table.printstd();
        }
    }

    Ok(())
}
