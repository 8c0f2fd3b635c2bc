//! Week-range expressions such as `25-32,34-42`

use crate::timetable::calendar::WEEK_COUNT;
use std::collections::BTreeSet;
use thiserror::Error;

/// Reasons a week-range expression is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekRangeError {
    /// A token is neither a number nor an `a-b` range
    #[error("invalid week token '{0}'")]
    InvalidToken(String),

    /// A week number outside 1-52
    #[error("week {0} is outside 1-{max}", max = WEEK_COUNT)]
    OutOfRange(u32),

    /// A range whose start is after its end
    #[error("week range {start}-{end} is reversed")]
    Reversed {
        /// Range start
        start: u32,
        /// Range end
        end: u32,
    },
}

/// Expand a comma-separated week expression into ascending, unique weeks
///
/// Blank input means "every week" and yields an empty list.
///
/// # Examples
///
/// ```
/// use timetabler::timetable::weeks::parse_weeks;
///
/// assert_eq!(parse_weeks("5,3,5").unwrap(), vec![3, 5]);
/// assert_eq!(parse_weeks("1-3, 7").unwrap(), vec![1, 2, 3, 7]);
/// assert!(parse_weeks("40-35").is_err());
/// ```
pub fn parse_weeks(input: &str) -> Result<Vec<u8>, WeekRangeError> {
    let mut weeks = BTreeSet::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_week_number(start, token)?;
                let end = parse_week_number(end, token)?;
                if start > end {
                    return Err(WeekRangeError::Reversed {
                        start: u32::from(start),
                        end: u32::from(end),
                    });
                }
                weeks.extend(start..=end);
            }
            None => {
                weeks.insert(parse_week_number(token, token)?);
            }
        }
    }

    Ok(weeks.into_iter().collect())
}

/// Compress sorted weeks back into range form, e.g. `[1, 2, 3, 7]` -> `1-3,7`
pub fn format_weeks(weeks: &[u8]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = weeks.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(",")
}

fn parse_week_number(raw: &str, token: &str) -> Result<u8, WeekRangeError> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| WeekRangeError::InvalidToken(token.to_string()))?;
    if value == 0 || value > u32::from(WEEK_COUNT) {
        return Err(WeekRangeError::OutOfRange(value));
    }
    Ok(value as u8)
}
