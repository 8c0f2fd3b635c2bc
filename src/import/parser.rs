//! Bulk schedule text parser
//!
//! Pasted schedules are split into groups, one per class, each opened by a
//! line holding only a sequence number. A group describes either one meeting
//! (six lines) or several meetings of the same course sharing one metadata
//! line:
//!
//! ```text
//! 1                      1
//! T2(S)                  T3(S)
//! Tiết 1-3               T5(C)
//! 25-32,34-42            Tiết 1-2
//! D9-301                 13:15 - 14:55
//! 1  IT3080  Networks    1-8
//! ...                    1-8
//!                        D3-101
//!                        D3-102
//!                        1  IT3090  Databases  LT+BT
//! ```
//!
//! Fields on the metadata line are tab separated: an ignored leading field,
//! the course code, the course name and an optional class type.

use super::cursor::LineCursor;
use super::{GroupError, GroupIssue, ImportBatch, ImportOptions};
use crate::error::{Result, TimetableError};
use crate::timetable::periods::{
    period_covering, period_ending_near, period_starting_near, ClockTime,
};
use crate::timetable::session::{
    is_physical_education, shift_for_slot, Day, PeriodRange, SessionDraft, Slot,
};
use crate::timetable::weeks::parse_weeks;
use regex::Regex;

/// Lines needed by the smallest (single-session) group
const SINGLE_GROUP_LINES: usize = 6;

/// A parsed `T<d>(<slot>)` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarker {
    /// Teaching day
    pub day: Day,
    /// Morning, afternoon or evening
    pub slot: Slot,
}

/// Raw lines of one meeting inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLines<'a> {
    pub marker: DayMarker,
    pub periods: &'a str,
    pub weeks: &'a str,
    pub room: &'a str,
}

/// Layout detected for one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupShape<'a> {
    /// One meeting; `trailing` counts ignored extra lines
    Single {
        session: SessionLines<'a>,
        metadata: &'a str,
        trailing: usize,
    },
    /// Several meetings sharing one metadata line
    Multi {
        sessions: Vec<SessionLines<'a>>,
        metadata: &'a str,
    },
    /// The group cannot be read
    Malformed(GroupError),
}

/// Course fields from the metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
struct CourseInfo {
    code: String,
    name: String,
    class_type: Option<String>,
}

/// Parser for pasted schedule text
#[derive(Debug, Clone)]
pub struct ImportParser {
    options: ImportOptions,
    day_marker: Regex,
    period_span: Regex,
    clock_span: Regex,
}

impl ImportParser {
    /// Create a parser with the given options
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            day_marker: Regex::new(r"(?i)T(\d)\s*\(([SCT])\)").expect("Invalid regex pattern"),
            period_span: Regex::new(r"(?i)Ti(?:ết|et)\s*(\d+)\s*-\s*(\d+)")
                .expect("Invalid regex pattern"),
            clock_span: Regex::new(r"(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})")
                .expect("Invalid regex pattern"),
        }
    }

    /// Parse a whole pasted block
    ///
    /// Group-level problems are collected in the returned batch. Only input
    /// with nothing to parse at all is an error.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Import` when the text is blank or contains no
    /// sequence-number line.
    pub fn parse(&self, text: &str) -> Result<ImportBatch> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(TimetableError::Import("no data to import".to_string()).into());
        }

        let starts: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| is_sequence_number(l))
            .map(|(i, _)| i)
            .collect();

        if starts.is_empty() {
            return Err(TimetableError::Import(
                "no sequence numbers found; every class must start with a number line"
                    .to_string(),
            )
            .into());
        }

        let mut batch = ImportBatch::default();

        if starts[0] > 0 {
            batch.warnings.push(format!(
                "Ignored {} line(s) before the first sequence number",
                starts[0]
            ));
        }

        for (index, &start) in starts.iter().enumerate() {
            let end = starts.get(index + 1).copied().unwrap_or(lines.len());
            let group = index + 1;
            self.parse_group(group, &lines[start..end], &mut batch);
        }

        tracing::debug!(
            groups = starts.len(),
            drafts = batch.drafts.len(),
            errors = batch.errors.len(),
            "Parsed import text"
        );

        Ok(batch)
    }

    fn parse_group(&self, group: usize, lines: &[&str], batch: &mut ImportBatch) {
        let (sessions, metadata) = match self.detect_shape(lines) {
            GroupShape::Single {
                session,
                metadata,
                trailing,
            } => {
                if trailing > 0 {
                    batch.warnings.push(format!(
                        "Group {}: ignored {} extra line(s)",
                        group, trailing
                    ));
                }
                (vec![session], metadata)
            }
            GroupShape::Multi { sessions, metadata } => (sessions, metadata),
            GroupShape::Malformed(error) => {
                batch.errors.push(GroupIssue::new(group, None, error));
                return;
            }
        };

        let course = match parse_course_info(metadata) {
            Ok(course) => course,
            Err(error) => {
                batch.errors.push(GroupIssue::new(group, None, error));
                return;
            }
        };

        let multi = sessions.len() > 1;
        let mut drafts = Vec::with_capacity(sessions.len());
        for (i, lines) in sessions.iter().enumerate() {
            match self.build_draft(lines, &course) {
                Ok(draft) => drafts.push(draft),
                Err(error) => {
                    let sub_session = multi.then_some(i + 1);
                    batch.errors.push(GroupIssue::new(group, sub_session, error));
                    return;
                }
            }
        }

        batch.drafts.extend(drafts);
    }

    /// Classify a group by its line shapes
    pub fn detect_shape<'a>(&self, lines: &'a [&'a str]) -> GroupShape<'a> {
        let mut cursor = LineCursor::new(lines);

        if cursor.line_count() < SINGLE_GROUP_LINES {
            return GroupShape::Malformed(GroupError::InsufficientLines {
                expected: SINGLE_GROUP_LINES,
                found: cursor.line_count(),
            });
        }

        // sequence number
        cursor.next_line();

        let markers = match self.read_markers(&mut cursor) {
            Ok(markers) => markers,
            Err(error) => return GroupShape::Malformed(error),
        };

        if markers.len() == 1 {
            self.read_single(markers[0], &mut cursor)
        } else {
            self.read_multi(markers, &mut cursor)
        }
    }

    fn read_markers(&self, cursor: &mut LineCursor<'_>) -> std::result::Result<Vec<DayMarker>, GroupError> {
        let mut markers = Vec::new();
        while let Some(line) = cursor.peek() {
            match self.parse_day_marker(line) {
                Some(marker) => {
                    markers.push(marker?);
                    cursor.next_line();
                }
                None => break,
            }
        }
        if markers.is_empty() {
            let line = cursor.peek().unwrap_or_default();
            return Err(GroupError::InvalidDayMarker(line.to_string()));
        }
        Ok(markers)
    }

    fn read_single<'a>(&self, marker: DayMarker, cursor: &mut LineCursor<'a>) -> GroupShape<'a> {
        match cursor.take(4) {
            Some(&[periods, weeks, room, metadata]) => GroupShape::Single {
                session: SessionLines {
                    marker,
                    periods,
                    weeks,
                    room,
                },
                metadata,
                trailing: cursor.remaining(),
            },
            _ => GroupShape::Malformed(GroupError::InsufficientLines {
                expected: SINGLE_GROUP_LINES,
                found: cursor.line_count(),
            }),
        }
    }

    fn read_multi<'a>(&self, markers: Vec<DayMarker>, cursor: &mut LineCursor<'a>) -> GroupShape<'a> {
        let n = markers.len();
        // markers already consumed: periods, weeks, rooms and the metadata line remain
        let expected_rest = 3 * n + 1;
        if cursor.remaining() != expected_rest {
            return GroupShape::Malformed(GroupError::LineCountMismatch {
                sessions: n,
                expected: 4 * n + 1,
                found: cursor.line_count() - 1,
            });
        }

        let (periods, weeks, rooms, metadata) =
            match (cursor.take(n), cursor.take(n), cursor.take(n), cursor.next_line()) {
                (Some(p), Some(w), Some(r), Some(m)) => (p, w, r, m),
                _ => {
                    return GroupShape::Malformed(GroupError::LineCountMismatch {
                        sessions: n,
                        expected: 4 * n + 1,
                        found: cursor.line_count() - 1,
                    })
                }
            };

        let sessions = markers
            .into_iter()
            .enumerate()
            .map(|(i, marker)| SessionLines {
                marker,
                periods: periods[i],
                weeks: weeks[i],
                room: rooms[i],
            })
            .collect();

        GroupShape::Multi { sessions, metadata }
    }

    /// `None` when the line is not a marker at all, `Some(Err)` when it is a
    /// marker naming a day outside T2-T7
    fn parse_day_marker(&self, line: &str) -> Option<std::result::Result<DayMarker, GroupError>> {
        let caps = self.day_marker.captures(line)?;
        let digit: u8 = caps[1].parse().ok()?;
        let slot = caps[2].chars().next().and_then(Slot::from_marker)?;
        Some(
            Day::try_from(digit)
                .map(|day| DayMarker { day, slot })
                .map_err(|_| GroupError::InvalidDayMarker(line.to_string())),
        )
    }

    fn build_draft(
        &self,
        lines: &SessionLines<'_>,
        course: &CourseInfo,
    ) -> std::result::Result<SessionDraft, GroupError> {
        let pe = is_physical_education(&course.code);
        let periods = self.resolve_periods(lines.periods, lines.marker.slot, pe)?;
        let weeks = parse_weeks(lines.weeks).map_err(GroupError::InvalidWeeks)?;

        Ok(SessionDraft {
            name: course.name.clone(),
            code: course.code.clone(),
            day: lines.marker.day,
            periods,
            room: lines.room.trim().to_string(),
            class_type: course.class_type.clone(),
            weeks,
        })
    }

    fn resolve_periods(
        &self,
        line: &str,
        slot: Slot,
        physical_education: bool,
    ) -> std::result::Result<PeriodRange, GroupError> {
        if let Some(caps) = self.period_span.captures(line) {
            let start: u8 = caps[1]
                .parse()
                .map_err(|_| GroupError::UnparseablePeriods(line.to_string()))?;
            let end: u8 = caps[2]
                .parse()
                .map_err(|_| GroupError::UnparseablePeriods(line.to_string()))?;
            return shifted_range(slot, start, end);
        }

        let caps = self
            .clock_span
            .captures(line)
            .ok_or_else(|| GroupError::UnparseablePeriods(line.to_string()))?;
        let start_text = format!("{}:{}", &caps[1], &caps[2]);
        let end_text = format!("{}:{}", &caps[3], &caps[4]);
        let start_time = ClockTime::parse(&start_text)
            .ok_or_else(|| GroupError::UnparseablePeriods(line.to_string()))?;
        let end_time = ClockTime::parse(&end_text)
            .ok_or_else(|| GroupError::UnparseablePeriods(line.to_string()))?;

        let (start, end) = if physical_education {
            let start = period_covering(start_time)
                .ok_or_else(|| GroupError::TimeBeforeFirstPeriod(start_time.to_string()))?;
            let end = period_covering(end_time)
                .ok_or_else(|| GroupError::TimeBeforeFirstPeriod(end_time.to_string()))?;
            tracing::debug!(
                "PE course: approximated {}-{} to periods {}-{}",
                start_time,
                end_time,
                start,
                end
            );
            (start, end)
        } else {
            let tolerance = self.options.time_tolerance_minutes;
            let start = period_starting_near(start_time, tolerance).ok_or_else(|| {
                GroupError::TimeOutsideTolerance {
                    time: start_time.to_string(),
                    tolerance,
                }
            })?;
            let end = period_ending_near(end_time, tolerance).ok_or_else(|| {
                GroupError::TimeOutsideTolerance {
                    time: end_time.to_string(),
                    tolerance,
                }
            })?;
            tracing::debug!(
                "Normalized {}-{} to periods {}-{}",
                start_time,
                end_time,
                start,
                end
            );
            (start, end)
        };

        shifted_range(slot, start, end)
    }
}

/// Applies the afternoon/evening offset, then validates against the period table.
fn shifted_range(
    slot: Slot,
    start: u8,
    end: u8,
) -> std::result::Result<PeriodRange, GroupError> {
    let (start, end) = shift_for_slot(slot, start, end);
    PeriodRange::new(start, end).map_err(|e| GroupError::InvalidPeriods(e.to_string()))
}

impl Default for ImportParser {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

fn is_sequence_number(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

fn parse_course_info(line: &str) -> std::result::Result<CourseInfo, GroupError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 3 {
        return Err(GroupError::MissingMetadata(line.to_string()));
    }

    let code = parts[1].trim();
    let name = parts[2].trim();
    if code.is_empty() || name.is_empty() {
        return Err(GroupError::MissingMetadata(line.to_string()));
    }

    let class_type = parts
        .get(3)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(CourseInfo {
        code: code.to_string(),
        name: name.to_string(),
        class_type,
    })
}
