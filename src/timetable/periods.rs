//! Fixed period table
//!
//! The institution divides each day into twelve periods. Periods 1-6 form the
//! morning block and 7-12 the afternoon block, with a lunch break between
//! periods 6 and 7.

use std::fmt;

/// Number of periods in a day
pub const PERIOD_COUNT: u8 = 12;

/// Last period of the morning block
pub const MORNING_LAST_PERIOD: u8 = 6;

/// A wall-clock time of day with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Create a clock time from hour and minute
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            minutes: hour as u16 * 60 + minute as u16,
        }
    }

    /// Parse `H:MM` or `HH:MM`
    ///
    /// # Examples
    ///
    /// ```
    /// use timetabler::timetable::periods::ClockTime;
    ///
    /// assert_eq!(ClockTime::parse("6:50"), Some(ClockTime::new(6, 50)));
    /// assert_eq!(ClockTime::parse("25:00"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (hour, minute) = s.trim().split_once(':')?;
        let hour: u8 = hour.trim().parse().ok()?;
        let minute: u8 = minute.trim().parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self::new(hour, minute))
    }

    /// Minutes since midnight
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    fn distance(&self, other: ClockTime) -> u16 {
        self.minutes.abs_diff(other.minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Start and end time of one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTime {
    /// Period index, 1-based
    pub period: u8,
    /// Clock time the period starts
    pub start: ClockTime,
    /// Clock time the period ends
    pub end: ClockTime,
}

impl PeriodTime {
    const fn new(period: u8, start: ClockTime, end: ClockTime) -> Self {
        Self { period, start, end }
    }

    /// Whether `time` falls within `[start, end]`
    pub fn contains(&self, time: ClockTime) -> bool {
        time >= self.start && time <= self.end
    }
}

impl fmt::Display for PeriodTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// The institutional period table
pub const PERIOD_TIMES: [PeriodTime; PERIOD_COUNT as usize] = [
    PeriodTime::new(1, ClockTime::new(6, 45), ClockTime::new(7, 30)),
    PeriodTime::new(2, ClockTime::new(7, 30), ClockTime::new(8, 15)),
    PeriodTime::new(3, ClockTime::new(8, 25), ClockTime::new(9, 10)),
    PeriodTime::new(4, ClockTime::new(9, 20), ClockTime::new(10, 5)),
    PeriodTime::new(5, ClockTime::new(10, 15), ClockTime::new(11, 0)),
    PeriodTime::new(6, ClockTime::new(11, 0), ClockTime::new(11, 45)),
    PeriodTime::new(7, ClockTime::new(12, 30), ClockTime::new(13, 15)),
    PeriodTime::new(8, ClockTime::new(13, 15), ClockTime::new(14, 0)),
    PeriodTime::new(9, ClockTime::new(14, 10), ClockTime::new(14, 55)),
    PeriodTime::new(10, ClockTime::new(15, 5), ClockTime::new(15, 50)),
    PeriodTime::new(11, ClockTime::new(16, 0), ClockTime::new(16, 45)),
    PeriodTime::new(12, ClockTime::new(16, 45), ClockTime::new(17, 30)),
];

/// Look up the clock times of a period
pub fn period_time(period: u8) -> Option<&'static PeriodTime> {
    PERIOD_TIMES.iter().find(|p| p.period == period)
}

/// Period whose start lies within `tolerance` minutes of `time`
///
/// The closest start wins; on equal distance the earlier period is kept.
pub fn period_starting_near(time: ClockTime, tolerance: u16) -> Option<u8> {
    closest_within(time, tolerance, |p| p.start)
}

/// Period whose end lies within `tolerance` minutes of `time`
pub fn period_ending_near(time: ClockTime, tolerance: u16) -> Option<u8> {
    closest_within(time, tolerance, |p| p.end)
}

fn closest_within(
    time: ClockTime,
    tolerance: u16,
    boundary: impl Fn(&PeriodTime) -> ClockTime,
) -> Option<u8> {
    let mut best: Option<(u8, u16)> = None;
    for p in PERIOD_TIMES.iter() {
        let diff = time.distance(boundary(p));
        if diff > tolerance {
            continue;
        }
        match best {
            Some((_, best_diff)) if best_diff <= diff => {}
            _ => best = Some((p.period, diff)),
        }
    }
    best.map(|(period, _)| period)
}

/// Approximate period for times that do not align to period boundaries
///
/// Returns the first period whose window contains `time`, otherwise the
/// latest period starting at or before it. `None` when `time` is earlier than
/// the first period.
pub fn period_covering(time: ClockTime) -> Option<u8> {
    if let Some(p) = PERIOD_TIMES.iter().find(|p| p.contains(time)) {
        return Some(p.period);
    }
    PERIOD_TIMES
        .iter()
        .filter(|p| p.start <= time)
        .max_by_key(|p| p.start)
        .map(|p| p.period)
}
