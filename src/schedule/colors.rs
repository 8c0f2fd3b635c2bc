//! Per-course palette colors
//!
//! Each course code gets one palette class the first time it is seen,
//! round-robin over a fixed palette. The entry is dropped when the last
//! session of the course leaves the schedule, and the counter steps back so
//! the freed slot can go to the next new course.

use std::collections::BTreeMap;

/// Palette classes, in assignment order
pub const PALETTE: [&str; 6] = [
    "color-1", "color-2", "color-3", "color-4", "color-5", "color-6",
];

/// Course code to palette class table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseColors {
    counter: usize,
    by_code: BTreeMap<String, String>,
}

impl CourseColors {
    /// Rebuild from persisted parts
    pub fn from_parts(counter: usize, by_code: BTreeMap<String, String>) -> Self {
        Self { counter, by_code }
    }

    /// Color for `code`, assigning the next palette slot on first sight
    pub fn assign(&mut self, code: &str) -> String {
        if let Some(color) = self.by_code.get(code) {
            return color.clone();
        }
        let color = PALETTE[self.counter % PALETTE.len()].to_string();
        self.counter += 1;
        self.by_code.insert(code.to_string(), color.clone());
        tracing::debug!(code = %code, color = %color, "Assigned course color");
        color
    }

    /// Color already assigned to `code`
    pub fn get(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    /// Forget `code`; call only once its last session is gone
    pub fn retire(&mut self, code: &str) {
        if self.by_code.remove(code).is_some() {
            self.counter = self.counter.saturating_sub(1);
            tracing::debug!(code = %code, "Retired course color");
        }
    }

    /// Drop every assignment and restart the palette
    pub fn clear(&mut self) {
        self.counter = 0;
        self.by_code.clear();
    }

    /// Round-robin counter
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// The code to color table
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.by_code
    }
}
