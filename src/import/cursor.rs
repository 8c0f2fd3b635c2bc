//! Forward-only cursor over the lines of one import group

/// Cursor over borrowed lines
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Start at the first line
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Line under the cursor without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume the line under the cursor
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume exactly `n` lines, or nothing if fewer remain
    pub fn take(&mut self, n: usize) -> Option<&'a [&'a str]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.lines.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    /// Total lines in the group
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
