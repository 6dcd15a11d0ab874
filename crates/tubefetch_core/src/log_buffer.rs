use std::collections::HashSet;

use crate::StyledLine;

/// Append-only log of the current download, de-duplicated by raw line text.
///
/// The server replays its whole log on every poll, so membership is checked
/// against every line seen since the last [`LogBuffer::clear`]. The set keeps
/// that check constant time no matter how long the download runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogBuffer {
    lines: Vec<StyledLine>,
    seen: HashSet<String>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything; only called when a new download starts.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.seen.clear();
    }

    /// Classifies and appends the lines not seen before, preserving arrival
    /// order. Returns how many were appended.
    pub fn append_new<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.lines.len();
        for line in incoming {
            if self.seen.contains(&line) {
                continue;
            }
            self.seen.insert(line.clone());
            self.lines.push(StyledLine::new(line));
        }
        self.lines.len() - before
    }

    pub fn contains(&self, line: &str) -> bool {
        self.seen.contains(line)
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
