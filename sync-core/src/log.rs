//! Bounded feed of human-readable game messages.
//!
//! Renderers show the most recent lines ("Round 2 started! Trump suit:
//! ROSEN", "P1 played KING-ROSEN", server errors). The log keeps a fixed
//! number of entries and drops the oldest when full.

use std::collections::VecDeque;

/// Default number of retained lines.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// FIFO message log with a maximum size.
#[derive(Debug, Clone)]
pub struct MessageLog {
    /// Maximum number of retained lines.
    capacity: usize,
    /// Retained lines, oldest first.
    lines: VecDeque<String>,
}

impl MessageLog {
    /// Create a log that keeps at most `capacity` lines.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a line, evicting the oldest when full.
    ///
    /// Returns the evicted line, if any.
    pub fn push(&mut self, line: impl Into<String>) -> Option<String> {
        let evicted = if self.lines.len() >= self.capacity {
            self.lines.pop_front()
        } else {
            None
        };
        self.lines.push_back(line.into());
        evicted
    }

    /// The most recent line.
    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of retained lines.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
