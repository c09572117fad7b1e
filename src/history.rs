//! Submission history and cursor
//!
//! The cursor ranges over `-1..=len`. `len` is the live line (nothing
//! selected); `-1` is the initial state before anything was submitted.

use std::collections::VecDeque;

/// Default maximum number of entries to keep
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// In-memory command history with navigation cursor
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    index: isize,
    max_size: usize,
}

impl History {
    /// Create an empty history with the default size limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history keeping at most `max_size` entries
    pub fn with_limit(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: -1,
            max_size: max_size.max(1),
        }
    }

    /// Append a submitted line and move the cursor to the live line
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.index = self.len_isize();
    }

    /// Move the cursor by `direction` steps
    ///
    /// Returns the new input value when the move is accepted: the entry under
    /// the cursor, or an empty string on the live line. Out-of-range moves
    /// leave the cursor untouched and return `None`.
    pub fn navigate(&mut self, direction: isize) -> Option<String> {
        let candidate = self.index + direction;
        if candidate < 0 || candidate > self.len_isize() {
            return None;
        }
        self.index = candidate;
        Some(self.entries.get(candidate as usize).cloned().unwrap_or_default())
    }

    /// Current cursor position
    pub fn index(&self) -> isize {
        self.index
    }

    /// Whether the cursor is on the live line
    pub fn is_live(&self) -> bool {
        self.index == self.len_isize()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, oldest first
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// All entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Maximum number of entries kept
    pub fn limit(&self) -> usize {
        self.max_size
    }

    /// Drop every entry and reset the cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = -1;
    }

    fn len_isize(&self) -> isize {
        self.entries.len() as isize
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
