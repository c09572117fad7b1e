//! Transcript and scroll state
//!
//! The append-only output log of the widget. Scroll position is kept as a
//! distance from the bottom so that a pinned view stays pinned as lines
//! arrive.

use crate::models::OutputLine;

/// Scrollable transcript
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Lines in display order
    lines: Vec<OutputLine>,
    /// Lines scrolled back from the bottom (0 = pinned)
    scroll_back: usize,
    /// Whether the scrollbar is hidden
    scrollbar_hidden: bool,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line
    ///
    /// With `scrolling` the view jumps to the bottom; without it the
    /// current view stays where it is.
    pub fn push(&mut self, line: OutputLine, scrolling: bool) {
        self.lines.push(line);
        if scrolling {
            self.scroll_to_bottom();
        } else {
            self.scroll_back += 1;
        }
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_back = 0;
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most recent line
    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.last()
    }

    /// Pin the view to the newest line
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Scroll by `delta` lines; negative scrolls towards older lines
    pub fn scroll_by(&mut self, delta: isize) {
        let back = self.scroll_back as isize - delta;
        self.scroll_back = back.clamp(0, self.lines.len() as isize) as usize;
    }

    /// Lines scrolled back from the bottom
    pub fn scroll_back(&self) -> usize {
        self.scroll_back.min(self.lines.len())
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_back() == 0
    }

    /// The window of at most `rows` lines currently in view
    ///
    /// Scrolled all the way back, the window holds the oldest lines rather
    /// than running off the top.
    pub fn visible(&self, rows: usize) -> &[OutputLine] {
        let len = self.lines.len();
        let end = (len - self.scroll_back()).max(rows.min(len));
        let start = end.saturating_sub(rows);
        &self.lines[start..end]
    }

    /// Flip scrollbar visibility and return whether it is now hidden
    pub fn toggle_scrollbar(&mut self) -> bool {
        self.scrollbar_hidden = !self.scrollbar_hidden;
        self.scrollbar_hidden
    }

    pub fn set_scrollbar_hidden(&mut self, hidden: bool) {
        self.scrollbar_hidden = hidden;
    }

    pub fn is_scrollbar_hidden(&self) -> bool {
        self.scrollbar_hidden
    }
}
