//! Input control
//!
//! The editable line at the bottom of the widget. Key handlers decide
//! whether a keystroke is consumed; anything they leave alone is applied
//! here as the control's default editing behaviour.

use crate::key::{Key, KeyEvent};

/// Text input state
#[derive(Debug, Clone)]
pub struct InputControl {
    /// Current input text
    value: String,
    /// Cursor position in characters
    cursor: usize,
    /// Whether the control has focus
    focused: bool,
    /// Laid-out height in text rows
    rows: usize,
    /// Bumped on every keystroke edit, not on programmatic changes
    revision: u64,
}

impl InputControl {
    /// Create an empty, unfocused control
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            rows: 1,
            revision: 0,
        }
    }

    /// Current text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text and move the cursor to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Empty the control
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Read the text and empty the control
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Laid-out height in rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Keystroke edit counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute the layout height from the content
    ///
    /// Returns true when the height changed.
    pub fn auto_resize(&mut self) -> bool {
        let rows = self.value.split('\n').count().max(1);
        let changed = rows != self.rows;
        self.rows = rows;
        changed
    }

    /// Apply the default behaviour for an unconsumed key
    ///
    /// Returns true when the content changed.
    pub fn apply_default(&mut self, event: &KeyEvent) -> bool {
        if event.default_prevented() {
            return false;
        }

        match &event.key {
            Key::Char(ch) if !event.modifiers.ctrl && !event.modifiers.alt => {
                self.insert_char(*ch);
                true
            }
            Key::Enter => {
                self.insert_char('\n');
                true
            }
            Key::Backspace => self.delete_before_cursor(),
            Key::Delete => self.delete_at_cursor(),
            Key::ArrowLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            Key::ArrowRight => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            Key::Home => {
                self.cursor = 0;
                false
            }
            Key::End => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    /// Insert text at the cursor as if typed
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
        self.revision += 1;
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        self.revision += 1;
        true
    }

    fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        self.revision += 1;
        true
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }
}

impl Default for InputControl {
    fn default() -> Self {
        Self::new()
    }
}
