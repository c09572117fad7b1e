//! Widget surface state
//!
//! Headless state behind the widget's visible parts: the transcript with its
//! scroll position and the input control. Hosts read these to render.

pub mod input;
pub mod scroll;

pub use input::InputControl;
pub use scroll::Transcript;

/// Prompt shown before the input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub symbol: String,
    pub spacing: usize,
}

impl Prompt {
    pub fn new(symbol: impl Into<String>, spacing: usize) -> Self {
        Self {
            symbol: symbol.into(),
            spacing,
        }
    }

    /// Symbol followed by its spacing
    pub fn render(&self) -> String {
        format!("{}{}", self.symbol, " ".repeat(self.spacing))
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new("$", 2)
    }
}
