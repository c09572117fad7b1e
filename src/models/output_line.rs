//! Output Line Model
//!
//! Represents a single transcript line. A line is a sequence of styled text
//! runs; plain echoes carry one run, markup may carry several.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::style::StyleKind;

/// A run of text sharing one style kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Presentation hint for this run
    pub kind: StyleKind,
}

impl Span {
    /// Create a new span
    pub fn new(text: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Represents a single line of transcript output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLine {
    /// Styled text runs in display order
    pub spans: Vec<Span>,

    /// Style kind of the line as a whole
    pub kind: StyleKind,

    /// When this line was appended
    pub timestamp: DateTime<Utc>,
}

impl OutputLine {
    /// Create a plain line with a single run
    pub fn new(text: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            spans: vec![Span::new(text, kind)],
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Create a line from pre-styled runs
    pub fn with_spans(spans: Vec<Span>, kind: StyleKind) -> Self {
        Self {
            spans: merge_adjacent(spans),
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Get the plain text without styling
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Check if any run differs from the line's own kind
    pub fn has_mixed_styles(&self) -> bool {
        self.spans.iter().any(|span| span.kind != self.kind)
    }
}

impl Default for OutputLine {
    fn default() -> Self {
        Self::new(String::new(), StyleKind::Log)
    }
}

impl From<&str> for OutputLine {
    fn from(text: &str) -> Self {
        Self::new(text, StyleKind::Log)
    }
}

impl From<String> for OutputLine {
    fn from(text: String) -> Self {
        Self::new(text, StyleKind::Log)
    }
}

/// Join neighbouring runs of the same kind and drop empty runs
fn merge_adjacent(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans.into_iter().filter(|span| !span.text.is_empty()) {
        match merged.last_mut() {
            Some(last) if last.kind == span.kind => last.text.push_str(&span.text),
            _ => merged.push(span),
        }
    }
    merged
}
