//! Core data models for myterm
//!
//! Transcript lines and their styled runs.

pub mod output_line;

// Re-exports for convenience
pub use output_line::{OutputLine, Span};
