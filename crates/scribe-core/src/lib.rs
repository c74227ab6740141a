//! Core text-model types for Scribe.
//!
//! This crate is intentionally small and nearly dependency-free: byte
//! offsets/ranges, a single-edit text edit primitive, and a versioned
//! document snapshot that the completion layer anchors previews against.

mod document;
mod edit;

pub use document::Document;
pub use edit::{EditError, TextEdit};
pub use text_size::{TextRange, TextSize};
