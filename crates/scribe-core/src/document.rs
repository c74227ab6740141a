//! A versioned text document.

use crate::edit::check_edit;
use crate::{EditError, TextEdit, TextSize};

/// An owned text snapshot with a monotonically increasing version.
///
/// The version is bumped on every successful edit. Anything that captures a
/// position into the document (notably a completion preview anchor) records
/// the version alongside it and re-checks it before acting on the position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    text: String,
    version: u64,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            version: 0,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply a single edit, bumping the version.
    ///
    /// Fails without modifying the document if the edit range is out of
    /// bounds or does not land on UTF-8 character boundaries.
    pub fn apply(&mut self, edit: &TextEdit) -> Result<(), EditError> {
        check_edit(&self.text, edit)?;

        let start = u32::from(edit.range.start()) as usize;
        let end = u32::from(edit.range.end()) as usize;
        self.text.replace_range(start..end, &edit.replacement);
        self.version += 1;
        Ok(())
    }

    /// Insert `text` at `offset`. Shorthand for applying an empty-range edit.
    pub fn insert(&mut self, offset: TextSize, text: impl Into<String>) -> Result<(), EditError> {
        self.apply(&TextEdit::insert(offset, text))
    }
}
