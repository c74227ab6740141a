//! Text edit primitives.

use crate::{TextRange, TextSize};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::new(offset, offset), text)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EditError {
    RangeOutOfBounds {
        range: TextRange,
        text_len: TextSize,
    },
    InvalidUtf8Boundary {
        offset: TextSize,
    },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::RangeOutOfBounds { range, text_len } => write!(
                f,
                "edit range {range:?} is out of bounds for text length {text_len:?}"
            ),
            EditError::InvalidUtf8Boundary { offset } => {
                write!(f, "offset {offset:?} is not a UTF-8 character boundary")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Check that `edit` can be applied to `text`: the range must be in bounds
/// and both endpoints must land on UTF-8 character boundaries.
pub(crate) fn check_edit(text: &str, edit: &TextEdit) -> Result<(), EditError> {
    let text_len = TextSize::of(text);
    if edit.range.start() > edit.range.end() || edit.range.end() > text_len {
        return Err(EditError::RangeOutOfBounds {
            range: edit.range,
            text_len,
        });
    }

    let start = u32::from(edit.range.start()) as usize;
    let end = u32::from(edit.range.end()) as usize;
    if !text.is_char_boundary(start) {
        return Err(EditError::InvalidUtf8Boundary {
            offset: edit.range.start(),
        });
    }
    if !text.is_char_boundary(end) {
        return Err(EditError::InvalidUtf8Boundary {
            offset: edit.range.end(),
        });
    }

    Ok(())
}
