#![forbid(unsafe_code)]

//! Text fields for the shape descriptor and the command line.
//!
//! [`TextField`] is a single-line value with a grapheme-cluster cursor.
//! [`ShapeField`] wraps one and re-parses its text on every commit, keeping
//! an `invalid` flag for the renderer.

use unicode_segmentation::UnicodeSegmentation;

use crate::shape::{GridShape, ShapeError, parse_shape_with_limit};

/// A single-line editable text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Maximum length in graphemes (None = unlimited).
    max_length: Option<usize>,
}

impl TextField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text value, cursor at the end (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    /// Set maximum length in graphemes (builder).
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    // --- Value access ---

    /// Get the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, clamping the cursor to the new length.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    // --- Editing operations ---

    /// Insert a character at the cursor. Returns false at the length limit.
    pub fn insert_char(&mut self, c: char) -> bool {
        if let Some(max) = self.max_length
            && self.grapheme_count() >= max
        {
            return false;
        }
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        // A combining mark joins the previous cluster instead of adding one.
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
        true
    }

    /// Delete the grapheme before the cursor.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.grapheme_byte_offset(self.cursor - 1);
        let end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(start..end);
        self.cursor -= 1;
        true
    }

    /// Delete the grapheme under the cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let start = self.grapheme_byte_offset(self.cursor);
        let end = self.grapheme_byte_offset(self.cursor + 1);
        self.value.drain(start..end);
        true
    }

    // --- Cursor movement ---

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

/// The shape descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeField {
    field: TextField,
    invalid: bool,
    max_cells: usize,
}

impl ShapeField {
    /// Create a field holding `descriptor`, limited to `max_cells` cells.
    ///
    /// The initial text is not judged until the first [`commit`](Self::commit).
    #[must_use]
    pub fn new(descriptor: impl Into<String>, max_cells: usize) -> Self {
        Self {
            field: TextField::new().with_value(descriptor),
            invalid: false,
            max_cells,
        }
    }

    /// The underlying text field.
    #[must_use]
    pub fn text(&self) -> &TextField {
        &self.field
    }

    /// Mutable access for keystroke editing; call [`commit`](Self::commit)
    /// afterwards.
    pub fn text_mut(&mut self) -> &mut TextField {
        &mut self.field
    }

    /// Current descriptor text.
    #[must_use]
    pub fn value(&self) -> &str {
        self.field.value()
    }

    /// Replace the text and commit it.
    pub fn set_value(&mut self, descriptor: impl Into<String>) -> Result<GridShape, ShapeError> {
        self.field.set_value(descriptor);
        self.commit()
    }

    /// True when the last committed text failed to parse.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Cell limit applied on commit.
    #[must_use]
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Parse the current text. Only the `invalid` flag changes here; the
    /// caller decides what to do with a valid shape.
    pub fn commit(&mut self) -> Result<GridShape, ShapeError> {
        let result = parse_shape_with_limit(self.field.value(), self.max_cells);
        self.invalid = result.is_err();
        result
    }
}
