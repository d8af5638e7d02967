//! Editable text field snapshot with scalar-indexed selection.
//!
//! The host widget owns the real text. A `TextField` is the view of it the
//! dispatcher reads for one key event, and a `FieldEdit` is what the
//! dispatcher hands back for the host to write. Every position here counts
//! Unicode scalars (chars), not bytes.

use serde::{Deserialize, Serialize};

/// What kind of element a key event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Single-line text input
    #[default]
    Input,
    /// Multi-line text area
    TextArea,
    /// Anything that does not take typed text (buttons, canvases, ...)
    Other,
}

impl FieldKind {
    /// Whether typed text can be inserted into this element.
    pub fn accepts_text(self) -> bool {
        matches!(self, FieldKind::Input | FieldKind::TextArea)
    }
}

/// Selection range inside a field. `start == end` is a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection, ordering the endpoints.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Collapsed selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

/// New field content and collapsed caret produced by an intercepted key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub text: String,
    pub caret: usize,
}

impl FieldEdit {
    pub fn new<T: Into<String>>(text: T, caret: usize) -> Self {
        Self {
            text: text.into(),
            caret,
        }
    }
}

/// Text plus selection of one editable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    selection: Selection,
    kind: FieldKind,
}

impl TextField {
    /// Create an empty single-line field.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection: Selection::default(),
            kind: FieldKind::Input,
        }
    }

    /// Create a field holding `text` with the caret at the end.
    pub fn with_text<T: Into<String>>(text: T) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: Selection::caret(end),
            kind: FieldKind::Input,
        }
    }

    /// Change the element kind (builder style).
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Get the field text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Length of the text in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Clear the text and reset the caret.
    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = Selection::default();
    }

    /// Set the selection, clamping both ends into the text and ordering them.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    /// Collapse the selection to `pos` (clamped).
    pub fn set_caret(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }

    /// Text strictly before char position `pos`.
    pub fn text_before(&self, pos: usize) -> &str {
        &self.text[..self.byte_offset(pos)]
    }

    /// Text from char position `pos` to the end.
    pub fn text_after(&self, pos: usize) -> &str {
        &self.text[self.byte_offset(pos)..]
    }

    /// Write an edit back: replace the text and collapse the caret.
    pub fn apply(&mut self, edit: &FieldEdit) {
        self.text.clone_from(&edit.text);
        self.set_caret(edit.caret);
    }

    /// Move the caret one char left, collapsing any selection to its start.
    /// Returns true if the caret moved or a selection collapsed.
    pub fn move_left(&mut self) -> bool {
        if !self.selection.is_collapsed() {
            self.selection = Selection::caret(self.selection.start);
            return true;
        }
        if self.selection.start == 0 {
            return false;
        }
        self.selection = Selection::caret(self.selection.start - 1);
        true
    }

    /// Move the caret one char right, collapsing any selection to its end.
    pub fn move_right(&mut self) -> bool {
        if !self.selection.is_collapsed() {
            self.selection = Selection::caret(self.selection.end);
            return true;
        }
        if self.selection.end >= self.char_len() {
            return false;
        }
        self.selection = Selection::caret(self.selection.end + 1);
        true
    }

    /// Move the caret to the beginning.
    pub fn move_to_start(&mut self) {
        self.selection = Selection::caret(0);
    }

    /// Move the caret to the end.
    pub fn move_to_end(&mut self) {
        self.selection = Selection::caret(self.char_len());
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_text_places_caret_at_end() {
        let field = TextField::with_text("한글");
        assert_eq!(field.char_len(), 2);
        assert_eq!(field.selection(), Selection::caret(2));
    }

    #[test]
    fn test_selection_is_clamped_and_ordered() {
        let mut field = TextField::with_text("abc");
        field.set_selection(10, 1);
        assert_eq!(field.selection(), Selection { start: 1, end: 3 });
        assert!(!field.selection().is_collapsed());
        assert_eq!(field.selection().len(), 2);
    }

    #[test]
    fn test_before_and_after_split_on_chars() {
        let field = TextField::with_text("가나다");
        assert_eq!(field.text_before(1), "가");
        assert_eq!(field.text_after(1), "나다");
        assert_eq!(field.text_before(7), "가나다");
        assert_eq!(field.text_after(7), "");
    }

    #[test]
    fn test_apply_edit() {
        let mut field = TextField::with_text("ㄱ");
        field.apply(&FieldEdit::new("가", 1));
        assert_eq!(field.text(), "가");
        assert_eq!(field.selection(), Selection::caret(1));
    }

    #[test]
    fn test_caret_movement() {
        let mut field = TextField::with_text("ab");
        assert!(!field.move_right());
        assert!(field.move_left());
        assert!(field.move_left());
        assert!(!field.move_left());
        field.set_selection(0, 2);
        assert!(field.move_right());
        assert_eq!(field.selection(), Selection::caret(2));
        field.move_to_start();
        assert_eq!(field.selection().start, 0);
    }

    #[test]
    fn test_field_kind() {
        assert!(FieldKind::Input.accepts_text());
        assert!(FieldKind::TextArea.accepts_text());
        assert!(!FieldKind::Other.accepts_text());
        let field = TextField::new().with_kind(FieldKind::Other);
        assert_eq!(field.kind(), FieldKind::Other);
    }
}
