//! Coordinates, selections and the UTF-8/tab helpers every column computation goes through.

use std::cmp::Ordering;

/// Default tab width (in columns) used when a caller does not specify one.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Largest accepted tab width.
pub const MAX_TAB_WIDTH: usize = 32;

/// A position in the document: zero-based line and visual (tab-expanded) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinates {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based visual column. A tab advances to the next multiple of the tab width.
    pub column: usize,
}

impl Coordinates {
    /// Create a new position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Coordinates {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Coordinates {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How [`crate::TextEditor::set_selection`] snaps its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Keep the endpoints as given.
    #[default]
    Normal,
    /// Extend both endpoints to word boundaries.
    Word,
    /// Extend to whole lines.
    Line,
}

/// Selection and cursor snapshot.
///
/// Undo records store one of these before and after each edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorState {
    /// Selection start (inclusive).
    pub selection_start: Coordinates,
    /// Selection end (exclusive). Equal to the start when nothing is selected.
    pub selection_end: Coordinates,
    /// Cursor position.
    pub cursor: Coordinates,
}

impl EditorState {
    /// A collapsed selection with the cursor at `at`.
    pub fn caret(at: Coordinates) -> Self {
        Self {
            selection_start: at,
            selection_end: at,
            cursor: at,
        }
    }

    /// Returns `true` if the selection is not empty.
    pub fn has_selection(&self) -> bool {
        self.selection_end > self.selection_start
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, judged by its high bits.
///
/// Continuation and ASCII bytes count as 1 so iteration always makes progress.
pub fn utf8_char_len(lead: u8) -> usize {
    if lead & 0xFE == 0xFC {
        6
    } else if lead & 0xFC == 0xF8 {
        5
    } else if lead & 0xF8 == 0xF0 {
        4
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xE0 == 0xC0 {
        2
    } else {
        1
    }
}

/// Returns `true` for UTF-8 continuation bytes (`10xxxxxx`).
pub fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Column reached by a tab that starts at `column`.
pub fn next_tab_stop(column: usize, tab_size: usize) -> usize {
    (column / tab_size) * tab_size + tab_size
}

/// Column after a character whose lead byte is `lead`, starting at `column`.
pub fn advance_column(column: usize, lead: u8, tab_size: usize) -> usize {
    if lead == b'\t' {
        next_tab_stop(column, tab_size)
    } else {
        column + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_ordering_is_lexicographic() {
        assert!(Coordinates::new(0, 9) < Coordinates::new(1, 0));
        assert!(Coordinates::new(2, 1) > Coordinates::new(2, 0));
        assert_eq!(
            Coordinates::new(3, 3).cmp(&Coordinates::new(3, 3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_utf8_char_len() {
        assert_eq!(utf8_char_len(b'a'), 1);
        assert_eq!(utf8_char_len("é".as_bytes()[0]), 2);
        assert_eq!(utf8_char_len("€".as_bytes()[0]), 3);
        assert_eq!(utf8_char_len("😀".as_bytes()[0]), 4);
        assert_eq!(utf8_char_len(0x80), 1);
        assert!(is_utf8_continuation("é".as_bytes()[1]));
        assert!(!is_utf8_continuation(b'e'));
    }

    #[test]
    fn test_tab_stops() {
        assert_eq!(next_tab_stop(0, 4), 4);
        assert_eq!(next_tab_stop(3, 4), 4);
        assert_eq!(next_tab_stop(4, 4), 8);
        assert_eq!(advance_column(5, b'x', 4), 6);
        assert_eq!(advance_column(5, b'\t', 4), 8);
    }

    #[test]
    fn test_editor_state_selection() {
        let caret = EditorState::caret(Coordinates::new(1, 2));
        assert!(!caret.has_selection());

        let selected = EditorState {
            selection_end: Coordinates::new(1, 5),
            ..caret
        };
        assert!(selected.has_selection());
    }
}
