//! Find and replace.
//!
//! Searches are plain, case-sensitive substring matches over the document joined with `\n`,
//! so a needle may span lines. The needle is escaped and compiled into a
//! [`regex::bytes::Regex`]. Matches are reported as (start, end) coordinates.

use crate::coords::{Coordinates, EditorState};
use crate::editor::TextEditor;
use regex::bytes::Regex;

fn compile_needle(needle: &str) -> Option<Regex> {
    if needle.is_empty() {
        return None;
    }
    match Regex::new(&regex::escape(needle)) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%err, "failed to compile search needle");
            None
        }
    }
}

impl TextEditor {
    fn joined_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (i, line) in self.document.lines().iter().enumerate() {
            if i > 0 {
                bytes.push(b'\n');
            }
            bytes.extend(line.iter().map(|g| g.ch));
        }
        bytes
    }

    /// Byte offset of a position in the joined document.
    fn offset_of(&self, at: Coordinates) -> usize {
        let at = self.document.sanitize(at);
        let before: usize = self.document.lines()[..at.line]
            .iter()
            .map(|line| line.len() + 1)
            .sum();
        before + self.document.char_index(at)
    }

    fn coordinates_at(&self, mut offset: usize) -> Coordinates {
        for (line, glyphs) in self.document.lines().iter().enumerate() {
            if offset <= glyphs.len() {
                return Coordinates::new(line, self.document.column_of(line, offset));
            }
            offset -= glyphs.len() + 1;
        }
        self.document.sanitize(Coordinates::new(usize::MAX, 0))
    }

    fn find_match(
        &self,
        re: &Regex,
        from: usize,
        wrap: bool,
    ) -> Option<(Coordinates, Coordinates)> {
        let haystack = self.joined_bytes();
        let found = re
            .find_at(&haystack, from.min(haystack.len()))
            .or_else(|| wrap.then(|| re.find(&haystack)).flatten())?;
        Some((
            self.coordinates_at(found.start()),
            self.coordinates_at(found.end()),
        ))
    }

    fn select_match(&mut self, start: Coordinates, end: Coordinates) {
        self.end_snippet();
        self.autocomplete.close();
        self.state = EditorState {
            selection_start: start,
            selection_end: end,
            cursor: end,
        };
    }

    /// Select the next occurrence of `needle` at or after `from`, wrapping to the top of the
    /// document. The cursor is left at the end of the match.
    ///
    /// Returns `None` (leaving the selection alone) if `needle` is empty or does not occur.
    pub fn find_next(
        &mut self,
        needle: &str,
        from: Coordinates,
    ) -> Option<(Coordinates, Coordinates)> {
        let re = compile_needle(needle)?;
        let (start, end) = self.find_match(&re, self.offset_of(from), true)?;
        self.select_match(start, end);
        Some((start, end))
    }

    /// Replace the next occurrence of `needle` with `replacement` as one undo record.
    ///
    /// The search starts at the selection (so a selected match is the one replaced), or at the
    /// cursor, and wraps. The cursor ends after the replacement, so repeated calls walk through
    /// the document. Returns the range of the inserted text.
    pub fn replace(
        &mut self,
        needle: &str,
        replacement: &str,
    ) -> Option<(Coordinates, Coordinates)> {
        if self.is_read_only() {
            return None;
        }
        let re = compile_needle(needle)?;
        let from = if self.has_selection() {
            self.state.selection_start
        } else {
            self.cursor_position()
        };
        let (start, end) = self.find_match(&re, self.offset_of(from), true)?;
        self.select_match(start, end);
        self.replace_selection_with(replacement, false);
        Some((start, self.cursor_position()))
    }

    /// Replace every occurrence of `needle` from the top of the document, one undo record per
    /// replacement. Text produced by a replacement is not searched again.
    ///
    /// Returns the number of replacements.
    pub fn replace_all(&mut self, needle: &str, replacement: &str) -> usize {
        if self.is_read_only() {
            return 0;
        }
        let Some(re) = compile_needle(needle) else {
            return 0;
        };

        let mut count = 0;
        let mut from = 0;
        while let Some((start, end)) = self.find_match(&re, from, false) {
            self.select_match(start, end);
            self.replace_selection_with(replacement, false);
            from = self.offset_of(self.cursor_position());
            count += 1;
        }
        if count > 0 {
            tracing::debug!(count, "replaced all occurrences");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Coordinates;
    use crate::editor::TextEditor;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> TextEditor {
        let mut editor = TextEditor::default();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_offsets_map_to_coordinates() {
        let ed = editor("\tab\nxé\n");
        for (line, column) in [(0, 0), (0, 4), (0, 6), (1, 0), (1, 2), (2, 0)] {
            let at = Coordinates::new(line, column);
            assert_eq!(ed.coordinates_at(ed.offset_of(at)), at);
        }
        assert_eq!(ed.offset_of(Coordinates::new(1, 2)), 7);
    }

    #[test]
    fn test_empty_needle_finds_nothing() {
        let mut ed = editor("abc");
        assert_eq!(ed.find_next("", Coordinates::default()), None);
        assert_eq!(ed.replace_all("", "x"), 0);
        assert_eq!(ed.text(), "abc");
    }

    #[test]
    fn test_needle_spanning_lines() {
        let mut ed = editor("one\ntwo");
        assert_eq!(
            ed.find_next("e\nt", Coordinates::default()),
            Some((Coordinates::new(0, 2), Coordinates::new(1, 1)))
        );
        assert_eq!(ed.selected_text(), "e\nt");
    }
}
