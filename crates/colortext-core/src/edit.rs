//! Edit commands.
//!
//! The structural primitives ([`TextEditor::delete_range`], [`TextEditor::insert_text_at`] and
//! the line operations) change the document without touching the undo history. Every
//! user-level edit below them produces exactly one [`UndoRecord`] describing the text it
//! removed and added, and is silently ignored while the editor is read-only.

use crate::buffer::{Glyph, Line, bytes_to_string, glyphs_from_str, is_space};
use crate::config::TabKeyBehavior;
use crate::coords::{Coordinates, EditorState, is_utf8_continuation, next_tab_stop, utf8_char_len};
use crate::editor::TextEditor;
use crate::markers::{markers_lines_inserted, markers_lines_removed};
use crate::snippet::{TagSpan, parse_snippet};
use crate::undo::UndoRecord;
use colortext_lang::PaletteIndex;

/// Closing character auto-inserted after `open`.
fn closing_brace(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

impl TextEditor {
    fn assert_writable(&self, operation: &str) {
        assert!(
            !self.is_read_only(),
            "{operation} called while the editor is read-only"
        );
    }

    // --- structural primitives ------------------------------------------------------------

    pub(crate) fn insert_empty_line(&mut self, index: usize) {
        self.document.lines_mut().insert(index, Line::new());
        markers_lines_inserted(&mut self.error_markers, index, 1);
        let events = self.breakpoints.lines_inserted(index, 1);
        self.emit_breakpoint_events(events);
    }

    pub(crate) fn drop_lines(&mut self, start: usize, end: usize) {
        markers_lines_removed(&mut self.error_markers, start, end);
        let events = self.breakpoints.lines_removed(start, end);
        self.emit_breakpoint_events(events);
        self.document.lines_mut().drain(start..end);
    }

    /// Insert an empty line before `index`, shifting markers on and below it.
    ///
    /// # Panics
    ///
    /// Panics if the editor is read-only.
    pub fn insert_line(&mut self, index: usize) {
        self.assert_writable("insert_line");
        let index = index.min(self.document.line_count());
        self.insert_empty_line(index);
        self.mark_changed();
        self.colorize(index, Some(1));
    }

    /// Remove a single line. The last remaining line is never removed.
    ///
    /// # Panics
    ///
    /// Panics if the editor is read-only or `index` is the only line.
    pub fn remove_line(&mut self, index: usize) {
        self.remove_lines(index, index + 1);
    }

    /// Remove lines `start..end`, dropping markers inside and shifting the ones below.
    ///
    /// # Panics
    ///
    /// Panics if the editor is read-only, `start > end`, or the range covers every line.
    pub fn remove_lines(&mut self, start: usize, end: usize) {
        self.assert_writable("remove_lines");
        assert!(start <= end, "remove_lines: start {start} is after end {end}");
        let line_count = self.document.line_count();
        let end = end.min(line_count);
        if start >= end {
            return;
        }
        assert!(
            end - start < line_count,
            "remove_lines: a document keeps at least one line"
        );

        self.drop_lines(start, end);
        self.mark_changed();
        self.colorize(start.saturating_sub(1), Some(2));
    }

    /// Delete the text between two positions. No undo record is made.
    ///
    /// # Panics
    ///
    /// Panics if the editor is read-only or `start` is after `end` once both are sanitized.
    pub fn delete_range(&mut self, start: Coordinates, end: Coordinates) {
        self.assert_writable("delete_range");
        let start = self.document.sanitize(start);
        let end = self.document.sanitize(end);
        assert!(start <= end, "delete_range: {start:?} is after {end:?}");
        if start == end {
            return;
        }
        tracing::trace!(?start, ?end, "delete range");

        let istart = self.document.char_index(start);
        let iend = self.document.char_index(end);
        let lines = self.document.lines_mut();
        if start.line == end.line {
            lines[start.line].drain(istart..iend.max(istart));
        } else {
            let tail = lines[end.line].split_off(iend);
            let first = &mut lines[start.line];
            first.truncate(istart);
            first.extend(tail);
            self.drop_lines(start.line + 1, end.line + 1);
        }

        self.mark_changed();
        self.colorize(start.line, Some(1));
    }

    /// Indentation string covering `width` columns.
    fn indentation(&self, width: usize) -> String {
        let tab_size = self.document.tab_size();
        if self.config.insert_spaces {
            " ".repeat(width)
        } else {
            let mut text = "\t".repeat(width / tab_size);
            text.push_str(&" ".repeat(width % tab_size));
            text
        }
    }

    /// Insert `text` at `at` without recording undo. `\r` is dropped.
    ///
    /// With `auto_indent`, every new line is indented to the level of the insertion line, one
    /// tab stop deeper for each `{` seen so far and one shallower when the line starts with `}`.
    /// Lines of `text` that already begin with a blank keep the insertion line's level.
    ///
    /// Returns the position after the inserted text and the number of lines created.
    ///
    /// # Panics
    ///
    /// Panics if the editor is read-only.
    pub fn insert_text_at(
        &mut self,
        at: Coordinates,
        text: &str,
        auto_indent: bool,
    ) -> (Coordinates, usize) {
        self.assert_writable("insert_text_at");
        let mut at = self.document.sanitize(at);
        let first_line = at.line;
        let tab_size = self.document.tab_size();
        let indent_start = if auto_indent {
            self.document.leading_indent(at.line).1
        } else {
            0
        };
        let mut indent = indent_start;
        let mut cindex = self.document.char_index(at);
        let mut created = 0;

        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => i += 1,
                b'\n' => {
                    i += 1;
                    let mut new_line = self.document.lines_mut()[at.line].split_off(cindex);
                    self.insert_empty_line(at.line + 1);
                    at.line += 1;
                    created += 1;
                    cindex = 0;

                    if auto_indent {
                        let rest = &bytes[i..];
                        let already_indented = matches!(rest.first(), Some(b' ' | b'\t'));
                        let next = rest.iter().find(|&&b| b == b'\n' || !is_space(b));
                        if next == Some(&b'}') {
                            indent = indent.saturating_sub(tab_size);
                        }
                        let width = if already_indented { indent_start } else { indent };
                        let prefix = self.indentation(width);
                        new_line.splice(0..0, glyphs_from_str(&prefix));
                        self.snippet.shift_line(at.line, prefix.len());
                        cindex = prefix.len();
                    }
                    self.document.lines_mut()[at.line] = new_line;
                }
                _ => {
                    let run_end = bytes[i..]
                        .iter()
                        .position(|&b| b == b'\n' || b == b'\r')
                        .map_or(bytes.len(), |p| i + p);
                    let run = &bytes[i..run_end];
                    if auto_indent {
                        indent += tab_size * run.iter().filter(|&&b| b == b'{').count();
                    }
                    self.document.lines_mut()[at.line].splice(
                        cindex..cindex,
                        run.iter().map(|&b| Glyph::new(b, PaletteIndex::Default)),
                    );
                    cindex += run.len();
                    i = run_end;
                }
            }
        }

        at.column = self.document.column_of(at.line, cindex);
        self.mark_changed();
        self.colorize(first_line.saturating_sub(1), Some(created + 2));
        (at, created)
    }

    // --- user-level edits -----------------------------------------------------------------

    fn commit(&mut self, mut record: UndoRecord) {
        record.after = self.state;
        self.undo_buffer.push(record);
    }

    /// Delete the selection, describing it in `record`, and collapse to its start.
    fn delete_selection_into(&mut self, record: &mut UndoRecord) {
        let (start, end) = (self.state.selection_start, self.state.selection_end);
        record.set_removed(self.document.text_range(start, end), start, end);
        self.delete_range(start, end);
        self.state = EditorState::caret(start);
    }

    fn selection_spans_lines(&self) -> bool {
        self.has_selection() && self.state.selection_start.line != self.state.selection_end.line
    }

    /// Returns `true` if replacing `from..to` keeps the edit inside the active snippet tag.
    fn edit_stays_in_tag(&self, from: Coordinates, to: Coordinates) -> bool {
        self.snippet.is_active()
            && from.line == to.line
            && self.snippet.edit_in_active(
                from.line,
                self.document.char_index(from),
                self.document.char_index(to),
            )
    }

    fn tag_text(&self, tag: TagSpan) -> String {
        let Some(line) = self.document.line(tag.line) else {
            return String::new();
        };
        let end = tag.end.min(line.len());
        let start = tag.start.min(end);
        bytes_to_string(line[start..end].iter().map(|g| g.ch).collect())
    }

    /// Copy the active tag's text into every linked tag, one undo record per copy.
    fn sync_linked_tags(&mut self) {
        let Some(active) = self.snippet.active_tag() else {
            return;
        };
        let offset = self
            .document
            .char_index(self.cursor_position())
            .saturating_sub(active.start);
        let text = self.tag_text(active);

        for index in self.snippet.linked_indices() {
            let tag = self.snippet.tag(index);
            let current = self.tag_text(tag);
            if current == text {
                continue;
            }
            let start = Coordinates::new(tag.line, self.document.column_of(tag.line, tag.start));
            let end = Coordinates::new(tag.line, self.document.column_of(tag.line, tag.end));

            let mut record = UndoRecord::new(self.state);
            record.set_removed(current, start, end);
            self.delete_range(start, end);
            let (new_end, _) = self.insert_text_at(start, &text, false);
            record.set_added(text.clone(), start, new_end);
            self.snippet.set_tag_len(index, text.len());

            if let Some(active) = self.snippet.active_tag() {
                let column = self.document.column_of(active.line, active.start + offset);
                self.state = EditorState::caret(Coordinates::new(active.line, column));
            }
            self.commit(record);
        }
    }

    fn after_typing(&mut self, ch: char) {
        let opens = self.config.active_autocomplete && (ch.is_ascii_alphabetic() || ch == '_');
        let continues =
            self.autocomplete.is_open() && (ch.is_ascii_alphanumeric() || ch == '_');
        if opens || continues {
            self.request_autocomplete();
        } else {
            self.autocomplete.close();
        }
    }

    /// Type a character at the cursor, replacing the selection.
    ///
    /// `\n` splits the line, copying its leading blanks when the language auto-indents. `\t`
    /// with a selection spanning several lines indents the block instead (or unindents it when
    /// `shift` is set).
    pub fn enter_character(&mut self, ch: char, shift: bool) {
        if self.is_read_only() || ch == '\r' {
            return;
        }
        if ch == '\t' && self.selection_spans_lines() {
            self.end_snippet();
            self.shift_selected_block(shift);
            return;
        }

        let brace = ch
            .is_ascii()
            .then(|| closing_brace(ch as u8))
            .flatten()
            .filter(|_| self.config.complete_braces && !self.overwrite);
        let in_tag = match (ch, brace) {
            ('\n', _) | ('{', Some(_)) => false,
            _ if self.has_selection() => {
                self.edit_stays_in_tag(self.state.selection_start, self.state.selection_end)
            }
            _ if self.overwrite => false,
            _ => {
                let at = self.cursor_position();
                self.edit_stays_in_tag(at, at)
            }
        };
        if !in_tag {
            self.end_snippet();
        }

        let mut record = UndoRecord::new(self.state);
        let had_selection = self.has_selection();
        if had_selection {
            self.delete_selection_into(&mut record);
        }
        let pos = self.cursor_position();
        let cindex = self.document.char_index(pos);
        let copy_indent =
            self.colorizer.language().auto_indentation && self.config.smart_indent;
        let leading = || {
            if !copy_indent {
                return String::new();
            }
            let len = self.document.leading_indent(pos.line).0.min(cindex);
            bytes_to_string(
                self.document.lines()[pos.line][..len]
                    .iter()
                    .map(|g| g.ch)
                    .collect(),
            )
        };

        if ch == '\n' {
            let whitespace = leading();
            let tail = self.document.lines_mut()[pos.line].split_off(cindex);
            self.insert_empty_line(pos.line + 1);
            let mut new_line = glyphs_from_str(&whitespace);
            new_line.extend(tail);
            self.document.lines_mut()[pos.line + 1] = new_line;

            let cursor = Coordinates::new(
                pos.line + 1,
                self.document.column_of(pos.line + 1, whitespace.len()),
            );
            self.state = EditorState::caret(cursor);
            self.mark_changed();
            record.set_added(format!("\n{whitespace}"), pos, cursor);
        } else if let Some(close) = brace {
            let text = if ch == '{' {
                format!("{{\n{}}}", leading())
            } else {
                format!("{ch}{}", close as char)
            };
            let (end, _) = self.insert_text_at(pos, &text, false);
            self.state = EditorState::caret(Coordinates::new(end.line, end.column - 1));
            record.set_added(text, pos, end);
        } else {
            let text = if ch == '\t' && self.config.tab_key_behavior() == TabKeyBehavior::Spaces {
                let tab_size = self.document.tab_size();
                " ".repeat(next_tab_stop(pos.column, tab_size) - pos.column)
            } else {
                ch.to_string()
            };

            let line_len = self.document.lines()[pos.line].len();
            if self.overwrite && !had_selection && cindex < line_len {
                let len = utf8_char_len(self.document.lines()[pos.line][cindex].ch);
                let end_index = (cindex + len).min(line_len);
                let end = Coordinates::new(pos.line, self.document.column_of(pos.line, end_index));
                record.set_removed(self.document.text_range(pos, end), pos, end);
                self.document.lines_mut()[pos.line].drain(cindex..end_index);
            }

            self.document.lines_mut()[pos.line].splice(
                cindex..cindex,
                text.bytes().map(|b| Glyph::new(b, PaletteIndex::Default)),
            );
            let cursor = Coordinates::new(
                pos.line,
                self.document.column_of(pos.line, cindex + text.len()),
            );
            self.state = EditorState::caret(cursor);
            self.mark_changed();
            record.set_added(text, pos, cursor);
        }

        self.colorize(pos.line.saturating_sub(1), Some(3));
        let (removed, inserted) = (record.removed.len(), record.added.len());
        self.commit(record);

        if in_tag {
            self.snippet.resize_active(removed, inserted);
            self.sync_linked_tags();
        }
        self.after_typing(ch);
    }

    /// Insert text at the cursor, replacing the selection. Makes one undo record.
    pub fn insert_text(&mut self, text: &str) {
        if self.is_read_only() || (text.is_empty() && !self.has_selection()) {
            return;
        }
        self.end_snippet();
        self.replace_selection_with(text, false);
    }

    pub(crate) fn replace_selection_with(&mut self, text: &str, auto_indent: bool) {
        let mut record = UndoRecord::new(self.state);
        if self.has_selection() {
            self.delete_selection_into(&mut record);
        }
        let start = self.cursor_position();
        let (end, _) = self.insert_text_at(start, text, auto_indent);
        record.set_added(self.document.text_range(start, end), start, end);
        self.state = EditorState::caret(end);
        self.commit(record);
    }

    /// Delete the selection, or the character before the cursor (joining lines at column 0).
    ///
    /// With brace completion, deleting an opening bracket directly followed by its closing
    /// bracket removes both.
    pub fn backspace(&mut self) {
        if self.is_read_only() {
            return;
        }
        let mut record = UndoRecord::new(self.state);
        let in_tag;

        if self.has_selection() {
            in_tag = self.edit_stays_in_tag(self.state.selection_start, self.state.selection_end);
            if !in_tag {
                self.end_snippet();
            }
            self.delete_selection_into(&mut record);
        } else {
            let pos = self.cursor_position();
            if pos.column == 0 {
                self.end_snippet();
                if pos.line == 0 {
                    return;
                }
                in_tag = false;

                let prev = pos.line - 1;
                let prev_end = Coordinates::new(prev, self.document.max_column(prev));
                record.set_removed("\n", prev_end, Coordinates::new(pos.line, 0));
                if !self.error_markers.contains_key(&prev)
                    && let Some(message) = self.error_markers.remove(&pos.line)
                {
                    self.error_markers.insert(prev, message);
                }
                let moved = std::mem::take(&mut self.document.lines_mut()[pos.line]);
                self.document.lines_mut()[prev].extend(moved);
                self.drop_lines(pos.line, pos.line + 1);
                self.state = EditorState::caret(prev_end);
            } else {
                let line = &self.document.lines()[pos.line];
                let cindex = self.document.char_index(pos);
                let mut start = cindex - 1;
                while start > 0 && is_utf8_continuation(line[start].ch) {
                    start -= 1;
                }
                let mut end = cindex;
                if self.config.complete_braces
                    && cindex < line.len()
                    && closing_brace(line[start].ch) == Some(line[cindex].ch)
                {
                    end += 1;
                }

                let from = Coordinates::new(pos.line, self.document.column_of(pos.line, start));
                let to = Coordinates::new(pos.line, self.document.column_of(pos.line, end));
                in_tag = self.edit_stays_in_tag(from, to);
                if !in_tag {
                    self.end_snippet();
                }
                record.set_removed(self.document.text_range(from, to), from, to);
                self.document.lines_mut()[pos.line].drain(start..end);
                self.state = EditorState::caret(from);
            }
            self.mark_changed();
        }

        self.colorize(self.state.cursor.line, Some(1));
        let removed = record.removed.len();
        self.commit(record);

        if in_tag {
            self.snippet.resize_active(removed, 0);
            self.sync_linked_tags();
        }
        if self.autocomplete.is_open() {
            self.request_autocomplete();
        }
    }

    /// Delete the selection, or the character under the cursor (joining lines at line end).
    pub fn delete(&mut self) {
        if self.is_read_only() {
            return;
        }
        self.end_snippet();
        self.autocomplete.close();
        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            self.delete_selection_into(&mut record);
        } else {
            let pos = self.cursor_position();
            let line_len = self.document.lines()[pos.line].len();
            let cindex = self.document.char_index(pos);
            if cindex >= line_len {
                if pos.line + 1 >= self.document.line_count() {
                    return;
                }
                record.set_removed("\n", pos, Coordinates::new(pos.line + 1, 0));
                let moved = std::mem::take(&mut self.document.lines_mut()[pos.line + 1]);
                self.document.lines_mut()[pos.line].extend(moved);
                self.drop_lines(pos.line + 1, pos.line + 2);
            } else {
                let len = utf8_char_len(self.document.lines()[pos.line][cindex].ch);
                let end_index = (cindex + len).min(line_len);
                let to = Coordinates::new(pos.line, self.document.column_of(pos.line, end_index));
                record.set_removed(self.document.text_range(pos, to), pos, to);
                self.document.lines_mut()[pos.line].drain(cindex..end_index);
            }
            self.state = EditorState::caret(pos);
            self.mark_changed();
        }

        self.colorize(self.state.cursor.line, Some(1));
        self.commit(record);
    }

    /// Tab key: focus the next snippet tag while a snippet is active, otherwise insert a tab
    /// (or indent a multi-line selection).
    pub fn indent(&mut self) {
        if self.is_read_only() {
            return;
        }
        if self.snippet.is_active() {
            if let Some(tag) = self.snippet.advance() {
                let start = Coordinates::new(tag.line, self.document.column_of(tag.line, tag.start));
                let end = Coordinates::new(tag.line, self.document.column_of(tag.line, tag.end));
                self.state = EditorState {
                    selection_start: start,
                    selection_end: end,
                    cursor: end,
                };
            }
            return;
        }
        self.enter_character('\t', false);
    }

    /// Shift-tab: unindent the selected lines, or the cursor line without a multi-line
    /// selection.
    pub fn unindent(&mut self) {
        if self.is_read_only() {
            return;
        }
        self.end_snippet();
        if self.selection_spans_lines() {
            self.shift_selected_block(true);
            return;
        }

        let pos = self.cursor_position();
        let cindex = self.document.char_index(pos);
        let start = Coordinates::new(pos.line, 0);
        let old_end = Coordinates::new(pos.line, self.document.max_column(pos.line));
        let before = self.document.line_text(pos.line);
        let mut record = UndoRecord::new(self.state);

        let Some(removed) = self.shift_lines(pos.line, pos.line, true) else {
            return;
        };
        let end = Coordinates::new(pos.line, self.document.max_column(pos.line));
        record.set_removed(before, start, old_end);
        record.set_added(self.document.line_text(pos.line), start, end);

        let column = self
            .document
            .column_of(pos.line, cindex.saturating_sub(removed));
        self.state = EditorState::caret(Coordinates::new(pos.line, column));
        self.commit(record);
    }

    /// Indent (or unindent) lines `first..=last`. Returns the bytes added to (or removed from)
    /// the first line, or `None` if no line changed.
    fn shift_lines(&mut self, first: usize, last: usize, unindent: bool) -> Option<usize> {
        let tab_size = self.document.tab_size();
        let prefix = if self.config.insert_spaces {
            " ".repeat(tab_size)
        } else {
            "\t".to_string()
        };

        let mut changed = false;
        let mut first_delta = 0;
        for (i, line) in self.document.lines_mut()[first..=last].iter_mut().enumerate() {
            let delta = if unindent {
                let count = if line.first().is_some_and(|g| g.ch == b'\t') {
                    1
                } else {
                    line.iter().take(tab_size).take_while(|g| g.ch == b' ').count()
                };
                line.drain(..count);
                count
            } else {
                line.splice(0..0, glyphs_from_str(&prefix));
                prefix.len()
            };
            changed |= delta > 0;
            if i == 0 {
                first_delta = delta;
            }
        }

        if !changed {
            return None;
        }
        self.mark_changed();
        self.colorize(first, Some(last - first + 1));
        Some(first_delta)
    }

    /// Indent or unindent every line touched by a multi-line selection.
    fn shift_selected_block(&mut self, unindent: bool) {
        let (sel_start, sel_end) = (self.state.selection_start, self.state.selection_end);
        let first = sel_start.line;
        let mut last = sel_end.line;
        if sel_end.column == 0 && last > first {
            last -= 1;
        }

        let start = Coordinates::new(first, 0);
        let old_end = Coordinates::new(last, self.document.max_column(last));
        let mut record = UndoRecord::new(self.state);
        let before = self.document.text_range(start, old_end);
        if self.shift_lines(first, last, unindent).is_none() {
            return;
        }

        let end = Coordinates::new(last, self.document.max_column(last));
        record.set_removed(before, start, old_end);
        record.set_added(self.document.text_range(start, end), start, end);

        let selection_end = if sel_end.column == 0 && sel_end.line > first {
            Coordinates::new(sel_end.line, 0)
        } else {
            end
        };
        let cursor = if self.state.cursor == sel_start {
            start
        } else {
            selection_end
        };
        self.state = EditorState {
            selection_start: start,
            selection_end,
            cursor,
        };
        self.commit(record);
    }

    // --- clipboard ------------------------------------------------------------------------

    /// Text for the clipboard: the selection, or the cursor line without one.
    pub fn copy(&self) -> String {
        if self.has_selection() {
            self.selected_text()
        } else {
            self.current_line_text()
        }
    }

    /// Remove the selection and return it. While read-only this only copies.
    pub fn cut(&mut self) -> Option<String> {
        if self.is_read_only() {
            return Some(self.copy());
        }
        if !self.has_selection() {
            return None;
        }
        self.end_snippet();
        let text = self.selected_text();
        let mut record = UndoRecord::new(self.state);
        self.delete_selection_into(&mut record);
        self.commit(record);
        Some(text)
    }

    /// Insert `payload` at the cursor, replacing the selection.
    pub fn paste(&mut self, payload: &str) {
        if self.is_read_only() || payload.is_empty() {
            return;
        }
        self.end_snippet();
        self.autocomplete.close();
        let auto_indent = self.config.auto_indent_on_paste;
        self.replace_selection_with(payload, auto_indent);
    }

    // --- history --------------------------------------------------------------------------

    /// Returns `true` if there is an edit to undo and the editor is writable.
    pub fn can_undo(&self) -> bool {
        !self.is_read_only() && self.undo_buffer.can_undo()
    }

    /// Returns `true` if there is an edit to redo and the editor is writable.
    pub fn can_redo(&self) -> bool {
        !self.is_read_only() && self.undo_buffer.can_redo()
    }

    /// Undo up to `steps` edits. Returns how many were undone.
    pub fn undo(&mut self, steps: usize) -> usize {
        self.end_snippet();
        self.autocomplete.close();
        let mut applied = 0;
        while applied < steps && self.can_undo() {
            let Some(record) = self.undo_buffer.undo().cloned() else {
                break;
            };
            if !record.added.is_empty() {
                self.delete_range(record.added_start, record.added_end);
            }
            if !record.removed.is_empty() {
                self.insert_text_at(record.removed_start, &record.removed, false);
            }
            self.state = record.before;
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!(applied, remaining = self.undo_buffer.undo_depth(), "undo");
        }
        applied
    }

    /// Redo up to `steps` edits. Returns how many were redone.
    pub fn redo(&mut self, steps: usize) -> usize {
        self.end_snippet();
        self.autocomplete.close();
        let mut applied = 0;
        while applied < steps && self.can_redo() {
            let Some(record) = self.undo_buffer.redo().cloned() else {
                break;
            };
            if !record.removed.is_empty() {
                self.delete_range(record.removed_start, record.removed_end);
            }
            if !record.added.is_empty() {
                self.insert_text_at(record.added_start, &record.added, false);
            }
            self.state = record.after;
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!(applied, remaining = self.undo_buffer.redo_depth(), "redo");
        }
        applied
    }

    /// Number of edits that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo_buffer.undo_depth()
    }

    // --- autocomplete and snippets --------------------------------------------------------

    /// Replace the identifier at the cursor with the selected suggestion.
    ///
    /// The expansion may contain snippet tags, which start a snippet session. Returns `false`
    /// if the list is closed or the editor is read-only.
    pub fn accept_suggestion(&mut self) -> bool {
        if self.is_read_only() {
            return false;
        }
        let Some(value) = self.autocomplete.selected().map(|s| s.value.clone()) else {
            return false;
        };
        let span = self.document.identifier_span(self.cursor_position());
        self.autocomplete.close();
        self.expand_snippet(Some(span), &value);
        true
    }

    /// Insert snippet text at the cursor, replacing the selection, and start a snippet session
    /// if it contains tags.
    pub fn insert_snippet(&mut self, text: &str) {
        if self.is_read_only() {
            return;
        }
        self.autocomplete.close();
        self.expand_snippet(None, text);
    }

    fn expand_snippet(&mut self, word: Option<(Coordinates, Coordinates)>, text: &str) {
        self.end_snippet();
        let mut record = UndoRecord::new(self.state);
        let at = match word {
            Some((start, end)) => {
                if start < end {
                    record.set_removed(self.document.text_range(start, end), start, end);
                    self.delete_range(start, end);
                }
                start
            }
            None => {
                if self.has_selection() {
                    self.delete_selection_into(&mut record);
                }
                self.cursor_position()
            }
        };

        let (expanded, parsed) = parse_snippet(text);
        let base = self.document.char_index(at);
        let spans = parsed
            .iter()
            .map(|tag| {
                let shift = if tag.line_offset == 0 { base } else { 0 };
                TagSpan {
                    id: tag.id,
                    line: at.line + tag.line_offset,
                    start: tag.start_byte + shift,
                    end: tag.end_byte + shift,
                    highlighted: tag.highlighted,
                }
            })
            .collect();
        self.snippet.start(spans);

        let (end, _) = self.insert_text_at(at, &expanded, true);
        record.set_added(self.document.text_range(at, end), at, end);
        let cursor = match self.snippet.active_tag() {
            Some(tag) => Coordinates::new(tag.line, self.document.column_of(tag.line, tag.end)),
            None => end,
        };
        self.state = EditorState::caret(cursor);
        self.commit(record);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EditorConfig;
    use crate::coords::{Coordinates, SelectionMode};
    use crate::editor::TextEditor;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> TextEditor {
        let mut editor = TextEditor::default();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_delete_range_across_lines() {
        let mut ed = editor("abc\ndef");
        ed.delete_range(Coordinates::new(0, 1), Coordinates::new(1, 1));
        assert_eq!(ed.text(), "aef");

        let mut ed = editor("abc\ndef");
        ed.delete_range(Coordinates::new(0, 1), Coordinates::new(1, 2));
        assert_eq!(ed.text(), "af");
        assert_eq!(ed.line_count(), 1);
    }

    #[test]
    #[should_panic(expected = "is after")]
    fn test_delete_range_rejects_reversed_range() {
        let mut ed = editor("abc");
        ed.delete_range(Coordinates::new(0, 2), Coordinates::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "read-only")]
    fn test_primitives_assert_writable() {
        let mut ed = editor("abc");
        ed.set_read_only(true);
        ed.insert_text_at(Coordinates::new(0, 0), "x", false);
    }

    #[test]
    fn test_insert_text_at_reports_end_and_lines() {
        let mut ed = editor("ab");
        let (end, created) = ed.insert_text_at(Coordinates::new(0, 1), "x\r\nyz\n", false);
        assert_eq!(ed.text(), "ax\nyz\nb");
        assert_eq!(end, Coordinates::new(2, 0));
        assert_eq!(created, 2);
        assert!(!ed.can_undo());
    }

    #[test]
    fn test_insert_text_at_auto_indents_braces() {
        let mut ed = editor("\tx");
        ed.set_cursor_position(Coordinates::new(0, 5));
        let (end, _) = ed.insert_text_at(Coordinates::new(0, 5), " {\nbody;\n}", true);
        assert_eq!(ed.text(), "\tx {\n\t\tbody;\n\t}");
        assert_eq!(end, Coordinates::new(2, 5));
    }

    #[test]
    fn test_brace_indent_without_smart_indent() {
        let mut ed = TextEditor::new(EditorConfig::default().with_smart_indent(false));
        ed.set_text("x");
        let (end, _) = ed.insert_text_at(Coordinates::new(0, 1), " {\nbody;\n}", true);
        assert_eq!(ed.text(), "x {\n\tbody;\n}");
        assert_eq!(end, Coordinates::new(2, 1));
    }

    #[test]
    fn test_remove_lines_keeps_one_line() {
        let mut ed = editor("a\nb\nc");
        ed.remove_lines(0, 2);
        assert_eq!(ed.text(), "c");
        ed.insert_line(0);
        assert_eq!(ed.text(), "\nc");
        ed.remove_line(5);
        assert_eq!(ed.line_count(), 2);
    }

    #[test]
    fn test_typing_replaces_selection_in_one_record() {
        let mut ed = editor("hello world");
        ed.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(0, 5),
            SelectionMode::Normal,
        );
        ed.enter_character('J', false);
        assert_eq!(ed.text(), "J world");
        assert!(!ed.has_selection());
        assert_eq!(ed.undo(1), 1);
        assert_eq!(ed.text(), "hello world");
        assert_eq!(ed.selected_text(), "hello");
    }

    #[test]
    fn test_newline_copies_indentation() {
        let mut ed = editor("    let x;");
        ed.move_end(false);
        ed.enter_character('\n', false);
        assert_eq!(ed.text(), "    let x;\n    ");
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 4));
        ed.undo(1);
        assert_eq!(ed.text(), "    let x;");
    }

    #[test]
    fn test_tab_with_spaces_reaches_next_stop() {
        let mut ed = TextEditor::new(EditorConfig::default().with_insert_spaces(true));
        ed.set_text("ab");
        ed.move_end(false);
        ed.enter_character('\t', false);
        assert_eq!(ed.text(), "ab  ");
    }

    #[test]
    fn test_overwrite_replaces_character() {
        let mut ed = editor("abc");
        ed.set_overwrite(true);
        ed.enter_character('X', false);
        assert_eq!(ed.text(), "Xbc");
        ed.undo(1);
        assert_eq!(ed.text(), "abc");
    }

    #[test]
    fn test_complete_braces() {
        let mut ed = TextEditor::new(EditorConfig::default().with_complete_braces(true));
        ed.set_text("f");
        ed.move_end(false);
        ed.enter_character('(', false);
        assert_eq!(ed.text(), "f()");
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 2));

        ed.backspace();
        assert_eq!(ed.text(), "f");
        ed.undo(1);
        assert_eq!(ed.text(), "f()");
        ed.undo(1);
        assert_eq!(ed.text(), "f");

        ed.set_text("  x");
        ed.move_end(false);
        ed.enter_character('{', false);
        assert_eq!(ed.text(), "  x{\n  }");
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 2));
    }

    #[test]
    fn test_backspace_joins_and_moves_error_marker() {
        let mut ed = editor("ab\ncd");
        ed.set_error_markers([(1, "bad".to_string())].into_iter().collect());
        ed.set_cursor_position(Coordinates::new(1, 0));
        ed.backspace();
        assert_eq!(ed.text(), "abcd");
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 2));
        assert_eq!(ed.error_markers().get(&0).map(String::as_str), Some("bad"));

        ed.undo(1);
        assert_eq!(ed.text(), "ab\ncd");
    }

    #[test]
    fn test_backspace_removes_whole_character() {
        let mut ed = editor("aé");
        ed.move_end(false);
        ed.backspace();
        assert_eq!(ed.text(), "a");
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut ed = editor("ab\ncd");
        ed.move_end(false);
        ed.delete();
        assert_eq!(ed.text(), "abcd");
        ed.move_end(false);
        ed.delete();
        assert_eq!(ed.text(), "abcd");
        ed.undo(1);
        assert_eq!(ed.text(), "ab\ncd");
    }

    #[test]
    fn test_block_indent_and_unindent() {
        let mut ed = editor("a\nb\nc");
        ed.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(2, 0),
            SelectionMode::Normal,
        );
        ed.indent();
        assert_eq!(ed.text(), "\ta\n\tb\nc");
        assert_eq!(ed.selection_start(), Coordinates::new(0, 0));
        assert_eq!(ed.selection_end(), Coordinates::new(2, 0));

        ed.unindent();
        assert_eq!(ed.text(), "a\nb\nc");
        ed.undo(1);
        assert_eq!(ed.text(), "\ta\n\tb\nc");
    }

    #[test]
    fn test_unindent_cursor_line() {
        let mut ed = editor("      x");
        ed.move_end(false);
        ed.unindent();
        assert_eq!(ed.text(), "  x");
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 3));
    }

    #[test]
    fn test_cut_copy_paste() {
        let mut ed = editor("one two");
        assert_eq!(ed.copy(), "one two");
        assert_eq!(ed.cut(), None);

        ed.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(0, 4),
            SelectionMode::Normal,
        );
        assert_eq!(ed.cut().as_deref(), Some("one "));
        assert_eq!(ed.text(), "two");
        ed.move_end(false);
        ed.paste(" one\nthree");
        assert_eq!(ed.text(), "two one\nthree");
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 5));
        ed.undo(1);
        assert_eq!(ed.text(), "two");
    }

    #[test]
    fn test_read_only_rejects_edits() {
        let mut ed = editor("abc");
        ed.enter_character('x', false);
        ed.set_read_only(true);
        ed.enter_character('y', false);
        ed.backspace();
        ed.paste("z");
        assert_eq!(ed.text(), "xabc");
        assert!(!ed.can_undo());
        assert_eq!(ed.undo(1), 0);
        ed.select_all();
        assert_eq!(ed.cut().as_deref(), Some("xabc"));
        assert_eq!(ed.text(), "xabc");
    }

    #[test]
    fn test_redo_reapplies() {
        let mut ed = editor("");
        for ch in "hi".chars() {
            ed.enter_character(ch, false);
        }
        assert_eq!(ed.undo(5), 2);
        assert_eq!(ed.text(), "");
        assert_eq!(ed.redo(1), 1);
        assert_eq!(ed.text(), "h");
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 1));
        assert!(ed.can_redo());
        ed.enter_character('o', false);
        assert!(!ed.can_redo());
        assert_eq!(ed.text(), "ho");
    }
}
