//! The [`TextEditor`] facade: document, selection, markers, language and colorizer state of one
//! editing session.
//!
//! Mutating edit commands live in [`crate::edit`]; this module holds construction, queries,
//! cursor movement and the host-facing bookkeeping.

use crate::autocomplete::{Autocomplete, build_suggestions};
use crate::buffer::{Document, Glyph};
use crate::colorizer::Colorizer;
use crate::config::EditorConfig;
use crate::coords::{Coordinates, EditorState, SelectionMode, is_utf8_continuation, utf8_char_len};
use crate::error::LanguageError;
use crate::host::{DebugAction, EditorHost, NullHost};
use crate::markers::{Breakpoint, BreakpointEvent, Breakpoints, ErrorMarkers};
use crate::palette::Palette;
use crate::snippet::{SnippetSession, SnippetState, SnippetTag};
use crate::symbols::{AutocompleteEntry, FunctionSymbol, ProgramSymbols};
use crate::undo::UndoBuffer;
use colortext_lang::{BuiltinLanguage, LanguageDefinition, PaletteIndex};
use std::fmt;

/// A headless code editor.
///
/// Every coordinate accepted from a caller is sanitized before use and every coordinate
/// returned is already sanitized.
pub struct TextEditor {
    pub(crate) document: Document,
    pub(crate) state: EditorState,
    pub(crate) config: EditorConfig,
    pub(crate) colorizer: Colorizer,
    pub(crate) symbols: ProgramSymbols,
    pub(crate) undo_buffer: UndoBuffer,
    pub(crate) breakpoints: Breakpoints,
    pub(crate) error_markers: ErrorMarkers,
    pub(crate) autocomplete: Autocomplete,
    pub(crate) snippet: SnippetSession,
    pub(crate) host: Box<dyn EditorHost>,
    pub(crate) overwrite: bool,
    pub(crate) read_only: bool,
    pub(crate) debug_line: Option<usize>,
    pub(crate) text_changed: bool,
    pub(crate) version: u64,
}

impl fmt::Debug for TextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEditor")
            .field("lines", &self.document.line_count())
            .field("state", &self.state)
            .field("language", &self.colorizer.language().name)
            .field("read_only", &self.read_only)
            .field("debug_line", &self.debug_line)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl TextEditor {
    /// Create an empty editor with a host that ignores notifications.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_host(config, Box::new(NullHost))
    }

    /// Create an empty editor reporting to `host`.
    pub fn with_host(config: EditorConfig, host: Box<dyn EditorHost>) -> Self {
        let mut document = Document::new();
        document.set_tab_size(config.tab_size);
        Self {
            document,
            state: EditorState::default(),
            config,
            colorizer: Colorizer::default(),
            symbols: ProgramSymbols::default(),
            undo_buffer: UndoBuffer::default(),
            breakpoints: Breakpoints::default(),
            error_markers: ErrorMarkers::new(),
            autocomplete: Autocomplete::default(),
            snippet: SnippetSession::default(),
            host,
            overwrite: false,
            read_only: false,
            debug_line: None,
            text_changed: false,
            version: 0,
        }
    }

    /// Replace the host.
    pub fn set_host(&mut self, host: Box<dyn EditorHost>) {
        self.host = host;
    }

    // --- text -----------------------------------------------------------------------------

    /// The document buffer.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whole text, lines joined by `\n`.
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// Replace the whole text. Clears the undo history.
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
        self.reset_after_load();
    }

    /// Text of every line.
    pub fn text_lines(&self) -> Vec<String> {
        self.document.lines_text()
    }

    /// Replace the whole text from lines. Clears the undo history.
    pub fn set_text_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.document.set_lines(lines);
        self.reset_after_load();
    }

    fn reset_after_load(&mut self) {
        self.state = EditorState::caret(self.document.sanitize(self.state.cursor));
        self.undo_buffer.clear();
        self.snippet.end();
        self.autocomplete.close();
        self.mark_changed();
        self.colorize(0, None);
    }

    /// Text between two positions.
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        self.document.text_range(start, end)
    }

    /// Selected text (empty without a selection).
    pub fn selected_text(&self) -> String {
        self.document
            .text_range(self.state.selection_start, self.state.selection_end)
    }

    /// Text of the cursor line.
    pub fn current_line_text(&self) -> String {
        self.document.line_text(self.cursor_position().line)
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// Number of lines, for gutter sizing.
    pub fn total_lines(&self) -> usize {
        self.line_count()
    }

    /// Returns `true` if the text changed since the flag was last reset.
    pub fn is_text_changed(&self) -> bool {
        self.text_changed
    }

    /// Reset the text-changed flag.
    pub fn reset_text_changed(&mut self) {
        self.text_changed = false;
    }

    /// Monotonic counter bumped by every content change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn mark_changed(&mut self) {
        self.text_changed = true;
        self.version += 1;
        self.host.content_changed();
    }

    // --- configuration --------------------------------------------------------------------

    /// Current configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Tab width in columns.
    pub fn tab_size(&self) -> usize {
        self.document.tab_size()
    }

    /// Set the tab width (clamped to `1..=32`).
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.document.set_tab_size(tab_size);
        self.config.tab_size = self.document.tab_size();
        self.state = EditorState {
            selection_start: self.document.sanitize(self.state.selection_start),
            selection_end: self.document.sanitize(self.state.selection_end),
            cursor: self.document.sanitize(self.state.cursor),
        };
    }

    /// Insert spaces instead of tabs.
    pub fn set_insert_spaces(&mut self, enabled: bool) {
        self.config.insert_spaces = enabled;
    }

    /// Toggle brace-aware indentation.
    pub fn set_smart_indent(&mut self, enabled: bool) {
        self.config.smart_indent = enabled;
    }

    /// Toggle re-indenting of pasted text.
    pub fn set_auto_indent_on_paste(&mut self, enabled: bool) {
        self.config.auto_indent_on_paste = enabled;
    }

    /// Toggle bracket auto-closing.
    pub fn set_complete_braces(&mut self, enabled: bool) {
        self.config.complete_braces = enabled;
    }

    /// Toggle the suggestion list.
    pub fn set_autocomplete(&mut self, enabled: bool) {
        self.config.autocomplete = enabled;
        if !enabled {
            self.autocomplete.close();
        }
    }

    /// Toggle suggestions while typing.
    pub fn set_active_autocomplete(&mut self, enabled: bool) {
        self.config.active_autocomplete = enabled;
    }

    /// Overwrite mode: typing replaces the character under the cursor.
    pub fn set_overwrite(&mut self, enabled: bool) {
        self.overwrite = enabled;
    }

    /// Returns `true` in overwrite mode.
    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Reject edits.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Returns `true` if edits are rejected (read-only, or a debugger line is shown).
    pub fn is_read_only(&self) -> bool {
        self.read_only || self.debug_line.is_some()
    }

    // --- language and colors --------------------------------------------------------------

    /// The active language.
    pub fn language(&self) -> &LanguageDefinition {
        self.colorizer.language()
    }

    /// Switch language and recolor everything.
    pub fn set_language(&mut self, language: LanguageDefinition) -> Result<(), LanguageError> {
        self.colorizer = Colorizer::new(language)?;
        self.colorize(0, None);
        Ok(())
    }

    /// Switch to a built-in language.
    pub fn set_builtin_language(&mut self, language: BuiltinLanguage) -> Result<(), LanguageError> {
        self.set_language(language.definition())
    }

    /// Current palette.
    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.config.palette = palette;
    }

    /// Display color of a glyph under the current palette.
    pub fn glyph_color(&self, glyph: &Glyph) -> u32 {
        self.config
            .palette
            .glyph_color(glyph, self.config.colorizer_enabled)
    }

    /// Returns `true` if syntax coloring is on.
    pub fn is_colorizer_enabled(&self) -> bool {
        self.config.colorizer_enabled
    }

    /// Toggle syntax coloring. Disabling resets every glyph to the default class.
    pub fn set_colorizer_enabled(&mut self, enabled: bool) {
        self.config.colorizer_enabled = enabled;
        if enabled {
            self.colorize(0, None);
            return;
        }
        self.colorizer.reset();
        for glyph in self.document.lines_mut().iter_mut().flatten() {
            glyph.class = PaletteIndex::Default;
            glyph.comment = false;
            glyph.multi_line_comment = false;
            glyph.preprocessor = false;
        }
    }

    /// Mark `count` lines from `from_line` for recoloring (`None` means through the end).
    pub fn colorize(&mut self, from_line: usize, count: Option<usize>) {
        let line_count = self.document.line_count();
        self.colorizer.invalidate(from_line, count, line_count);
    }

    /// Perform one bounded colorizing step. Returns `true` if work remains.
    pub fn process_colorization(&mut self) -> bool {
        if !self.config.colorizer_enabled {
            return false;
        }
        self.colorizer.run_pass(&mut self.document, &self.symbols)
    }

    /// Colorize until nothing is pending.
    pub fn colorize_all(&mut self) {
        if self.config.colorizer_enabled {
            self.colorizer.colorize_all(&mut self.document, &self.symbols);
        }
    }

    /// Returns `true` if the colorizer has pending work.
    pub fn is_colorizing(&self) -> bool {
        self.config.colorizer_enabled && self.colorizer.has_pending_work()
    }

    // --- program symbols ------------------------------------------------------------------

    /// Symbol tables fed by the host.
    pub fn symbols(&self) -> &ProgramSymbols {
        &self.symbols
    }

    /// Replace every symbol table.
    pub fn set_symbols(&mut self, symbols: ProgramSymbols) {
        self.symbols = symbols;
        self.colorize(0, None);
    }

    /// Add or replace a function.
    pub fn add_autocomplete_function(&mut self, function: FunctionSymbol) {
        self.symbols.add_function(function);
        self.colorize(0, None);
    }

    /// Add a user type name.
    pub fn add_autocomplete_user_type(&mut self, name: impl Into<String>) {
        self.symbols.user_types.push(name.into());
        self.colorize(0, None);
    }

    /// Add a uniform name.
    pub fn add_autocomplete_uniform(&mut self, name: impl Into<String>) {
        self.symbols.uniforms.push(name.into());
        self.colorize(0, None);
    }

    /// Add a global variable name.
    pub fn add_autocomplete_global(&mut self, name: impl Into<String>) {
        self.symbols.globals.push(name.into());
        self.colorize(0, None);
    }

    /// Add a flat suggestion.
    pub fn add_autocomplete_entry(
        &mut self,
        search: impl Into<String>,
        display: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.symbols.entries.push(AutocompleteEntry {
            search: search.into(),
            display: display.into(),
            value: value.into(),
        });
    }

    /// Drop functions, user types, uniforms and globals.
    pub fn clear_autocomplete_data(&mut self) {
        self.symbols.clear_program();
        self.colorize(0, None);
    }

    /// Drop flat suggestions.
    pub fn clear_autocomplete_entries(&mut self) {
        self.symbols.entries.clear();
    }

    // --- autocomplete ---------------------------------------------------------------------

    /// Suggestion list state.
    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Build suggestions for the identifier at the cursor. Returns `true` if the list opened.
    pub fn request_autocomplete(&mut self) -> bool {
        if !self.config.autocomplete {
            return false;
        }
        let cursor = self.cursor_position();
        let (start, end) = self.document.identifier_span(cursor);
        let word = self.document.text_range(start, end);
        let suggestions = build_suggestions(
            &word,
            cursor.line,
            &self.symbols,
            self.colorizer.language(),
            self.config.complete_braces,
        );
        tracing::trace!(%word, count = suggestions.len(), "built suggestions");
        self.autocomplete.show(word, start, suggestions);
        self.autocomplete.is_open()
    }

    /// Hide the suggestion list.
    pub fn close_autocomplete(&mut self) {
        self.autocomplete.close();
    }

    /// Select the next suggestion.
    pub fn autocomplete_next(&mut self) {
        self.autocomplete.select_next();
    }

    /// Select the previous suggestion.
    pub fn autocomplete_previous(&mut self) {
        self.autocomplete.select_previous();
    }

    // --- snippets -------------------------------------------------------------------------

    /// Snippet session state.
    pub fn snippet_state(&self) -> SnippetState {
        self.snippet.state()
    }

    /// Returns `true` while snippet tags are being edited.
    pub fn is_snippet_active(&self) -> bool {
        self.snippet.is_active()
    }

    /// Live snippet tags.
    pub fn snippet_tags(&self) -> Vec<SnippetTag> {
        self.snippet
            .tags()
            .iter()
            .map(|t| SnippetTag {
                id: t.id,
                start: Coordinates::new(t.line, self.document.column_of(t.line, t.start)),
                end: Coordinates::new(t.line, self.document.column_of(t.line, t.end)),
                highlighted: t.highlighted,
            })
            .collect()
    }

    pub(crate) fn end_snippet(&mut self) {
        self.snippet.end();
    }

    // --- cursor and selection -------------------------------------------------------------

    /// Selection and cursor snapshot.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Cursor position, clamped into the document.
    pub fn cursor_position(&self) -> Coordinates {
        self.document.sanitize(self.state.cursor)
    }

    /// Move the cursor without touching the selection.
    pub fn set_cursor_position(&mut self, position: Coordinates) {
        self.end_snippet();
        self.state.cursor = self.document.sanitize(position);
    }

    /// Selection start.
    pub fn selection_start(&self) -> Coordinates {
        self.state.selection_start
    }

    /// Selection end.
    pub fn selection_end(&self) -> Coordinates {
        self.state.selection_end
    }

    /// Set the selection start, keeping `start <= end`.
    pub fn set_selection_start(&mut self, position: Coordinates) {
        let end = self.state.selection_end;
        self.set_selection(position, end, SelectionMode::Normal);
    }

    /// Set the selection end, keeping `start <= end`.
    pub fn set_selection_end(&mut self, position: Coordinates) {
        let start = self.state.selection_start;
        self.set_selection(start, position, SelectionMode::Normal);
    }

    /// Select between two positions, snapping per `mode`.
    pub fn set_selection(&mut self, start: Coordinates, end: Coordinates, mode: SelectionMode) {
        self.end_snippet();
        self.select(start, end, mode);
    }

    pub(crate) fn select(&mut self, start: Coordinates, end: Coordinates, mode: SelectionMode) {
        let mut start = self.document.sanitize(start);
        let mut end = self.document.sanitize(end);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        let by_class = self.config.colorizer_enabled;
        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                start = self.document.find_word_start(start, by_class);
                if !self.document.is_on_word_boundary(end, by_class) {
                    end = self
                        .document
                        .find_word_end(self.document.find_word_start(end, by_class), by_class);
                }
            }
            SelectionMode::Line => {
                start = Coordinates::new(start.line, 0);
                end = Coordinates::new(end.line, self.document.max_column(end.line));
            }
        }

        self.state.selection_start = start;
        self.state.selection_end = end;
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let end = Coordinates::new(self.document.line_count(), 0);
        self.set_selection(Coordinates::default(), end, SelectionMode::Normal);
    }

    /// Select the word under the cursor.
    pub fn select_word_under_cursor(&mut self) {
        let cursor = self.cursor_position();
        let by_class = self.config.colorizer_enabled;
        let start = self.document.find_word_start(cursor, by_class);
        let end = self.document.find_word_end(cursor, by_class);
        self.set_selection(start, end, SelectionMode::Normal);
    }

    /// Returns `true` if the selection is not empty.
    pub fn has_selection(&self) -> bool {
        self.state.has_selection()
    }

    /// Word ending at or containing the character before the cursor.
    pub fn word_under_cursor(&self) -> String {
        let mut at = self.cursor_position();
        at.column = at.column.saturating_sub(1);
        self.document.word_at(at, self.config.colorizer_enabled)
    }

    /// Word at an arbitrary position.
    pub fn word_at(&self, at: Coordinates) -> String {
        self.document
            .word_at(self.document.sanitize(at), self.config.colorizer_enabled)
    }

    // --- movement -------------------------------------------------------------------------

    fn finish_move(&mut self, old: Coordinates, select: bool, backward: bool) {
        self.end_snippet();
        self.autocomplete.close();

        let new = self.cursor_position();
        let (mut start, mut end) = (self.state.selection_start, self.state.selection_end);
        if !select {
            start = new;
            end = new;
        } else if backward {
            if old == start {
                start = new;
            } else if old == end {
                end = new;
            } else {
                start = new;
                end = old;
            }
        } else if old == end {
            end = new;
        } else if old == start {
            start = new;
        } else {
            start = old;
            end = new;
        }
        self.select(start, end, SelectionMode::Normal);
    }

    /// Move up `amount` lines, keeping the preferred column.
    pub fn move_up(&mut self, amount: usize, select: bool) {
        let old = self.cursor_position();
        self.state.cursor.line = self.state.cursor.line.saturating_sub(amount);
        self.finish_move(old, select, true);
    }

    /// Move down `amount` lines, keeping the preferred column.
    pub fn move_down(&mut self, amount: usize, select: bool) {
        let old = self.cursor_position();
        let last = self.document.line_count() - 1;
        self.state.cursor.line = self.state.cursor.line.saturating_add(amount).min(last);
        self.finish_move(old, select, false);
    }

    /// Move left `amount` characters (or words), wrapping to the previous line.
    pub fn move_left(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.cursor_position();
        let by_class = self.config.colorizer_enabled;
        let mut line = old.line;
        let mut cindex = self.document.char_index(old);

        for _ in 0..amount {
            let glyphs = &self.document.lines()[line];
            if cindex == 0 {
                if line > 0 {
                    line -= 1;
                    cindex = self.document.lines()[line].len();
                }
            } else {
                cindex -= 1;
                while cindex > 0 && is_utf8_continuation(glyphs[cindex].ch) {
                    cindex -= 1;
                }
            }

            if word_mode {
                let at = Coordinates::new(line, self.document.column_of(line, cindex));
                let start = self.document.find_word_start(at, by_class);
                cindex = self.document.char_index(start);
            }
        }

        self.state.cursor = Coordinates::new(line, self.document.column_of(line, cindex));
        self.finish_move(old, select, true);
    }

    /// Move right `amount` characters (or words), wrapping to the next line.
    pub fn move_right(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.cursor_position();
        let by_class = self.config.colorizer_enabled;
        let mut line = old.line;
        let mut cindex = self.document.char_index(old);

        for _ in 0..amount {
            let glyphs = &self.document.lines()[line];
            if cindex >= glyphs.len() {
                if line + 1 < self.document.line_count() {
                    line += 1;
                    cindex = 0;
                } else {
                    break;
                }
            } else {
                cindex = (cindex + utf8_char_len(glyphs[cindex].ch)).min(glyphs.len());
                if word_mode {
                    let at = Coordinates::new(line, self.document.column_of(line, cindex));
                    let end = self.document.find_word_end(at, by_class);
                    cindex = self.document.char_index(end);
                }
            }
        }

        self.state.cursor = Coordinates::new(line, self.document.column_of(line, cindex));
        self.finish_move(old, select, false);
    }

    /// Move to the start of the document.
    pub fn move_top(&mut self, select: bool) {
        let old = self.cursor_position();
        self.state.cursor = Coordinates::default();
        self.finish_move(old, select, true);
    }

    /// Move to the start of the last line.
    pub fn move_bottom(&mut self, select: bool) {
        let old = self.cursor_position();
        self.state.cursor = Coordinates::new(self.document.line_count() - 1, 0);
        self.finish_move(old, select, false);
    }

    /// Move to the start of the line.
    pub fn move_home(&mut self, select: bool) {
        let old = self.cursor_position();
        self.state.cursor = Coordinates::new(old.line, 0);
        self.finish_move(old, select, true);
    }

    /// Move to the end of the line.
    pub fn move_end(&mut self, select: bool) {
        let old = self.cursor_position();
        self.state.cursor = Coordinates::new(old.line, self.document.max_column(old.line));
        self.finish_move(old, select, false);
    }

    // --- breakpoints and markers ----------------------------------------------------------

    pub(crate) fn emit_breakpoint_events(&mut self, events: Vec<BreakpointEvent>) {
        for event in events {
            match event {
                BreakpointEvent::Updated(bp) => {
                    self.host
                        .breakpoint_updated(bp.line, &bp.condition, bp.enabled)
                }
                BreakpointEvent::Removed(line) => self.host.breakpoint_removed(line),
            }
        }
    }

    /// Add (or replace) a breakpoint. The line is clamped into the document.
    pub fn add_breakpoint(&mut self, line: usize, condition: &str, enabled: bool) {
        let line = line.min(self.document.line_count() - 1);
        let events = self.breakpoints.add(line, condition, enabled);
        self.emit_breakpoint_events(events);
    }

    /// Remove the breakpoint on `line`. Returns `true` if there was one.
    pub fn remove_breakpoint(&mut self, line: usize) -> bool {
        let removed = self.breakpoints.remove(line).is_some();
        if removed {
            self.host.breakpoint_removed(line);
        }
        removed
    }

    /// Enable or disable the breakpoint on `line`. Returns `true` if there was one.
    pub fn set_breakpoint_enabled(&mut self, line: usize, enabled: bool) -> bool {
        match self.breakpoints.modify(line, |bp| bp.enabled = enabled) {
            Some(bp) => {
                self.emit_breakpoint_events(vec![BreakpointEvent::Updated(bp)]);
                true
            }
            None => false,
        }
    }

    /// Change the condition of the breakpoint on `line`. Returns `true` if there was one.
    pub fn set_breakpoint_condition(&mut self, line: usize, condition: &str) -> bool {
        match self
            .breakpoints
            .modify(line, |bp| bp.condition = condition.to_string())
        {
            Some(bp) => {
                self.emit_breakpoint_events(vec![BreakpointEvent::Updated(bp)]);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `line` has a breakpoint.
    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.breakpoints.get(line).is_some()
    }

    /// The breakpoint on `line`.
    pub fn breakpoint(&self, line: usize) -> Option<&Breakpoint> {
        self.breakpoints.get(line)
    }

    /// All breakpoints.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Remove every breakpoint, notifying the host for each.
    pub fn clear_breakpoints(&mut self) {
        let events = self.breakpoints.clear();
        self.emit_breakpoint_events(events);
    }

    /// Replace the error markers.
    pub fn set_error_markers(&mut self, markers: ErrorMarkers) {
        self.error_markers = markers;
    }

    /// Error markers by line.
    pub fn error_markers(&self) -> &ErrorMarkers {
        &self.error_markers
    }

    /// Remove every error marker.
    pub fn clear_error_markers(&mut self) {
        self.error_markers.clear();
    }

    // --- debugger -------------------------------------------------------------------------

    /// Show (or hide) the debugger's current line. The editor is read-only while shown.
    pub fn set_current_line_indicator(&mut self, line: Option<usize>) {
        self.debug_line = line;
        if line.is_some() {
            self.end_snippet();
            self.autocomplete.close();
        }
    }

    /// Line the debugger is stopped at.
    pub fn current_line_indicator(&self) -> Option<usize> {
        self.debug_line
    }

    /// Forward a debugger action to the host.
    pub fn debug_action(&mut self, action: DebugAction) {
        tracing::debug!(?action, "debugger action");
        self.host.debugger_action(action);
    }

    /// Ask the host to continue execution at `line`.
    pub fn debug_jump(&mut self, line: usize) {
        self.host.debugger_jump(line);
    }

    /// Hover text for the identifier at `at`: the host's description first, then the
    /// language's documentation.
    pub fn hover_text(&mut self, at: Coordinates) -> Option<String> {
        let (start, end) = self.document.identifier_span(at);
        if start == end {
            return None;
        }
        let word = self.document.text_range(start, end);
        if self.host.has_identifier_hover(&word)
            && let Some(text) = self.host.identifier_hover(&word)
        {
            return Some(text);
        }

        let language = self.colorizer.language();
        language
            .known_identifier(&word)
            .or_else(|| language.preproc_identifier(&word))
            .map(|ident| ident.declaration.clone())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> TextEditor {
        let mut editor = TextEditor::default();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_set_text_resets_history() {
        let mut ed = editor("one\ntwo");
        assert_eq!(ed.line_count(), 2);
        assert_eq!(ed.text_lines(), vec!["one".to_string(), "two".to_string()]);
        assert!(ed.is_text_changed());
        assert!(!ed.undo_buffer.can_undo());

        ed.reset_text_changed();
        ed.set_text_lines(&["a", "b", "c"]);
        assert_eq!(ed.text(), "a\nb\nc");
        assert!(ed.is_text_changed());
    }

    #[test]
    fn test_cursor_is_sanitized() {
        let mut ed = editor("abc\nde");
        ed.set_cursor_position(Coordinates::new(9, 9));
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 2));
    }

    #[test]
    fn test_selection_modes() {
        let mut ed = editor("foo bar\nbaz");
        ed.set_selection(
            Coordinates::new(0, 5),
            Coordinates::new(0, 1),
            SelectionMode::Normal,
        );
        assert_eq!(ed.selected_text(), "oo b");

        ed.set_selection(
            Coordinates::new(0, 5),
            Coordinates::new(0, 6),
            SelectionMode::Word,
        );
        assert_eq!(ed.selected_text(), "bar");

        ed.set_selection(
            Coordinates::new(0, 2),
            Coordinates::new(1, 1),
            SelectionMode::Line,
        );
        assert_eq!(ed.selected_text(), "foo bar\nbaz");

        ed.select_all();
        assert_eq!(ed.selection_end(), Coordinates::new(1, 3));
    }

    #[test]
    fn test_move_with_selection_keeps_anchor() {
        let mut ed = editor("hello\nworld");
        ed.set_cursor_position(Coordinates::new(0, 2));
        ed.move_right(2, true, false);
        assert_eq!(ed.selected_text(), "ll");
        ed.move_down(1, true);
        assert_eq!(ed.selection_start(), Coordinates::new(0, 2));
        assert_eq!(ed.selection_end(), Coordinates::new(1, 4));
        ed.move_left(1, false, false);
        assert!(!ed.has_selection());
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 3));
    }

    #[test]
    fn test_move_across_lines_and_multibyte() {
        let mut ed = editor("aé\nb");
        ed.set_cursor_position(Coordinates::new(0, 2));
        ed.move_right(1, false, false);
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 0));
        ed.move_left(2, false, false);
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 1));
        ed.move_end(false);
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 2));
        ed.move_bottom(true);
        assert_eq!(ed.selected_text(), "\n");
        ed.move_top(false);
        assert_eq!(ed.cursor_position(), Coordinates::default());
    }

    #[test]
    fn test_vertical_moves_keep_preferred_column() {
        let mut ed = editor("long line\nx\nlong line");
        ed.set_cursor_position(Coordinates::new(0, 7));
        ed.move_down(1, false);
        assert_eq!(ed.cursor_position(), Coordinates::new(1, 1));
        ed.move_down(1, false);
        assert_eq!(ed.cursor_position(), Coordinates::new(2, 7));
    }

    #[test]
    fn test_word_move_without_colorizer() {
        let mut ed = TextEditor::new(EditorConfig::default().with_colorizer(false));
        ed.set_text("foo bar baz");
        ed.move_right(1, false, true);
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 3));
        ed.move_end(false);
        ed.move_left(1, false, true);
        assert_eq!(ed.cursor_position(), Coordinates::new(0, 8));
    }

    #[test]
    fn test_word_under_cursor() {
        let mut ed = TextEditor::new(EditorConfig::default().with_colorizer(false));
        ed.set_text("let value = 1;");
        ed.set_cursor_position(Coordinates::new(0, 9));
        assert_eq!(ed.word_under_cursor(), "value");
    }

    #[test]
    fn test_hover_falls_back_to_language_docs() {
        let mut ed = editor("sqrt(x)");
        ed.set_language(
            LanguageDefinition::new("Toy").with_identifiers([("sqrt", "float sqrt(float)")]),
        )
        .unwrap();
        assert_eq!(
            ed.hover_text(Coordinates::new(0, 2)).as_deref(),
            Some("float sqrt(float)")
        );
        assert_eq!(ed.hover_text(Coordinates::new(0, 5)), None);
    }

    #[test]
    fn test_debug_line_makes_editor_read_only() {
        let mut ed = editor("x");
        assert!(!ed.is_read_only());
        ed.set_current_line_indicator(Some(0));
        assert!(ed.is_read_only());
        ed.set_current_line_indicator(None);
        assert!(!ed.is_read_only());
    }

    #[test]
    fn test_disabling_colorizer_resets_classes() {
        let mut ed = editor("if x");
        ed.set_language(
            LanguageDefinition::new("Toy")
                .with_keywords(["if"])
                .with_rule("[a-z]+", PaletteIndex::Identifier),
        )
        .unwrap();
        ed.colorize_all();
        assert_eq!(ed.document().lines()[0][0].class, PaletteIndex::Keyword);

        ed.set_colorizer_enabled(false);
        assert!(
            ed.document().lines()[0]
                .iter()
                .all(|g| g.class == PaletteIndex::Default)
        );
        assert!(!ed.process_colorization());
        let glyph = ed.document().lines()[0][0];
        assert_eq!(ed.glyph_color(&glyph), ed.palette().get(PaletteIndex::Default));
    }
}
