//! Document buffer: lines of styled bytes plus the coordinate conversions over them.
//!
//! Every conversion between visual columns and byte indices lives here; other modules must
//! not recompute tab stops on their own.

use crate::coords::{
    Coordinates, DEFAULT_TAB_WIDTH, MAX_TAB_WIDTH, advance_column, is_utf8_continuation,
    utf8_char_len,
};
use colortext_lang::PaletteIndex;

/// One stored byte of text plus its derived classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// The byte. Multi-byte characters span several glyphs; only the lead byte starts a character.
    pub ch: u8,
    /// Token classification.
    pub class: PaletteIndex,
    /// Inside a single-line comment.
    pub comment: bool,
    /// Inside a multi-line comment.
    pub multi_line_comment: bool,
    /// Inside a preprocessor directive line.
    pub preprocessor: bool,
}

impl Glyph {
    /// Create a glyph with the given classification and cleared flags.
    pub fn new(ch: u8, class: PaletteIndex) -> Self {
        Self {
            ch,
            class,
            comment: false,
            multi_line_comment: false,
            preprocessor: false,
        }
    }
}

/// A line of glyphs, left to right.
pub type Line = Vec<Glyph>;

/// C `isspace` over a single byte.
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn is_identifier_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80
}

pub(crate) fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

pub(crate) fn glyphs_from_str(text: &str) -> Line {
    text.bytes()
        .filter(|b| *b != b'\r')
        .map(|b| Glyph::new(b, PaletteIndex::Default))
        .collect()
}

/// Ordered lines of glyphs. Never empty: an empty document is one empty line.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    tab_size: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            tab_size: DEFAULT_TAB_WIDTH,
        }
    }

    /// Create a document from text.
    pub fn from_text(text: &str, tab_size: usize) -> Self {
        let mut doc = Self::new();
        doc.set_tab_size(tab_size);
        doc.set_text(text);
        doc
    }

    /// Tab width in columns.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Set the tab width, clamped to `1..=32`.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.clamp(1, MAX_TAB_WIDTH);
    }

    /// All lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }

    /// A single line.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Replace the whole content. `\r` bytes are dropped.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(glyphs_from_str).collect();
    }

    /// Replace the whole content from a list of lines.
    pub fn set_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.lines = lines.iter().map(|l| glyphs_from_str(l.as_ref())).collect();
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
    }

    /// Whole document with lines joined by `\n`.
    pub fn text(&self) -> String {
        let mut bytes = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                bytes.push(b'\n');
            }
            bytes.extend(line.iter().map(|g| g.ch));
        }
        bytes_to_string(bytes)
    }

    /// Text of a single line (empty when out of range).
    pub fn line_text(&self, index: usize) -> String {
        self.lines
            .get(index)
            .map(|line| bytes_to_string(line.iter().map(|g| g.ch).collect()))
            .unwrap_or_default()
    }

    /// Text of every line.
    pub fn lines_text(&self) -> Vec<String> {
        (0..self.lines.len()).map(|i| self.line_text(i)).collect()
    }

    /// Byte index on `at.line` for the visual column `at.column`.
    ///
    /// Walks characters until the accumulated column reaches the target. Out-of-range lines
    /// map to 0.
    pub fn char_index(&self, at: Coordinates) -> usize {
        let Some(line) = self.lines.get(at.line) else {
            return 0;
        };
        let mut column = 0;
        let mut index = 0;
        while index < line.len() && column < at.column {
            let c = line[index].ch;
            column = advance_column(column, c, self.tab_size);
            index += utf8_char_len(c);
        }
        index.min(line.len())
    }

    /// Visual column of byte `index` on `line`.
    pub fn column_of(&self, line: usize, index: usize) -> usize {
        let Some(line) = self.lines.get(line) else {
            return 0;
        };
        let mut column = 0;
        let mut i = 0;
        while i < index && i < line.len() {
            let c = line[i].ch;
            column = advance_column(column, c, self.tab_size);
            i += utf8_char_len(c);
        }
        column
    }

    /// Visual width of a whole line.
    pub fn max_column(&self, line: usize) -> usize {
        self.lines
            .get(line)
            .map(|l| self.column_of(line, l.len()))
            .unwrap_or(0)
    }

    /// Number of characters (not bytes) on a line.
    pub fn line_char_count(&self, line: usize) -> usize {
        self.lines
            .get(line)
            .map(|l| l.iter().filter(|g| !is_utf8_continuation(g.ch)).count())
            .unwrap_or(0)
    }

    /// Clamp a position into the document.
    pub fn sanitize(&self, at: Coordinates) -> Coordinates {
        if self.lines.is_empty() {
            return Coordinates::default();
        }
        let clamped = if at.line >= self.lines.len() {
            let last = self.lines.len() - 1;
            Coordinates::new(last, self.max_column(last))
        } else {
            Coordinates::new(at.line, at.column.min(self.max_column(at.line)))
        };
        if clamped != at {
            tracing::trace!(?at, ?clamped, "clamped coordinates");
        }
        clamped
    }

    /// Text between two positions, with `\n` between lines.
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        let start = self.sanitize(start);
        let end = self.sanitize(end);
        if start >= end {
            return String::new();
        }

        let istart = self.char_index(start);
        let iend = self.char_index(end);
        let mut bytes = Vec::new();
        for l in start.line..=end.line {
            let line = &self.lines[l];
            let from = if l == start.line { istart } else { 0 };
            let to = if l == end.line { iend } else { line.len() };
            bytes.extend(line[from.min(to)..to].iter().map(|g| g.ch));
            if l < end.line {
                bytes.push(b'\n');
            }
        }
        bytes_to_string(bytes)
    }

    /// Leading blanks of a line: `(byte length, visual width)`.
    pub fn leading_indent(&self, line: usize) -> (usize, usize) {
        let Some(glyphs) = self.lines.get(line) else {
            return (0, 0);
        };
        let len = glyphs
            .iter()
            .take_while(|g| g.ch == b' ' || g.ch == b'\t')
            .count();
        (len, self.column_of(line, len))
    }

    /// Start of the word containing `at`.
    ///
    /// Words are runs of equal classification when `by_class` is set, otherwise runs of
    /// non-whitespace.
    pub fn find_word_start(&self, at: Coordinates, by_class: bool) -> Coordinates {
        let Some(line) = self.lines.get(at.line) else {
            return at;
        };
        let mut cindex = self.char_index(at);
        if cindex >= line.len() {
            return at;
        }

        while cindex > 0 && is_space(line[cindex].ch) {
            cindex -= 1;
        }

        let first = line[cindex];
        while cindex > 0 {
            let c = line[cindex].ch;
            if !is_utf8_continuation(c) {
                if is_space(c) {
                    cindex += 1;
                    break;
                }
                if !same_word(&first, &line[cindex - 1], by_class) {
                    break;
                }
            }
            cindex -= 1;
        }
        Coordinates::new(at.line, self.column_of(at.line, cindex))
    }

    /// End of the word containing `at`, including trailing whitespace when starting on it.
    pub fn find_word_end(&self, at: Coordinates, by_class: bool) -> Coordinates {
        let Some(line) = self.lines.get(at.line) else {
            return at;
        };
        let mut cindex = self.char_index(at);
        if cindex >= line.len() {
            return at;
        }

        let prev_space = is_space(line[cindex].ch);
        let first = line[cindex];
        while cindex < line.len() {
            let c = line[cindex].ch;
            if !same_word(&first, &line[cindex], by_class) {
                break;
            }
            if prev_space != is_space(c) {
                if is_space(c) {
                    while cindex < line.len() && is_space(line[cindex].ch) {
                        cindex += 1;
                    }
                }
                break;
            }
            cindex += utf8_char_len(c);
        }
        Coordinates::new(at.line, self.column_of(at.line, cindex.min(line.len())))
    }

    /// Start of the next alphanumeric word after `from`, possibly on a later line.
    pub fn find_next_word(&self, from: Coordinates) -> Coordinates {
        let mut at = from;
        if at.line >= self.lines.len() {
            return at;
        }

        let mut cindex = self.char_index(from);
        let mut is_word = false;
        let mut skip = false;
        if let Some(g) = self.lines[at.line].get(cindex) {
            is_word = g.ch.is_ascii_alphanumeric();
            skip = is_word;
        }

        while !is_word || skip {
            let Some(line) = self.lines.get(at.line) else {
                let last = self.lines.len() - 1;
                return Coordinates::new(last, self.max_column(last));
            };
            if let Some(g) = line.get(cindex) {
                is_word = g.ch.is_ascii_alphanumeric();
                if is_word && !skip {
                    return Coordinates::new(at.line, self.column_of(at.line, cindex));
                }
                if !is_word {
                    skip = false;
                }
                cindex += 1;
            } else {
                cindex = 0;
                at.line += 1;
                skip = false;
                is_word = false;
            }
        }
        at
    }

    /// Returns `true` if a word starts or ends at `at`.
    pub fn is_on_word_boundary(&self, at: Coordinates, by_class: bool) -> bool {
        if at.line >= self.lines.len() || at.column == 0 {
            return true;
        }
        let line = &self.lines[at.line];
        let cindex = self.char_index(at);
        if cindex == 0 || cindex >= line.len() {
            return true;
        }
        !same_word(&line[cindex], &line[cindex - 1], by_class)
    }

    /// Word containing `at` (see [`Document::find_word_start`]).
    pub fn word_at(&self, at: Coordinates, by_class: bool) -> String {
        let start = self.find_word_start(at, by_class);
        let end = self.find_word_end(at, by_class);
        self.text_range(start, end)
    }

    /// Identifier characters touching `at` on either side: `(start, end)`.
    ///
    /// Identifier bytes are ASCII alphanumerics, `_`, and any non-ASCII byte.
    pub fn identifier_span(&self, at: Coordinates) -> (Coordinates, Coordinates) {
        let at = self.sanitize(at);
        let line = &self.lines[at.line];
        let index = self.char_index(at);

        let mut start = index;
        while start > 0 && is_identifier_byte(line[start - 1].ch) {
            start -= 1;
        }
        let mut end = index;
        while end < line.len() && is_identifier_byte(line[end].ch) {
            end += 1;
        }
        (
            Coordinates::new(at.line, self.column_of(at.line, start)),
            Coordinates::new(at.line, self.column_of(at.line, end)),
        )
    }
}

fn same_word(a: &Glyph, b: &Glyph, by_class: bool) -> bool {
    if by_class {
        a.class == b.class
    } else {
        is_space(a.ch) == is_space(b.ch)
    }
}
