//! Incremental colorizer.
//!
//! Coloring runs in two phases:
//!
//! 1. [`scan_comment_state`] walks the whole document once and derives the comment, string and
//!    preprocessor flags of every glyph. Comment state can span any number of lines, so this
//!    phase is never range-limited.
//! 2. Token classification re-tokenizes a bounded window of the dirty line range per call,
//!    using the language's hand-written tokenizer first and its regex rules second.
//!
//! [`Colorizer::run_pass`] performs one bounded step and reports whether work remains.

use crate::buffer::{Document, Line, is_space};
use crate::coords::utf8_char_len;
use crate::error::LanguageError;
use crate::symbols::ProgramSymbols;
use colortext_lang::{CommentConfig, LanguageDefinition, PaletteIndex, Token};
use regex::bytes::Regex;

/// Lines classified per pass when the language has a hand-written tokenizer.
pub const TOKENIZER_LINE_BUDGET: usize = 10_000;

/// Lines classified per pass when only regex rules are available.
pub const REGEX_LINE_BUDGET: usize = 10;

/// Derived per-glyph flags computed by [`scan_comment_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphFlags {
    /// Inside a single-line comment.
    pub comment: bool,
    /// Inside a multi-line comment.
    pub multi_line_comment: bool,
    /// On a preprocessor directive line.
    pub preprocessor: bool,
}

fn matches_at(line: &[u8], index: usize, token: &[u8]) -> bool {
    line.get(index..index + token.len()) == Some(token)
}

/// Compute the comment/string/preprocessor flags of every glyph.
///
/// Strings honor backslash escapes and doubled quotes and continue across lines until closed.
/// A single-line comment or a preprocessor directive continues onto the next line when the
/// line ends with a backslash. Multi-line comments are tracked across the whole document.
pub fn scan_comment_state(
    lines: &[Line],
    comments: &CommentConfig,
    preproc_char: u8,
) -> Vec<Vec<GlyphFlags>> {
    let line_token = comments.line_token();
    let block_tokens = comments.block_tokens();

    let mut within_string = false;
    let mut within_single = false;
    let mut within_preproc = false;
    let mut first_char = true;
    let mut concatenate = false;
    // (line, byte) where the open block comment started.
    let mut block_start: Option<(usize, usize)> = None;

    let mut result = Vec::with_capacity(lines.len());
    for (line_index, line) in lines.iter().enumerate() {
        let bytes: Vec<u8> = line.iter().map(|g| g.ch).collect();
        let mut flags = vec![GlyphFlags::default(); bytes.len()];

        if !concatenate {
            within_single = false;
            within_preproc = false;
            first_char = true;
        }
        concatenate = bytes.last() == Some(&b'\\');

        let mut i = 0;
        while i < bytes.len() {
            let lead = i;
            let c = bytes[i];
            let in_block = block_start.is_some();

            if c != preproc_char && !is_space(c) {
                first_char = false;
            }

            if within_string {
                if c == b'"' {
                    if bytes.get(i + 1) == Some(&b'"') {
                        i += 1;
                    } else {
                        within_string = false;
                    }
                } else if c == b'\\' && i + 1 < bytes.len() {
                    i += 1;
                }
            } else {
                if first_char && c == preproc_char {
                    within_preproc = true;
                }

                if c == b'"' && !in_block && !within_single {
                    within_string = true;
                } else {
                    if !in_block && !within_single {
                        if line_token.is_some_and(|t| matches_at(&bytes, i, t)) {
                            within_single = true;
                        } else if let Some((start, _)) = block_tokens
                            && matches_at(&bytes, i, start)
                        {
                            block_start = Some((line_index, i));
                        }
                    }

                    flags[i].multi_line_comment = block_start.is_some();
                    flags[i].comment = within_single;

                    if let (Some((open_line, open_index)), Some((start, end))) =
                        (block_start, block_tokens)
                        && i + 1 >= end.len()
                    {
                        let end_from = i + 1 - end.len();
                        let overlaps_opening =
                            open_line == line_index && end_from < open_index + start.len();
                        if !overlaps_opening && bytes[end_from..=i] == *end {
                            block_start = None;
                        }
                    }
                }
            }

            // Escape and doubled-quote pairs consumed an extra byte above.
            let step_end = (i + utf8_char_len(bytes[i])).min(bytes.len());
            let lead_flags = GlyphFlags {
                preprocessor: within_preproc,
                ..flags[lead]
            };
            for f in &mut flags[lead..step_end] {
                *f = lead_flags;
            }
            i = step_end;
        }

        result.push(flags);
    }
    result
}

/// Copy flags computed by [`scan_comment_state`] onto the document's glyphs.
pub fn apply_comment_state(document: &mut Document, flags: &[Vec<GlyphFlags>]) {
    for (line, line_flags) in document.lines_mut().iter_mut().zip(flags) {
        for (glyph, f) in line.iter_mut().zip(line_flags) {
            glyph.comment = f.comment;
            glyph.multi_line_comment = f.multi_line_comment;
            glyph.preprocessor = f.preprocessor;
        }
    }
}

/// A token rule compiled for matching at the scan position.
#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    class: PaletteIndex,
}

/// Classify an identifier token against the language tables and then the program symbols.
///
/// Inside preprocessor text only preprocessor identifiers are recognized.
pub fn classify_identifier(
    language: &LanguageDefinition,
    symbols: &ProgramSymbols,
    identifier: &str,
    line: usize,
    in_preprocessor: bool,
) -> PaletteIndex {
    if in_preprocessor {
        return if language.preproc_identifier(identifier).is_some() {
            PaletteIndex::PreprocIdentifier
        } else {
            PaletteIndex::Identifier
        };
    }

    if language.is_keyword(identifier) {
        PaletteIndex::Keyword
    } else if language.known_identifier(identifier).is_some() {
        PaletteIndex::KnownIdentifier
    } else if language.preproc_identifier(identifier).is_some() {
        PaletteIndex::PreprocIdentifier
    } else {
        symbols
            .classify(identifier, line)
            .unwrap_or(PaletteIndex::Identifier)
    }
}

/// Language-bound colorizer with a pending dirty range.
#[derive(Debug, Clone)]
pub struct Colorizer {
    language: LanguageDefinition,
    rules: Vec<CompiledRule>,
    /// Half-open range of lines still to classify.
    dirty: Option<(usize, usize)>,
    check_comments: bool,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self {
            language: LanguageDefinition::default(),
            rules: Vec::new(),
            dirty: None,
            check_comments: false,
        }
    }
}

impl Colorizer {
    /// Compile the language's token rules.
    pub fn new(language: LanguageDefinition) -> Result<Self, LanguageError> {
        let rules = language
            .token_rules
            .iter()
            .map(|rule| {
                Regex::new(&format!("^(?:{})", rule.pattern))
                    .map(|regex| CompiledRule {
                        regex,
                        class: rule.class,
                    })
                    .map_err(|source| LanguageError::InvalidPattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| {
                tracing::warn!(%err, language = %language.name, "failed to compile token rule");
            })?;

        Ok(Self {
            language,
            rules,
            dirty: None,
            check_comments: false,
        })
    }

    /// The language being colorized.
    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }

    /// Lines classified per [`Colorizer::run_pass`].
    pub fn line_budget(&self) -> usize {
        if self.language.tokenize.is_some() {
            TOKENIZER_LINE_BUDGET
        } else {
            REGEX_LINE_BUDGET
        }
    }

    /// Mark `count` lines from `from` as stale (`None` means through the end), and schedule
    /// a comment rescan.
    pub fn invalidate(&mut self, from: usize, count: Option<usize>, line_count: usize) {
        let to = match count {
            Some(count) => from.saturating_add(count).min(line_count),
            None => line_count,
        };
        let (min, max) = match self.dirty {
            Some((min, max)) => (min.min(from), max.max(to)),
            None => (from, to),
        };
        self.dirty = Some((min, max.max(min)));
        self.check_comments = true;
    }

    /// Mark the whole document as stale.
    pub fn invalidate_all(&mut self, line_count: usize) {
        self.invalidate(0, None, line_count);
    }

    /// Pending line range, if any.
    pub fn dirty_range(&self) -> Option<(usize, usize)> {
        self.dirty.filter(|(min, max)| min < max)
    }

    /// Returns `true` if any phase still has work.
    pub fn has_pending_work(&self) -> bool {
        self.check_comments || self.dirty_range().is_some()
    }

    /// Forget pending work.
    pub fn reset(&mut self) {
        self.dirty = None;
        self.check_comments = false;
    }

    /// Run the comment scan if needed, then classify at most one budget of dirty lines.
    ///
    /// Returns `true` if dirty lines remain.
    pub fn run_pass(&mut self, document: &mut Document, symbols: &ProgramSymbols) -> bool {
        if self.check_comments {
            let flags = scan_comment_state(
                document.lines(),
                &self.language.comments,
                self.language.preproc_char,
            );
            apply_comment_state(document, &flags);
            self.check_comments = false;
        }

        let Some((min, max)) = self.dirty_range() else {
            self.dirty = None;
            return false;
        };

        let to = min.saturating_add(self.line_budget()).min(max);
        tracing::trace!(from = min, to, "colorizing lines");
        self.colorize_lines(document, symbols, min, to);

        if to >= max {
            self.dirty = None;
            false
        } else {
            self.dirty = Some((to, max));
            true
        }
    }

    /// Run passes until nothing is left.
    pub fn colorize_all(&mut self, document: &mut Document, symbols: &ProgramSymbols) {
        while self.run_pass(document, symbols) {}
    }

    fn next_token(&self, input: &[u8]) -> Option<Token> {
        if let Some(tokenize) = self.language.tokenize
            && let Some(token) = tokenize(input)
        {
            return Some(token);
        }
        self.rules.iter().find_map(|rule| {
            rule.regex.find(input).map(|m| Token {
                start: m.start(),
                end: m.end(),
                class: rule.class,
            })
        })
    }

    fn colorize_lines(
        &self,
        document: &mut Document,
        symbols: &ProgramSymbols,
        from: usize,
        to: usize,
    ) {
        let to = to.min(document.line_count());
        for line_index in from..to {
            let line = &mut document.lines_mut()[line_index];
            if line.is_empty() {
                continue;
            }

            let buffer: Vec<u8> = line.iter().map(|g| g.ch).collect();
            for glyph in line.iter_mut() {
                glyph.class = PaletteIndex::Default;
            }

            let mut first = 0;
            while first < buffer.len() {
                let rest = &buffer[first..];
                let token = self
                    .next_token(rest)
                    .filter(|t| t.start < t.end && t.end <= rest.len());
                let Some(token) = token else {
                    first += 1;
                    continue;
                };

                let mut class = token.class;
                if class == PaletteIndex::Identifier {
                    let identifier = String::from_utf8_lossy(&rest[token.start..token.end]);
                    class = classify_identifier(
                        &self.language,
                        symbols,
                        &identifier,
                        line_index,
                        line[first].preprocessor,
                    );
                }

                for glyph in &mut line[first + token.start..first + token.end] {
                    glyph.class = class;
                }
                first += token.end;
            }
        }
    }
}
