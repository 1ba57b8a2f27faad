//! Snippet tab stops.
//!
//! An expansion such as `foo({$1:bar}, {$1})` embeds tab stops written `{$<id>[:<placeholder>]}`.
//! [`parse_snippet`] strips the markers and reports where each tag landed; a
//! [`SnippetSession`] then tracks the tags while the user edits them, moving through
//! `Inactive -> ActiveTag(id) -> Inactive`.

use crate::coords::Coordinates;
use std::collections::BTreeMap;

/// A tag found by [`parse_snippet`], in byte offsets of the expanded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTag {
    /// Tab stop id.
    pub id: u32,
    /// Line of the expanded text the tag is on (0 = the insertion line).
    pub line_offset: usize,
    /// Start byte within that line of the expanded text.
    pub start_byte: usize,
    /// End byte within that line of the expanded text.
    pub end_byte: usize,
    /// `true` for the first occurrence of the id, which defines its text.
    pub highlighted: bool,
}

/// A tag as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetTag {
    /// Tab stop id.
    pub id: u32,
    /// Start of the tag text.
    pub start: Coordinates,
    /// End of the tag text.
    pub end: Coordinates,
    /// `true` for the defining occurrence.
    pub highlighted: bool,
}

/// Parse `{$<id>}` at the start of `input`: `(id, placeholder, marker length)`.
///
/// Anything malformed, including a line break before the closing brace, is not a marker.
fn parse_marker(input: &str) -> Option<(u32, &str, usize)> {
    let rest = input.strip_prefix("{$")?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let id = rest[..digits].parse().ok()?;
    let after = &rest[digits..];

    if after.starts_with('}') {
        return Some((id, "", 2 + digits + 1));
    }
    let body = after.strip_prefix(':')?;
    let close = body.find(['}', '\n'])?;
    if body.as_bytes()[close] != b'}' {
        return None;
    }
    Some((id, &body[..close], 2 + digits + 1 + close + 1))
}

/// Expand tab-stop markers.
///
/// Each marker is replaced by its placeholder. The first occurrence of an id defines the
/// text, a single space when it has no placeholder; later occurrences reuse it and are not
/// highlighted.
pub fn parse_snippet(text: &str) -> (String, Vec<ParsedTag>) {
    let mut out = String::with_capacity(text.len());
    let mut tags = Vec::new();
    let mut placeholders: BTreeMap<u32, String> = BTreeMap::new();
    let mut line_offset = 0;
    let mut line_start = 0;

    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some((id, placeholder, len)) = parse_marker(rest) {
            let highlighted = !placeholders.contains_key(&id);
            let resolved = placeholders.entry(id).or_insert_with(|| match placeholder {
                "" => " ".to_string(),
                text => text.to_string(),
            });
            let start_byte = out.len() - line_start;
            out.push_str(resolved);
            tags.push(ParsedTag {
                id,
                line_offset,
                start_byte,
                end_byte: start_byte + resolved.len(),
                highlighted,
            });
            rest = &rest[len..];
            continue;
        }

        out.push(ch);
        if ch == '\n' {
            line_offset += 1;
            line_start = out.len();
        }
        rest = &rest[ch.len_utf8()..];
    }

    (out, tags)
}

/// A tag in document byte coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TagSpan {
    pub id: u32,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub highlighted: bool,
}

/// Snippet session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetState {
    /// No snippet is being edited.
    #[default]
    Inactive,
    /// The highlighted tag with this id is being edited.
    ActiveTag(u32),
}

/// The live tags of an inserted snippet.
#[derive(Debug, Clone, Default)]
pub(crate) struct SnippetSession {
    state: SnippetState,
    tags: Vec<TagSpan>,
}

impl SnippetSession {
    pub fn state(&self) -> SnippetState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SnippetState::Inactive
    }

    pub fn tags(&self) -> &[TagSpan] {
        &self.tags
    }

    /// Begin editing `tags`, focusing the lowest highlighted id.
    pub fn start(&mut self, tags: Vec<TagSpan>) -> Option<TagSpan> {
        self.tags = tags;
        let first = self
            .tags
            .iter()
            .filter(|t| t.highlighted)
            .min_by_key(|t| t.id)
            .copied();
        self.state = match first {
            Some(tag) => SnippetState::ActiveTag(tag.id),
            None => {
                self.tags.clear();
                SnippetState::Inactive
            }
        };
        if let Some(tag) = first {
            tracing::debug!(id = tag.id, tags = self.tags.len(), "snippet session started");
        }
        first
    }

    pub fn end(&mut self) {
        if self.is_active() {
            tracing::debug!("snippet session ended");
        }
        self.state = SnippetState::Inactive;
        self.tags.clear();
    }

    fn active_index(&self) -> Option<usize> {
        let SnippetState::ActiveTag(id) = self.state else {
            return None;
        };
        self.tags.iter().position(|t| t.highlighted && t.id == id)
    }

    pub fn active_tag(&self) -> Option<TagSpan> {
        self.active_index().map(|i| self.tags[i])
    }

    /// Focus the highlighted tag with the next larger id, wrapping to the smallest.
    pub fn advance(&mut self) -> Option<TagSpan> {
        let SnippetState::ActiveTag(current) = self.state else {
            return None;
        };
        let highlighted = || self.tags.iter().filter(|t| t.highlighted);
        let next = highlighted()
            .filter(|t| t.id > current)
            .min_by_key(|t| t.id)
            .or_else(|| highlighted().min_by_key(|t| t.id))
            .copied()?;
        self.state = SnippetState::ActiveTag(next.id);
        tracing::debug!(id = next.id, "snippet tag focused");
        Some(next)
    }

    /// Shift every tag on `line` by `delta` bytes. Used when indentation is inserted at the
    /// start of a freshly created line.
    pub fn shift_line(&mut self, line: usize, delta: usize) {
        for tag in self.tags.iter_mut().filter(|t| t.line == line) {
            tag.start += delta;
            tag.end += delta;
        }
    }

    /// Returns `true` if replacing `from..to` on `line` stays inside the active tag.
    pub fn edit_in_active(&self, line: usize, from: usize, to: usize) -> bool {
        self.active_tag()
            .is_some_and(|t| t.line == line && t.start <= from && to <= t.end)
    }

    /// Account for `removed` bytes replaced by `inserted` bytes inside the tag at `index`.
    fn resize(&mut self, index: usize, removed: usize, inserted: usize) {
        let resized = self.tags[index];
        for (i, tag) in self.tags.iter_mut().enumerate() {
            if i == index {
                tag.end = tag.end + inserted - removed;
            } else if tag.line == resized.line
                && (tag.start > resized.start || (tag.start == resized.start && i > index))
            {
                tag.start = tag.start + inserted - removed;
                tag.end = tag.end + inserted - removed;
            }
        }
    }

    /// The active tag had `removed` bytes replaced by `inserted` bytes.
    pub fn resize_active(&mut self, removed: usize, inserted: usize) {
        if let Some(index) = self.active_index() {
            self.resize(index, removed, inserted);
        }
    }

    /// Indices of tags linked to the active one, in document order.
    pub fn linked_indices(&self) -> Vec<usize> {
        let Some(active) = self.active_index() else {
            return Vec::new();
        };
        let id = self.tags[active].id;
        (0..self.tags.len())
            .filter(|&i| i != active && self.tags[i].id == id)
            .collect()
    }

    pub fn tag(&self, index: usize) -> TagSpan {
        self.tags[index]
    }

    /// The tag at `index` now holds `len` bytes.
    pub fn set_tag_len(&mut self, index: usize, len: usize) {
        let old = self.tags[index].end - self.tags[index].start;
        self.resize(index, old, len);
    }
}
