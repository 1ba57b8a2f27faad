//! Editor configuration.

use crate::coords::{DEFAULT_TAB_WIDTH, MAX_TAB_WIDTH};
use crate::palette::Palette;

/// What the tab key inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabKeyBehavior {
    /// A literal `\t`.
    #[default]
    Tab,
    /// Spaces up to the next tab stop.
    Spaces,
}

/// Behavioral switches of a [`crate::TextEditor`].
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Tab width in columns (`1..=32`).
    pub tab_size: usize,
    /// Insert spaces instead of tab characters.
    pub insert_spaces: bool,
    /// Adjust indentation around braces when splitting lines.
    pub smart_indent: bool,
    /// Re-indent pasted text to the current line.
    pub auto_indent_on_paste: bool,
    /// Auto-close `{`, `(` and `[`.
    pub complete_braces: bool,
    /// Enable the suggestion list.
    pub autocomplete: bool,
    /// Rebuild suggestions on every identifier keystroke.
    pub active_autocomplete: bool,
    /// Classify glyphs at all.
    pub colorizer_enabled: bool,
    /// Colors used by [`crate::TextEditor::glyph_color`].
    pub palette: Palette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_WIDTH,
            insert_spaces: false,
            smart_indent: true,
            auto_indent_on_paste: false,
            complete_braces: false,
            autocomplete: true,
            active_autocomplete: false,
            colorizer_enabled: true,
            palette: Palette::dark(),
        }
    }
}

impl EditorConfig {
    /// Set the tab width, clamped to `1..=32`.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.clamp(1, MAX_TAB_WIDTH);
        self
    }

    /// Insert spaces instead of tabs.
    pub fn with_insert_spaces(mut self, insert_spaces: bool) -> Self {
        self.insert_spaces = insert_spaces;
        self
    }

    /// Toggle brace-aware indentation.
    pub fn with_smart_indent(mut self, smart_indent: bool) -> Self {
        self.smart_indent = smart_indent;
        self
    }

    /// Toggle re-indenting of pasted text.
    pub fn with_auto_indent_on_paste(mut self, enabled: bool) -> Self {
        self.auto_indent_on_paste = enabled;
        self
    }

    /// Toggle auto-closing brackets.
    pub fn with_complete_braces(mut self, enabled: bool) -> Self {
        self.complete_braces = enabled;
        self
    }

    /// Toggle the suggestion list.
    pub fn with_autocomplete(mut self, enabled: bool) -> Self {
        self.autocomplete = enabled;
        self
    }

    /// Toggle suggestions while typing.
    pub fn with_active_autocomplete(mut self, enabled: bool) -> Self {
        self.active_autocomplete = enabled;
        self
    }

    /// Toggle syntax coloring.
    pub fn with_colorizer(mut self, enabled: bool) -> Self {
        self.colorizer_enabled = enabled;
        self
    }

    /// Use another palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// What the tab key inserts under this configuration.
    pub fn tab_key_behavior(&self) -> TabKeyBehavior {
        if self.insert_spaces {
            TabKeyBehavior::Spaces
        } else {
            TabKeyBehavior::Tab
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_size, 4);
        assert!(config.smart_indent);
        assert!(!config.complete_braces);
        assert_eq!(config.tab_key_behavior(), TabKeyBehavior::Tab);
    }

    #[test]
    fn test_builders_clamp_tab_size() {
        let config = EditorConfig::default().with_tab_size(0).with_insert_spaces(true);
        assert_eq!(config.tab_size, 1);
        assert_eq!(config.tab_key_behavior(), TabKeyBehavior::Spaces);
        assert_eq!(EditorConfig::default().with_tab_size(99).tab_size, 32);
    }
}
