//! Color palettes and the glyph color lookup.
//!
//! Colors are packed `0xAABBGGRR` values, one per [`PaletteIndex`] entry.

use crate::buffer::Glyph;
use colortext_lang::PaletteIndex;

/// A full set of colors, indexed by [`PaletteIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [u32; PaletteIndex::COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    /// Build a palette from raw colors in [`PaletteIndex`] order.
    pub const fn from_colors(colors: [u32; PaletteIndex::COUNT]) -> Self {
        Self { colors }
    }

    /// Dark preset.
    pub const fn dark() -> Self {
        Self::from_colors([
            0xff7f7f7f, 0xffd69c56, 0xff00ff00, 0xff7070e0, 0xff70a0e0, 0xffffffff, 0xff408080,
            0xffaaaaaa, 0xff9bc64d, 0xffc040a0, 0xff206020, 0xff406020, 0xff101010, 0xffe0e0e0,
            0x80a06020, 0x800020ff, 0xff0000ff, 0xffffffff, 0xff1dd8ff, 0xff696969, 0xff707000,
            0x40000000, 0x40808080, 0x40a0a0a0, 0xff33ffff, 0xffffffff, 0xffaaaaaa, 0xffb0c94e,
            0xffaaaaaa, 0xffaaaaaa, 0xffaaaaaa, 0xff888888,
        ])
    }

    /// Light preset.
    pub const fn light() -> Self {
        Self::from_colors([
            0xff7f7f7f, 0xffff0c06, 0xff008000, 0xff2020a0, 0xff304070, 0xff000000, 0xff406060,
            0xff404040, 0xff606010, 0xffc040a0, 0xff205020, 0xff405020, 0xffffffff, 0xff000000,
            0x80dfbf80, 0xa00010ff, 0xff0000ff, 0xff000000, 0xff1dd8ff, 0xff696969, 0xff505000,
            0x20000000, 0x20808080, 0x30000000, 0xff3333ff, 0xffffffff, 0xff404040, 0xffb0912b,
            0xff404040, 0xff404040, 0xff404040, 0xff606060,
        ])
    }

    /// Blue-background retro preset.
    pub const fn retro_blue() -> Self {
        Self::from_colors([
            0xff00ffff, 0xffffff00, 0xff00ff00, 0xff808000, 0xff808000, 0xffffffff, 0xff008000,
            0xff00ffff, 0xffffffff, 0xffff00ff, 0xff808080, 0xff404040, 0xff800000, 0xff0080ff,
            0x80ffff00, 0xa00000ff, 0xff0000ff, 0xffffffff, 0xff1dd8ff, 0xff696969, 0xff808000,
            0x40000000, 0x40808080, 0x40000000, 0xffffff00, 0xffffffff, 0xff00ffff, 0xff00ffff,
            0xff00ffff, 0xff00ffff, 0xff00ffff, 0xff00ffff,
        ])
    }

    /// Color of one entry.
    pub fn get(&self, index: PaletteIndex) -> u32 {
        self.colors[index.index()]
    }

    /// Override one entry.
    pub fn set(&mut self, index: PaletteIndex, color: u32) {
        self.colors[index.index()] = color;
    }

    /// All colors in [`PaletteIndex`] order.
    pub fn colors(&self) -> &[u32; PaletteIndex::COUNT] {
        &self.colors
    }

    /// Display color of a glyph.
    ///
    /// Comment flags win over the token class; glyphs on a preprocessor line are averaged
    /// with the preprocessor color.
    pub fn glyph_color(&self, glyph: &Glyph, colorizer_enabled: bool) -> u32 {
        if !colorizer_enabled {
            return self.get(PaletteIndex::Default);
        }
        if glyph.comment {
            return self.get(PaletteIndex::Comment);
        }
        if glyph.multi_line_comment {
            return self.get(PaletteIndex::MultiLineComment);
        }
        let color = self.get(glyph.class);
        if glyph.preprocessor {
            average(color, self.get(PaletteIndex::Preprocessor))
        } else {
            color
        }
    }
}

/// Channel-wise average of two packed colors.
fn average(a: u32, b: u32) -> u32 {
    (0..4).fold(0, |acc, channel| {
        let shift = channel * 8;
        let mixed = (((a >> shift) & 0xff) + ((b >> shift) & 0xff)) / 2;
        acc | (mixed << shift)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ() {
        assert_ne!(Palette::dark(), Palette::light());
        assert_eq!(Palette::default(), Palette::dark());
        assert_eq!(Palette::dark().get(PaletteIndex::Keyword), 0xffd69c56);
        assert_eq!(Palette::retro_blue().get(PaletteIndex::Background), 0xff800000);
    }

    #[test]
    fn test_comment_flags_override_class() {
        let palette = Palette::dark();
        let mut glyph = Glyph::new(b'x', PaletteIndex::Keyword);
        glyph.multi_line_comment = true;
        assert_eq!(
            palette.glyph_color(&glyph, true),
            palette.get(PaletteIndex::MultiLineComment)
        );
        glyph.comment = true;
        assert_eq!(
            palette.glyph_color(&glyph, true),
            palette.get(PaletteIndex::Comment)
        );
        assert_eq!(
            palette.glyph_color(&glyph, false),
            palette.get(PaletteIndex::Default)
        );
    }

    #[test]
    fn test_preprocessor_blend() {
        let mut palette = Palette::dark();
        palette.set(PaletteIndex::Preprocessor, 0x00000000);
        palette.set(PaletteIndex::Identifier, 0xff80ff40);
        let mut glyph = Glyph::new(b'x', PaletteIndex::Identifier);
        glyph.preprocessor = true;
        assert_eq!(palette.glyph_color(&glyph, true), 0x7f407f20);
    }
}
