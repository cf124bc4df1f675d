use hashbrown::HashMap;

use crate::glyph::{ColorSelector, GlyphRecord, GlyphStyle, synthesize};
use crate::raster::GlyphRasterizer;

/// Printable ASCII plus curly single and double quotes.
pub fn default_characters() -> String {
    (' '..='~').chain(['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}']).collect()
}

/// Mapping from each configured character to its synthesized glyph.
///
/// A dictionary is never patched in place: any change to the font, colors or
/// coloring parameters produces a whole new dictionary through [`FontDictionary::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontDictionary {
    glyphs: HashMap<char, GlyphRecord>,
}

impl FontDictionary {
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    /// Synthesize every character in `characters` into a fresh dictionary.
    pub fn build(
        characters: &str,
        rasterizer: &dyn GlyphRasterizer,
        style: &GlyphStyle,
        selector: &dyn ColorSelector,
    ) -> Self {
        let mut glyphs = HashMap::with_capacity(characters.len());
        for ch in characters.chars() {
            glyphs.insert(ch, synthesize(ch, rasterizer, style, selector));
        }
        log::debug!("built font dictionary with {} glyphs", glyphs.len());
        Self { glyphs }
    }

    /// Replace this dictionary with a freshly built one. The new map is fully
    /// constructed before the old one is dropped.
    pub fn rebuild(
        &mut self,
        characters: &str,
        rasterizer: &dyn GlyphRasterizer,
        style: &GlyphStyle,
        selector: &dyn ColorSelector,
    ) {
        let fresh = Self::build(characters, rasterizer, style, selector);
        *self = fresh;
    }

    pub fn get(&self, ch: char) -> Option<&GlyphRecord> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn insert(&mut self, ch: char, glyph: GlyphRecord) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphRecord)> {
        self.glyphs.iter().map(|(ch, g)| (*ch, g))
    }

    /// First character of `text` that has no glyph, if any.
    pub fn first_missing(&self, text: &str) -> Option<char> {
        text.chars().find(|ch| !self.contains(*ch))
    }
}
