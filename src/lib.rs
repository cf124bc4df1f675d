//! quadcolor: text rendered with letters split into four colored quadrants.
//!
//! [`Quadcolor`] owns the font, colors and coloring parameters, and the font
//! dictionary derived from them. Changing any of those marks the dictionary
//! stale; it is rebuilt before the next read.
//!
//! No font ships with the crate. A session starts with an empty dictionary
//! until a font is set or a saved snapshot is loaded, either directly with
//! [`Quadcolor::from_snapshot`] or through the `[font] snapshot` setting.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use quad_config::{ConfigError, PatternSelector, QuadConfig};
use quad_surface::{LayoutError, Margins, PageBuilder, Separator, SurfaceError};
use quad_text::{
    ColorSelector, FontDictionary, FontHandle, GlyphError, GlyphRasterizer, GlyphStyle,
    Measurements, default_characters, load_snapshot,
};
use thiserror::Error;

pub use quad_config;
pub use quad_surface;
pub use quad_text;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Colors and coloring parameters can only change once a font is set.
    #[error("no font has been set; call set_font first")]
    FontNotSet,

    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Surface(e.into())
    }
}

/// Partial color change; `None` leaves a color as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorUpdate {
    pub upper_left: Option<Rgb<u8>>,
    pub upper_right: Option<Rgb<u8>>,
    pub lower_left: Option<Rgb<u8>>,
    pub lower_right: Option<Rgb<u8>>,
    pub non_colored: Option<Rgb<u8>>,
}

/// Partial coloring-parameter change; `None` leaves a parameter as it is.
#[derive(Default)]
pub struct ParameterUpdate {
    pub characters: Option<String>,
    /// `Some(None)` turns the "a" substitution off.
    pub substitute_height: Option<Option<char>>,
    pub selector: Option<Box<dyn ColorSelector>>,
}

impl ParameterUpdate {
    /// Color characters matching a regular expression.
    pub fn color_pattern(mut self, pattern: &str) -> Result<Self> {
        self.selector = Some(Box::new(PatternSelector::new(pattern)?));
        Ok(self)
    }
}

pub struct Quadcolor {
    font: Option<Box<dyn GlyphRasterizer>>,
    style: GlyphStyle,
    selector: Box<dyn ColorSelector>,
    characters: String,
    dictionary: FontDictionary,
    stale: bool,
}

impl Default for Quadcolor {
    fn default() -> Self {
        Self::new()
    }
}

impl Quadcolor {
    /// A session with no font and an empty dictionary. Nothing can be drawn
    /// until a font is set.
    pub fn new() -> Self {
        Self {
            font: None,
            style: GlyphStyle::default(),
            selector: Box::new(|ch: char| ch.is_ascii_lowercase()),
            characters: default_characters(),
            dictionary: FontDictionary::new(),
            stale: false,
        }
    }

    /// A session whose dictionary comes from a saved snapshot. No font is set.
    pub fn from_snapshot(dir: impl AsRef<Path>) -> Result<Self> {
        let dictionary = load_snapshot(dir)?;
        let characters = dictionary.iter().map(|(ch, _)| ch).collect();
        Ok(Self {
            dictionary,
            characters,
            ..Self::new()
        })
    }

    /// Build a session from configuration. The configured font wins; without
    /// one, the configured snapshot provides the dictionary.
    pub fn from_config(config: &QuadConfig) -> Result<Self> {
        let handle = config.font_handle();
        let mut session = match (&handle, &config.font.snapshot) {
            (None, Some(dir)) => Self::from_snapshot(dir)?,
            _ => Self {
                characters: config.characters(),
                ..Self::new()
            },
        };
        session.style = config.glyph_style();
        session.selector = Box::new(config.selector()?);
        if let Some(handle) = handle {
            session.set_font_handle(&handle)?;
        }
        Ok(session)
    }

    pub fn set_font(&mut self, rasterizer: impl GlyphRasterizer + 'static) {
        self.font = Some(Box::new(rasterizer));
        self.rebuild();
    }

    pub fn set_font_handle(&mut self, handle: &FontHandle) -> Result<()> {
        let rasterizer = handle.open()?;
        log::info!("using font {:?} at {}px", handle.source, handle.size);
        self.set_font(rasterizer);
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn characters(&self) -> &str {
        &self.characters
    }

    pub fn set_colors(&mut self, update: ColorUpdate) -> Result<()> {
        if self.font.is_none() {
            return Err(Error::FontNotSet);
        }
        let q = &mut self.style.quadrants;
        q.upper_left = update.upper_left.unwrap_or(q.upper_left);
        q.upper_right = update.upper_right.unwrap_or(q.upper_right);
        q.lower_left = update.lower_left.unwrap_or(q.lower_left);
        q.lower_right = update.lower_right.unwrap_or(q.lower_right);
        self.style.non_colored = update.non_colored.unwrap_or(self.style.non_colored);
        self.stale = true;
        Ok(())
    }

    pub fn set_parameters(&mut self, update: ParameterUpdate) -> Result<()> {
        if self.font.is_none() {
            return Err(Error::FontNotSet);
        }
        if let Some(characters) = update.characters {
            self.characters = characters;
        }
        if let Some(substitute) = update.substitute_height {
            self.style.substitute_height = substitute;
        }
        if let Some(selector) = update.selector {
            self.selector = selector;
        }
        self.stale = true;
        Ok(())
    }

    /// Rebuild the dictionary from the current font and parameters.
    /// Without a font this is a no-op.
    pub fn rebuild(&mut self) {
        let Some(font) = self.font.as_deref() else {
            log::warn!("rebuild requested before a font was set");
            return;
        };
        self.dictionary
            .rebuild(&self.characters, font, &self.style, self.selector.as_ref());
        self.stale = false;
    }

    /// The current dictionary, rebuilt first if parameters changed.
    pub fn dictionary(&mut self) -> &FontDictionary {
        if self.stale {
            self.rebuild();
        }
        &self.dictionary
    }

    pub fn measure<S: AsRef<str>>(&mut self, strings: &[S]) -> Measurements {
        quad_text::measure(strings, self.dictionary())
    }

    /// Smallest card size that fits every string.
    pub fn flashcard_size<S: AsRef<str>>(&mut self, strings: &[S]) -> (i32, i32) {
        quad_text::flashcard_size(strings, self.dictionary())
    }

    /// One image per string, each sized to its text plus margins.
    pub fn make_graphics<S: AsRef<str>>(
        &mut self,
        strings: &[S],
        margins: Margins,
        background: Rgb<u8>,
    ) -> Result<Vec<RgbImage>> {
        let builder = PageBuilder::default().margins(margins).background(background);
        Ok(builder.build(strings, self.dictionary())?)
    }

    /// Lay strings out on pages as described by `builder`.
    pub fn make_flashcards<S: AsRef<str>>(
        &mut self,
        strings: &[S],
        builder: &PageBuilder,
    ) -> Result<Vec<RgbImage>> {
        Ok(builder.build(strings, self.dictionary())?)
    }

    pub fn save_snapshot(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        quad_text::save_snapshot(self.dictionary(), dir)?;
        Ok(())
    }
}

/// Page setup from the `[layout]` and `[colors]` configuration sections.
pub fn page_builder(config: &QuadConfig) -> PageBuilder {
    let layout = &config.layout;
    let [left, top, right, bottom] = layout.margins;
    let separator = config
        .colors
        .separator
        .map(|color| Separator {
            color: Rgb(color),
            width: layout.separator_width,
        });
    PageBuilder::grid(layout.rows, layout.columns)
        .page_size(layout.page_width, layout.page_height)
        .margins(Margins::new(left, top, right, bottom))
        .background(Rgb(config.colors.background))
        .separator(separator)
}

pub fn save_images(
    images: &[RgbImage],
    path: impl AsRef<Path>,
    single_file: bool,
    dpi: u32,
) -> Result<Vec<PathBuf>> {
    Ok(quad_surface::save_images(images, path, single_file, dpi)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quad_text::{BoxRasterizer, InkBox};

    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

    fn blocks() -> BoxRasterizer {
        BoxRasterizer::new(InkBox::new(0, -10, 6, 0))
            .with_glyph('x', InkBox::new(0, -6, 6, 0))
            .with_glyph('o', InkBox::new(0, -6, 6, 0))
            .with_glyph(' ', InkBox::new(0, 0, 3, 0))
    }

    #[test]
    fn changes_before_a_font_are_rejected() {
        let mut session = Quadcolor::new();
        assert!(matches!(
            session.set_colors(ColorUpdate::default()),
            Err(Error::FontNotSet)
        ));
        assert!(matches!(
            session.set_parameters(ParameterUpdate::default()),
            Err(Error::FontNotSet)
        ));
        assert!(session.dictionary().is_empty());
    }

    #[test]
    fn setting_a_font_builds_the_default_characters() {
        let mut session = Quadcolor::new();
        session.set_font(blocks());
        assert_eq!(session.dictionary().len(), default_characters().chars().count());
    }

    #[test]
    fn color_changes_apply_on_next_read() {
        let mut session = Quadcolor::new();
        session.set_font(blocks());
        session
            .set_colors(ColorUpdate {
                upper_left: Some(GREEN),
                ..ColorUpdate::default()
            })
            .unwrap();
        let a = session.dictionary().get('a').unwrap();
        assert_eq!(*a.quadrants.get_pixel(0, 0), GREEN);
        assert_eq!(session.style().quadrants.upper_right, Rgb([0, 0, 255]));
    }

    #[test]
    fn parameter_changes_replace_the_dictionary() {
        let mut session = Quadcolor::new();
        session.set_font(blocks());
        let update = ParameterUpdate {
            characters: Some("ax".into()),
            ..ParameterUpdate::default()
        }
        .color_pattern("x")
        .unwrap();
        session.set_parameters(update).unwrap();

        let dict = session.dictionary();
        assert_eq!(dict.len(), 2);
        assert!(!dict.contains('b'));
        // 'a' no longer matches, so it is painted in the non-color
        assert_eq!(*dict.get('a').unwrap().quadrants.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = ParameterUpdate::default().color_pattern("(").err();
        assert!(matches!(err, Some(Error::Config(ConfigError::Pattern(_)))));
    }

    #[test]
    fn configured_snapshot_stands_in_for_a_font() {
        let mut source = Quadcolor::new();
        source.set_font(blocks());
        let dir = tempfile::tempdir().unwrap();
        source.save_snapshot(dir.path()).unwrap();

        let mut config = QuadConfig::default();
        config.font.snapshot = Some(dir.path().to_path_buf());
        let mut session = Quadcolor::from_config(&config).unwrap();
        assert!(!session.has_font());
        assert_eq!(session.dictionary(), source.dictionary());
        assert!(matches!(
            session.set_colors(ColorUpdate::default()),
            Err(Error::FontNotSet)
        ));
    }

    #[test]
    fn page_builder_follows_config() {
        let mut config = QuadConfig::default();
        config.layout.rows = 2;
        config.layout.columns = 3;
        config.layout.margins = [1, 2, 3, 4];
        config.colors.separator = Some([9, 9, 9]);
        let builder = page_builder(&config);
        assert_eq!((builder.rows, builder.columns), (2, 3));
        assert_eq!(builder.margins, Margins::new(1, 2, 3, 4));
        assert_eq!(
            builder.separator,
            Some(Separator {
                color: Rgb([9, 9, 9]),
                width: 1
            })
        );
    }
}
