//! Glyph rasterizer capability.
//!
//! The synthesizer only needs two things from a font: the ink bounding box of
//! a character relative to its left-baseline origin, and the ability to draw
//! that character's coverage into a greyscale buffer. [`FontdueRasterizer`]
//! provides both on top of `fontdue`; [`BoxRasterizer`] is a table-driven
//! stand-in that draws solid blocks.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use image::{GrayImage, Luma};

use crate::error::{GlyphError, Result};

/// Glyph bounding box in baseline-relative pixels (baseline = 0, y grows downward).
///
/// The box covers the glyph's ink together with its pen origin and advance,
/// so `width()` is how far the pen moves past the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Grow a degenerate box so it covers at least one pixel in each dimension.
    pub fn at_least_one_pixel(mut self) -> Self {
        if self.top == self.bottom {
            self.bottom += 1;
        }
        if self.left == self.right {
            self.right += 1;
        }
        self
    }
}

/// Rasterizer interface. Implementations resolve characters against a single
/// font at a fixed pixel size.
pub trait GlyphRasterizer {
    /// Bounding box of `ch` anchored at its left-baseline origin.
    fn ink_box(&self, ch: char) -> InkBox;

    /// Draw the coverage of `ch` into `mask` so that the top-left of its
    /// bounding box lands at `origin`. Coverage outside `mask` is clipped.
    fn draw(&self, ch: char, mask: &mut GrayImage, origin: (i32, i32));
}

/// Where a font comes from: a file on disk or a system family name.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    Path(PathBuf),
    Family(String),
}

/// A font request: source plus pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    pub source: FontSource,
    pub size: f32,
}

impl FontHandle {
    pub fn path(path: impl Into<PathBuf>, size: f32) -> Self {
        Self {
            source: FontSource::Path(path.into()),
            size,
        }
    }

    pub fn family(name: impl Into<String>, size: f32) -> Self {
        Self {
            source: FontSource::Family(name.into()),
            size,
        }
    }

    /// Load the font described by this handle.
    pub fn open(&self) -> Result<FontdueRasterizer> {
        match &self.source {
            FontSource::Path(path) => FontdueRasterizer::from_path(path, self.size),
            FontSource::Family(name) => FontdueRasterizer::from_system_family(name, self.size),
        }
    }
}

/// `fontdue`-backed rasterizer at a fixed pixel size.
pub struct FontdueRasterizer {
    font: fontdue::Font,
    px: f32,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        Self::from_collection_bytes(bytes, 0, px)
    }

    fn from_collection_bytes(bytes: &[u8], index: u32, px: f32) -> Result<Self> {
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|e| GlyphError::InvalidFont(e.to_string()))?;
        Ok(Self {
            font,
            px: px.max(1.0),
        })
    }

    pub fn from_path(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {:?} at {px}px", path.as_ref());
        Self::from_bytes(&data, px)
    }

    /// Resolve a family name through the system font database.
    pub fn from_system_family(name: &str, px: f32) -> Result<Self> {
        use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};

        let mut db = Database::new();
        db.load_system_fonts();

        let id = db
            .query(&Query {
                families: &[Family::Name(name)],
                weight: Weight::NORMAL,
                stretch: Stretch::Normal,
                style: Style::Normal,
            })
            .ok_or_else(|| GlyphError::FontNotFound(name.to_string()))?;

        let face = db
            .face(id)
            .ok_or_else(|| GlyphError::FontNotFound(name.to_string()))?;

        let bytes: Vec<u8> = match &face.source {
            Source::File(path) => std::fs::read(path)?,
            Source::Binary(data) => data.as_ref().as_ref().to_vec(),
            Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
        };

        log::debug!("resolved system family {name:?} to face index {}", face.index);
        Self::from_collection_bytes(&bytes, face.index, px)
    }

    pub fn size(&self) -> f32 {
        self.px
    }
}

impl FontdueRasterizer {
    /// Bounding box of the bitmap alone, baseline-relative.
    fn bitmap_box(m: &fontdue::Metrics) -> InkBox {
        // fontdue reports ymin as the offset of the bitmap bottom above the baseline.
        let bottom = -m.ymin;
        InkBox::new(m.xmin, bottom - m.height as i32, m.xmin + m.width as i32, bottom)
    }

    /// The bitmap box grown to cover the pen origin on the baseline and the
    /// advance, so a glyph's width is its advance plus any overhang.
    fn layout_box(m: &fontdue::Metrics) -> InkBox {
        let ink = Self::bitmap_box(m);
        InkBox::new(
            ink.left.min(0),
            ink.top.min(0),
            ink.right.max(m.advance_width.round() as i32),
            ink.bottom.max(0),
        )
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn ink_box(&self, ch: char) -> InkBox {
        Self::layout_box(&self.font.metrics(ch, self.px))
    }

    fn draw(&self, ch: char, mask: &mut GrayImage, origin: (i32, i32)) {
        let (metrics, bitmap) = self.font.rasterize(ch, self.px);
        let ink = Self::bitmap_box(&metrics);
        let layout = Self::layout_box(&metrics);
        let at = (origin.0 + ink.left - layout.left, origin.1 + ink.top - layout.top);
        blit_coverage(mask, &bitmap, metrics.width, metrics.height, at);
    }
}

/// Rasterizer that draws every character as a solid block filling its ink box.
///
/// Characters missing from the table fall back to `missing`, the way a font
/// falls back to its notdef glyph.
#[derive(Debug, Clone, Default)]
pub struct BoxRasterizer {
    boxes: HashMap<char, InkBox>,
    missing: InkBox,
}

impl BoxRasterizer {
    pub fn new(missing: InkBox) -> Self {
        Self {
            boxes: HashMap::new(),
            missing,
        }
    }

    pub fn with_glyph(mut self, ch: char, ink: InkBox) -> Self {
        self.boxes.insert(ch, ink);
        self
    }
}

impl GlyphRasterizer for BoxRasterizer {
    fn ink_box(&self, ch: char) -> InkBox {
        self.boxes.get(&ch).copied().unwrap_or(self.missing)
    }

    fn draw(&self, ch: char, mask: &mut GrayImage, origin: (i32, i32)) {
        let ink = self.ink_box(ch);
        let (w, h) = (ink.width().max(0) as usize, ink.height().max(0) as usize);
        let solid = vec![255u8; w * h];
        blit_coverage(mask, &solid, w, h, origin);
    }
}

/// Copy a row-major coverage bitmap into `mask` at `origin`, clipping to bounds.
pub(crate) fn blit_coverage(
    mask: &mut GrayImage,
    coverage: &[u8],
    width: usize,
    height: usize,
    origin: (i32, i32),
) {
    let (mw, mh) = (mask.width() as i32, mask.height() as i32);
    for row in 0..height {
        let y = origin.1 + row as i32;
        if y < 0 || y >= mh {
            continue;
        }
        for col in 0..width {
            let x = origin.0 + col as i32;
            if x < 0 || x >= mw {
                continue;
            }
            let value = coverage[row * width + col];
            mask.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
}
