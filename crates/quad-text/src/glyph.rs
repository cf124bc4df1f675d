//! Quadrant-colored glyph synthesis.

use image::{GrayImage, Rgb, RgbImage};

use crate::raster::GlyphRasterizer;

/// The vertical divide sits `x_height / X_HEIGHT_DIVISOR` above the baseline.
pub const X_HEIGHT_DIVISOR: i32 = 2;

/// Colors of the four quadrants of a colored glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantColors {
    pub upper_left: Rgb<u8>,
    pub upper_right: Rgb<u8>,
    pub lower_left: Rgb<u8>,
    pub lower_right: Rgb<u8>,
}

impl Default for QuadrantColors {
    fn default() -> Self {
        Self {
            upper_left: Rgb([255, 0, 0]),
            upper_right: Rgb([0, 0, 255]),
            lower_left: Rgb([128, 0, 128]),
            lower_right: Rgb([130, 130, 131]),
        }
    }
}

/// Everything about a glyph's appearance except which characters get colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub quadrants: QuadrantColors,
    /// Color of characters the selector leaves uncolored.
    pub non_colored: Rgb<u8>,
    /// Fill for the ascender cut applied when "d" stands in for "a".
    pub truncate_fill: Rgb<u8>,
    /// When set, "a" is drawn as a "d" cut off at this character's top.
    pub substitute_height: Option<char>,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            quadrants: QuadrantColors::default(),
            non_colored: Rgb([0, 0, 0]),
            truncate_fill: Rgb([255, 255, 255]),
            substitute_height: None,
        }
    }
}

/// Decides whether a character is split into colored quadrants.
pub trait ColorSelector {
    fn should_color(&self, ch: char) -> bool;
}

impl<F: Fn(char) -> bool> ColorSelector for F {
    fn should_color(&self, ch: char) -> bool {
        self(ch)
    }
}

/// A synthesized character: coverage mask, colored fill and baseline metrics.
///
/// `mask` and `quadrants` always share the same dimensions, at least 1x1.
/// Vertical coordinates are relative to the baseline with y growing downward.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub mask: GrayImage,
    pub quadrants: RgbImage,
    pub x_divide: i32,
    pub y_divide: i32,
    pub width: i32,
    pub top_coord: i32,
    pub bottom_coord: i32,
}

impl GlyphRecord {
    pub fn dimensions(&self) -> (u32, u32) {
        self.quadrants.dimensions()
    }
}

/// Build the colored glyph for `ch`.
pub fn synthesize(
    ch: char,
    rasterizer: &dyn GlyphRasterizer,
    style: &GlyphStyle,
    selector: &dyn ColorSelector,
) -> GlyphRecord {
    let substitute = if ch == 'a' { style.substitute_height } else { None };
    let drawn = if substitute.is_some() { 'd' } else { ch };

    let ink = rasterizer.ink_box(drawn).at_least_one_pixel();
    let w = ink.width().max(1) as u32;
    let h = ink.height().max(1) as u32;

    let mut mask = GrayImage::new(w, h);
    rasterizer.draw(drawn, &mut mask, (0, 0));

    let mut quadrants = RgbImage::from_pixel(w, h, style.non_colored);

    let reference = if ch.is_uppercase() { 'X' } else { 'x' };
    let x_height = rasterizer.ink_box(reference).height();
    let x_divide = (ink.left + ink.right).div_euclid(2);
    let y_divide = (-x_height).div_euclid(X_HEIGHT_DIVISOR);

    if selector.should_color(ch) {
        let split_x = (x_divide - ink.left).clamp(0, w as i32) as u32;
        let split_y = (y_divide - ink.top).clamp(0, h as i32) as u32;
        paint_quadrants(&mut quadrants, split_x, split_y, &style.quadrants);

        if let Some(height_char) = substitute {
            let midline = rasterizer.ink_box(height_char).top;
            let last_row = midline - ink.top;
            if last_row >= 0 {
                let rows = (last_row as u32 + 1).min(h);
                for y in 0..rows {
                    for x in 0..w {
                        quadrants.put_pixel(x, y, style.truncate_fill);
                    }
                }
            }
        }
    }

    GlyphRecord {
        mask,
        quadrants,
        x_divide,
        y_divide,
        width: ink.width(),
        top_coord: ink.top,
        bottom_coord: ink.bottom,
    }
}

// The divide column and row belong to the right and lower quadrants.
fn paint_quadrants(buf: &mut RgbImage, split_x: u32, split_y: u32, colors: &QuadrantColors) {
    for (x, y, px) in buf.enumerate_pixels_mut() {
        *px = match (x >= split_x, y >= split_y) {
            (false, false) => colors.upper_left,
            (true, false) => colors.upper_right,
            (false, true) => colors.lower_left,
            (true, true) => colors.lower_right,
        };
    }
}
