//! Compositing strings of colored glyphs onto an RGB canvas.

use image::{GrayImage, Rgb, RgbImage};

use crate::dictionary::FontDictionary;
use crate::error::{GlyphError, Result};

/// Placement options for [`compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Center the string horizontally on the anchor instead of starting at it.
    pub h_centered: bool,
    /// Shift the baseline down by half the height of "x" when available.
    pub v_centered: bool,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            h_centered: true,
            v_centered: true,
            x_offset: 0,
            y_offset: 0,
        }
    }
}

impl Placement {
    pub fn left_aligned() -> Self {
        Self {
            h_centered: false,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, x_offset: i32, y_offset: i32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }
}

/// Draw `text` onto `canvas` with its baseline at `anchor.1`.
///
/// Every character is checked against the dictionary before any pixel is
/// written, so a failed call leaves the canvas untouched.
pub fn compose<'c>(
    text: &str,
    canvas: &'c mut RgbImage,
    anchor: (i32, i32),
    placement: Placement,
    dictionary: &FontDictionary,
) -> Result<&'c mut RgbImage> {
    let mut width = 0;
    for ch in text.chars() {
        let glyph = dictionary.get(ch).ok_or(GlyphError::OutOfFont(ch))?;
        width += glyph.width;
    }

    let y_shift = match dictionary.get('x') {
        Some(x) if placement.v_centered => x.quadrants.height() as i32 / 2,
        _ => 0,
    };

    let mut cursor = if placement.h_centered {
        anchor.0 - width.div_euclid(2)
    } else {
        anchor.0
    };

    for ch in text.chars() {
        let Some(glyph) = dictionary.get(ch) else {
            continue;
        };
        let origin = (
            cursor + placement.x_offset,
            anchor.1 + glyph.top_coord + y_shift + placement.y_offset,
        );
        paste_masked(canvas, &glyph.quadrants, &glyph.mask, origin);
        cursor += glyph.width;
    }
    Ok(canvas)
}

/// Blend `src` onto `dst` at `origin`, weighting each pixel by `mask`.
pub fn paste_masked(dst: &mut RgbImage, src: &RgbImage, mask: &GrayImage, origin: (i32, i32)) {
    let (dw, dh) = (dst.width() as i32, dst.height() as i32);
    for (x, y, px) in src.enumerate_pixels() {
        let weight = mask.get_pixel(x, y).0[0];
        if weight == 0 {
            continue;
        }
        let tx = origin.0 + x as i32;
        let ty = origin.1 + y as i32;
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let under = dst.get_pixel_mut(tx as u32, ty as u32);
        *under = blend(*under, *px, weight);
    }
}

fn blend(under: Rgb<u8>, over: Rgb<u8>, weight: u8) -> Rgb<u8> {
    let w = weight as u32;
    let mix = |a: u8, b: u8| ((b as u32 * w + a as u32 * (255 - w) + 127) / 255) as u8;
    Rgb([mix(under[0], over[0]), mix(under[1], over[1]), mix(under[2], over[2])])
}
