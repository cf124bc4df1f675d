use image::{Rgb, RgbImage};

use crate::layout::Margins;

/// Straight separator lines drawn between rows and columns of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    pub color: Rgb<u8>,
    /// Line thickness in pixels.
    pub width: u32,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            color: Rgb([0, 0, 0]),
            width: 1,
        }
    }
}

/// Allocate a canvas filled with `background`. Zero dimensions grow to one pixel.
pub fn new_canvas(width: u32, height: u32, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width.max(1), height.max(1), background)
}

/// Fill the half-open rectangle `[x0, x1) x [y0, y1)`, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let x0 = x0.clamp(0, canvas.width() as i32) as u32;
    let x1 = x1.clamp(0, canvas.width() as i32) as u32;
    let y0 = y0.clamp(0, canvas.height() as i32) as u32;
    let y1 = y1.clamp(0, canvas.height() as i32) as u32;
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Draw separators at the interior row and column boundaries of the card grid.
/// Lines span the whole page and are centered on the boundary.
pub fn draw_separators(
    canvas: &mut RgbImage,
    margins: Margins,
    rows: u32,
    columns: u32,
    separator: Separator,
) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let half = separator.width as i32 / 2;
    let thickness = separator.width as i32;

    if rows > 1 {
        let row_h = (h - margins.top - margins.bottom) as f64 / rows as f64;
        for i in 1..rows {
            let y = margins.top + (i as f64 * row_h).floor() as i32 - half;
            fill_rect(canvas, 0, y, w, y + thickness, separator.color);
        }
    }
    if columns > 1 {
        let cell_w = (w - margins.left - margins.right) as f64 / columns as f64;
        for j in 1..columns {
            let x = margins.left + (j as f64 * cell_w).floor() as i32 - half;
            fill_rect(canvas, x, 0, x + thickness, h, separator.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn zero_sized_canvas_grows() {
        assert_eq!(new_canvas(0, 5, WHITE).dimensions(), (1, 5));
    }

    #[test]
    fn separators_split_rows_and_columns() {
        let mut canvas = new_canvas(40, 30, WHITE);
        let separator = Separator {
            color: RED,
            width: 1,
        };
        draw_separators(&mut canvas, Margins::default(), 3, 2, separator);
        assert_eq!(*canvas.get_pixel(5, 10), RED);
        assert_eq!(*canvas.get_pixel(5, 20), RED);
        assert_eq!(*canvas.get_pixel(20, 3), RED);
        assert_eq!(*canvas.get_pixel(5, 11), WHITE);
        assert_eq!(*canvas.get_pixel(19, 3), WHITE);
    }

    #[test]
    fn single_card_has_no_separators() {
        let mut canvas = new_canvas(10, 10, WHITE);
        draw_separators(&mut canvas, Margins::default(), 1, 1, Separator::default());
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }
}
