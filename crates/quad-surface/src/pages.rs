//! Turning lists of strings into finished images.

use image::{Rgb, RgbImage};
use quad_text::{FontDictionary, GlyphError, Placement, compose, measure};

use crate::canvas::{Separator, draw_separators, new_canvas};
use crate::error::Result;
use crate::layout::{LayoutMode, Margins, PageLayout, compute_positions};

/// Default page size: 8.5 x 11.5 inches at 300 dpi.
pub const DEFAULT_PAGE_WIDTH: i64 = 2550;
pub const DEFAULT_PAGE_HEIGHT: i64 = 3450;

/// Page setup for a batch of strings.
///
/// `rows == 0` gives one image per string sized to its text; `columns == 0`
/// stacks `rows` left-aligned lines per page; otherwise strings fill a
/// `rows` x `columns` grid of centered cards.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBuilder {
    pub rows: i64,
    pub columns: i64,
    pub width: i64,
    pub height: i64,
    pub margins: Margins,
    pub background: Rgb<u8>,
    pub separator: Option<Separator>,
    /// Shift applied to every string after layout.
    pub offset: (i32, i32),
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            margins: Margins::default(),
            background: Rgb([255, 255, 255]),
            separator: None,
            offset: (0, 0),
        }
    }
}

impl PageBuilder {
    pub fn grid(rows: i64, columns: i64) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn page_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn background(mut self, background: Rgb<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn separator(mut self, separator: Option<Separator>) -> Self {
        self.separator = separator;
        self
    }

    pub fn offset(mut self, x: i32, y: i32) -> Self {
        self.offset = (x, y);
        self
    }

    /// Lay out and draw every string. Geometry and characters are validated
    /// before any canvas is allocated.
    pub fn build<S: AsRef<str>>(
        &self,
        strings: &[S],
        dictionary: &FontDictionary,
    ) -> Result<Vec<RgbImage>> {
        let layout = PageLayout::new(self.rows, self.columns, self.width, self.height)?;
        for text in strings {
            if let Some(ch) = dictionary.first_missing(text.as_ref()) {
                return Err(GlyphError::OutOfFont(ch).into());
            }
        }

        match layout.mode {
            LayoutMode::Natural => self.natural_images(strings, dictionary),
            LayoutMode::SingleColumn { rows } => {
                self.paged_images(strings, dictionary, layout, rows, 0, false)
            }
            LayoutMode::Grid { rows, columns } => {
                self.paged_images(strings, dictionary, layout, rows, columns, true)
            }
        }
    }

    fn natural_images<S: AsRef<str>>(
        &self,
        strings: &[S],
        dictionary: &FontDictionary,
    ) -> Result<Vec<RgbImage>> {
        let m = measure(strings, dictionary);
        let Margins {
            left,
            top,
            right,
            bottom,
        } = self.margins;
        let placement = Placement {
            v_centered: false,
            ..Placement::default()
        }
        .with_offset(self.offset.0, self.offset.1);

        let mut images = Vec::with_capacity(strings.len());
        for (i, text) in strings.iter().enumerate() {
            let width = (m.widths[i] + left + right).max(1) as u32;
            let height = (m.height(i) + top + bottom).max(1) as u32;
            let mut canvas = new_canvas(width, height, self.background);
            let anchor = (left + m.widths[i].div_euclid(2), top - m.tops[i]);
            compose(text.as_ref(), &mut canvas, anchor, placement, dictionary)?;
            images.push(canvas);
        }
        log::debug!("drew {} natural-size images", images.len());
        Ok(images)
    }

    fn paged_images<S: AsRef<str>>(
        &self,
        strings: &[S],
        dictionary: &FontDictionary,
        layout: PageLayout,
        rows: u32,
        columns: u32,
        h_centered: bool,
    ) -> Result<Vec<RgbImage>> {
        let page_count = layout.mode.page_count(strings.len());
        let mut pages: Vec<RgbImage> = (0..page_count)
            .map(|_| new_canvas(layout.width, layout.height, self.background))
            .collect();
        let sizes: Vec<(u32, u32)> = pages.iter().map(|p| p.dimensions()).collect();

        let positions = compute_positions(&sizes, self.margins, rows, columns, h_centered);
        let placement = Placement {
            h_centered,
            ..Placement::default()
        }
        .with_offset(self.offset.0, self.offset.1);
        for (text, pos) in strings.iter().zip(positions) {
            let anchor = (pos.x, pos.y);
            compose(text.as_ref(), &mut pages[pos.page], anchor, placement, dictionary)?;
        }

        if let Some(separator) = self.separator {
            if rows > 1 || columns > 1 {
                for page in &mut pages {
                    draw_separators(page, self.margins, rows, columns, separator);
                }
            }
        }

        log::debug!(
            "laid out {} strings on {} pages ({:?})",
            strings.len(),
            page_count,
            layout.mode
        );
        Ok(pages)
    }
}
