//! Text anchor positions for single-column and grid page layouts.

use crate::error::LayoutError;

/// Page margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(m: i32) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Anchor for one string: the page it goes on and the point its baseline is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPosition {
    pub page: usize,
    pub x: i32,
    pub y: i32,
}

/// How strings are distributed over images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One image per string, sized to the string.
    Natural,
    /// `rows` stacked lines per page.
    SingleColumn { rows: u32 },
    /// `rows` x `columns` cards per page.
    Grid { rows: u32, columns: u32 },
}

impl LayoutMode {
    /// Strings per page; natural mode holds one.
    pub fn capacity(&self) -> usize {
        match *self {
            LayoutMode::Natural => 1,
            LayoutMode::SingleColumn { rows } => rows as usize,
            LayoutMode::Grid { rows, columns } => rows as usize * columns as usize,
        }
    }

    /// Number of pages needed for `count` strings.
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.capacity().max(1))
    }
}

/// Validated page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub mode: LayoutMode,
    pub width: u32,
    pub height: u32,
}

impl PageLayout {
    /// Check raw row, column and page-size values. `rows == 0` selects natural
    /// mode, `columns == 0` the single-column mode.
    pub fn new(rows: i64, columns: i64, width: i64, height: i64) -> Result<Self, LayoutError> {
        if rows < 0 {
            return Err(LayoutError::NegativeRowCount(rows));
        }
        if columns < 0 {
            return Err(LayoutError::NegativeColumnCount(columns));
        }
        if width <= 0 || width > u32::MAX as i64 {
            return Err(LayoutError::NonPositivePageWidth(width));
        }
        if height <= 0 || height > u32::MAX as i64 {
            return Err(LayoutError::NonPositivePageHeight(height));
        }
        let rows = u32::try_from(rows).map_err(|_| LayoutError::NegativeRowCount(rows))?;
        let columns =
            u32::try_from(columns).map_err(|_| LayoutError::NegativeColumnCount(columns))?;

        let mode = match (rows, columns) {
            (0, _) => LayoutMode::Natural,
            (rows, 0) => LayoutMode::SingleColumn { rows },
            (rows, columns) => LayoutMode::Grid { rows, columns },
        };
        Ok(Self {
            mode,
            width: width as u32,
            height: height as u32,
        })
    }
}

/// Compute anchors for every slot on every page, page-major then row-major
/// then column-major. `columns == 0` lays out `rows` lines per page.
///
/// Callers truncate the result to the number of strings they have.
pub fn compute_positions(
    pages: &[(u32, u32)],
    margins: Margins,
    rows: u32,
    columns: u32,
    h_centered: bool,
) -> Vec<LayoutPosition> {
    let slots = rows as usize * columns.max(1) as usize;
    let mut positions = Vec::with_capacity(pages.len() * slots);
    if rows == 0 {
        return positions;
    }

    // Centers are floored after adding the fractional half cell, so an anchor
    // can sit one pixel past one computed from a truncated cell size.
    for (page, &(width, height)) in pages.iter().enumerate() {
        let usable_w = (width as i32 - margins.left - margins.right) as f64;
        let usable_h = (height as i32 - margins.top - margins.bottom) as f64;
        let row_h = usable_h / rows as f64;

        if columns == 0 {
            let x = margins.left + if h_centered { (usable_w / 2.0).floor() as i32 } else { 0 };
            for i in 0..rows {
                let y = margins.top + (i as f64 * row_h + row_h / 2.0).floor() as i32;
                positions.push(LayoutPosition { page, x, y });
            }
        } else {
            let cell_w = usable_w / columns as f64;
            let x_center = if h_centered { cell_w / 2.0 } else { 0.0 };
            for i in 0..rows {
                let y = margins.top + (i as f64 * row_h + row_h / 2.0).floor() as i32;
                for j in 0..columns {
                    let x = margins.left + (j as f64 * cell_w + x_center).floor() as i32;
                    positions.push(LayoutPosition { page, x, y });
                }
            }
        }
    }

    log::debug!(
        "computed {} layout positions over {} pages",
        positions.len(),
        pages.len()
    );
    positions
}
