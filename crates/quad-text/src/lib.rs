//! quad-text: four-color glyph synthesis, measurement and compositing.
//!
//! - `raster`: rasterizer capability (fontdue-backed and block stand-in)
//! - `glyph`: quadrant coloring of a single character
//! - `dictionary`: character to glyph mapping, rebuilt as a whole
//! - `metrics`: string widths and baseline-relative extents
//! - `compose`: masked compositing of strings onto RGB canvases
//! - `snapshot`: JSON + PNG persistence of a dictionary

pub mod compose;
pub mod dictionary;
pub mod error;
pub mod glyph;
pub mod metrics;
pub mod raster;
pub mod snapshot;

pub use compose::{Placement, compose, paste_masked};
pub use dictionary::{FontDictionary, default_characters};
pub use error::{GlyphError, Result};
pub use glyph::{
    ColorSelector, GlyphRecord, GlyphStyle, QuadrantColors, X_HEIGHT_DIVISOR, synthesize,
};
pub use metrics::{Measurements, flashcard_size, measure};
pub use raster::{
    BoxRasterizer, FontHandle, FontSource, FontdueRasterizer, GlyphRasterizer, InkBox,
};
pub use snapshot::{load_snapshot, save_snapshot};
