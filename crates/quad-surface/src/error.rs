use std::path::PathBuf;

use quad_text::GlyphError;
use thiserror::Error;

/// Rejected page geometry. Raised before any canvas is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("number of rows must be a nonnegative integer, got {0}")]
    NegativeRowCount(i64),

    #[error("number of columns must be a nonnegative integer, got {0}")]
    NegativeColumnCount(i64),

    #[error("page width must be a positive integer, got {0}")]
    NonPositivePageWidth(i64),

    #[error("page height must be a positive integer, got {0}")]
    NonPositivePageHeight(i64),
}

/// Result alias for page building and output.
pub type Result<T> = std::result::Result<T, SurfaceError>;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("output I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format is chosen from the extension, so one is required.
    #[error("output path {0:?} has no file extension")]
    MissingExtension(PathBuf),

    #[error("no images to save")]
    NoImages,
}
