use thiserror::Error;

/// Result alias for glyph and dictionary operations.
pub type Result<T> = std::result::Result<T, GlyphError>;

/// Errors raised while building, drawing or persisting colored glyphs.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// A character has no entry in the current font dictionary.
    #[error("{0:?} is not in the font dictionary; add it to the character set")]
    OutOfFont(char),

    #[error("invalid font data: {0}")]
    InvalidFont(String),

    #[error("no system font matches family {0:?}")]
    FontNotFound(String),

    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glyph image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed glyph snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Snapshot metadata names a glyph whose mask and quadrant images disagree in size.
    #[error("snapshot images for {0:?} have mismatched dimensions")]
    MismatchedGlyphImages(char),
}
