//! quad-surface: page layout and image output for four-color text.

mod canvas;
mod error;
pub mod layout;
pub mod output;
mod pages;
pub mod pdf;

pub use canvas::{Separator, draw_separators, fill_rect, new_canvas};
pub use error::{LayoutError, Result, SurfaceError};
pub use layout::{LayoutMode, LayoutPosition, Margins, PageLayout, compute_positions};
pub use output::{DEFAULT_DPI, numbered_path, save_images};
pub use pages::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH, PageBuilder};
