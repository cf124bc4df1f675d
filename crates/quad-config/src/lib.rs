//! Quadcolor configuration system
//!
//! Settings are read from `quadcolor.toml`, with environment variables taking
//! precedence over values from the file.

use std::path::{Path, PathBuf};

use image::Rgb;
use quad_text::{ColorSelector, FontHandle, GlyphStyle, QuadrantColors, default_characters};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "quadcolor.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuadConfig {
    pub font: FontConfig,
    pub colors: ColorConfig,
    pub glyphs: GlyphConfig,
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

/// Font selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a font file (.ttf/.otf); wins over `family`
    pub path: Option<PathBuf>,
    /// System font family name, resolved through the font database
    pub family: Option<String>,
    /// Font size in pixels
    pub size: f32,
    /// Saved glyph dictionary used when no font is configured
    pub snapshot: Option<PathBuf>,
}

/// RGB colors as `[r, g, b]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub upper_left: [u8; 3],
    pub upper_right: [u8; 3],
    pub lower_left: [u8; 3],
    pub lower_right: [u8; 3],
    /// Color of characters that are not split into quadrants
    pub non_colored: [u8; 3],
    pub background: [u8; 3],
    /// Grid separator lines; none are drawn when unset
    pub separator: Option<[u8; 3]>,
}

/// Which characters exist and which get colored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Characters in the font dictionary (printable ASCII and curly quotes when unset)
    pub characters: Option<String>,
    /// Regular expression; matching characters are colored
    pub color_pattern: String,
    /// Character whose top cuts a "d" down into a rounded "a" (empty disables)
    pub substitute_height: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rows: i64,
    pub columns: i64,
    pub page_width: i64,
    pub page_height: i64,
    /// `[left, top, right, bottom]` in pixels
    pub margins: [i32; 4],
    pub separator_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Bundle several pages into one file when the format allows it
    pub single_file: bool,
    /// Resolution recorded in PNG, JPEG and PDF output
    pub dpi: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            family: None,
            size: 72.0,
            snapshot: None,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        let q = QuadrantColors::default();
        Self {
            upper_left: q.upper_left.0,
            upper_right: q.upper_right.0,
            lower_left: q.lower_left.0,
            lower_right: q.lower_right.0,
            non_colored: [0, 0, 0],
            background: [255, 255, 255],
            separator: None,
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            characters: None,
            color_pattern: "[a-z]".to_string(),
            substitute_height: String::new(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            page_width: 2550,
            page_height: 3450,
            margins: [0, 0, 0, 0],
            separator_width: 1,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            single_file: true,
            dpi: 300,
        }
    }
}

/// Colors characters whose single-character string matches a regular expression.
#[derive(Debug, Clone)]
pub struct PatternSelector {
    regex: Regex,
}

impl PatternSelector {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl ColorSelector for PatternSelector {
    fn should_color(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(ch.encode_utf8(&mut buf))
    }
}

impl QuadConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path`, or defaults if there is no such file. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load `quadcolor.toml` from the current directory, or defaults if it is missing
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from(DEFAULT_CONFIG_FILE)
    }

    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(path) = std::env::var("QUADCOLOR_FONT") {
            self.font.path = Some(PathBuf::from(path));
        }
        if let Ok(family) = std::env::var("QUADCOLOR_FONT_FAMILY") {
            self.font.family = Some(family);
        }
        if let Ok(val) = std::env::var("QUADCOLOR_FONT_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.font.size = size;
            }
        }
        if let Ok(dir) = std::env::var("QUADCOLOR_SNAPSHOT") {
            self.font.snapshot = Some(PathBuf::from(dir));
        }
        if let Ok(pattern) = std::env::var("QUADCOLOR_COLOR_PATTERN") {
            self.glyphs.color_pattern = pattern;
        }
        if let Ok(ch) = std::env::var("QUADCOLOR_SUBSTITUTE_HEIGHT") {
            self.glyphs.substitute_height = ch;
        }
    }

    /// Load from `quadcolor.toml` (or defaults), then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_or_default()?;
        config.merge_with_env();
        Ok(config)
    }

    /// The configured font, if any. A path wins over a family name.
    pub fn font_handle(&self) -> Option<FontHandle> {
        match (&self.font.path, &self.font.family) {
            (Some(path), _) => Some(FontHandle::path(path.clone(), self.font.size)),
            (None, Some(family)) => Some(FontHandle::family(family.clone(), self.font.size)),
            (None, None) => None,
        }
    }

    pub fn glyph_style(&self) -> GlyphStyle {
        let c = &self.colors;
        GlyphStyle {
            quadrants: QuadrantColors {
                upper_left: Rgb(c.upper_left),
                upper_right: Rgb(c.upper_right),
                lower_left: Rgb(c.lower_left),
                lower_right: Rgb(c.lower_right),
            },
            non_colored: Rgb(c.non_colored),
            substitute_height: self.glyphs.substitute_height.chars().next(),
            ..GlyphStyle::default()
        }
    }

    pub fn characters(&self) -> String {
        self.glyphs.characters.clone().unwrap_or_else(default_characters)
    }

    pub fn selector(&self) -> Result<PatternSelector, ConfigError> {
        PatternSelector::new(&self.glyphs.color_pattern)
    }
}
