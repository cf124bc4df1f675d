//! On-disk snapshot of a font dictionary.
//!
//! A snapshot directory holds `glyphs.json` with the per-character metrics and
//! two lossless PNG images per character, named after its code point. Loading a
//! snapshot reproduces the saved records exactly, so a dictionary can be
//! restored without the font that produced it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dictionary::FontDictionary;
use crate::error::{GlyphError, Result};
use crate::glyph::GlyphRecord;

pub const METADATA_FILE: &str = "glyphs.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
struct GlyphMetadata {
    x_divide: i32,
    y_divide: i32,
    width: i32,
    top_coord: i32,
    bottom_coord: i32,
}

pub fn mask_file_name(ch: char) -> String {
    format!("mask_{}.png", ch as u32)
}

pub fn quadrants_file_name(ch: char) -> String {
    format!("quadrants_{}.png", ch as u32)
}

/// Write `dictionary` into `dir`, creating the directory if needed.
pub fn save_snapshot(dictionary: &FontDictionary, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut metadata = BTreeMap::new();
    for (ch, glyph) in dictionary.iter() {
        metadata.insert(
            ch,
            GlyphMetadata {
                x_divide: glyph.x_divide,
                y_divide: glyph.y_divide,
                width: glyph.width,
                top_coord: glyph.top_coord,
                bottom_coord: glyph.bottom_coord,
            },
        );
        glyph.mask.save(dir.join(mask_file_name(ch)))?;
        glyph.quadrants.save(dir.join(quadrants_file_name(ch)))?;
    }

    let json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(dir.join(METADATA_FILE), json)?;
    log::debug!("saved {} glyphs to {:?}", metadata.len(), dir);
    Ok(())
}

/// Restore a dictionary previously written by [`save_snapshot`].
pub fn load_snapshot(dir: impl AsRef<Path>) -> Result<FontDictionary> {
    let dir = dir.as_ref();
    let data = fs::read(dir.join(METADATA_FILE))?;
    let metadata: BTreeMap<char, GlyphMetadata> = serde_json::from_slice(&data)?;

    let mut dictionary = FontDictionary::new();
    for (ch, m) in metadata {
        let mask = image::open(dir.join(mask_file_name(ch)))?.into_luma8();
        let quadrants = image::open(dir.join(quadrants_file_name(ch)))?.into_rgb8();
        if mask.dimensions() != quadrants.dimensions() {
            return Err(GlyphError::MismatchedGlyphImages(ch));
        }
        dictionary.insert(
            ch,
            GlyphRecord {
                mask,
                quadrants,
                x_divide: m.x_divide,
                y_divide: m.y_divide,
                width: m.width,
                top_coord: m.top_coord,
                bottom_coord: m.bottom_coord,
            },
        );
    }
    log::debug!("loaded {} glyphs from {:?}", dictionary.len(), dir);
    Ok(dictionary)
}
