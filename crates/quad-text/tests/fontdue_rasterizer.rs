use std::path::PathBuf;

use anyhow::Result;
use quad_text::{
    FontDictionary, FontHandle, FontdueRasterizer, GlyphRasterizer, GlyphStyle, measure,
};

const SIZE: f32 = 48.0;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Tuffy.ttf")
}

fn reference_font() -> Result<fontdue::Font> {
    let bytes = std::fs::read(fixture())?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(anyhow::Error::msg)
}

fn dictionary(rasterizer: &FontdueRasterizer) -> FontDictionary {
    FontDictionary::build(
        "abglx ",
        rasterizer,
        &GlyphStyle::default(),
        &|ch: char| ch.is_ascii_lowercase(),
    )
}

#[test]
fn space_is_as_wide_as_its_advance() -> Result<()> {
    let rasterizer = FontdueRasterizer::from_path(fixture(), SIZE)?;
    let advance = reference_font()?.metrics(' ', SIZE).advance_width.round() as i32;
    assert!(advance > 1);
    assert_eq!(rasterizer.ink_box(' ').width(), advance);

    let dict = dictionary(&rasterizer);
    assert_eq!(dict.get(' ').map(|g| g.width), Some(advance));
    Ok(())
}

#[test]
fn glyph_widths_follow_the_pen() -> Result<()> {
    let rasterizer = FontdueRasterizer::from_path(fixture(), SIZE)?;
    let font = reference_font()?;
    let l = font.metrics('l', SIZE);
    // the box spans from the pen origin to the advance, past the ink
    assert!(rasterizer.ink_box('l').width() >= l.advance_width.round() as i32);
    assert!(rasterizer.ink_box('l').width() > l.width as i32);

    let dict = dictionary(&rasterizer);
    let m = measure(&["a b", "ab", "ll", "l"], &dict);
    assert!(m.widths[0] > m.widths[1]);
    assert_eq!(m.widths[0], m.widths[1] + dict.get(' ').map_or(0, |g| g.width));
    assert_eq!(m.widths[2], 2 * m.widths[3]);
    Ok(())
}

#[test]
fn descenders_hang_below_the_baseline() -> Result<()> {
    let rasterizer = FontdueRasterizer::from_path(fixture(), SIZE)?;
    let dict = dictionary(&rasterizer);
    let g = dict.get('g').expect("g is in the character set");
    let b = dict.get('b').expect("b is in the character set");
    assert!(g.bottom_coord > 0);
    assert!(b.top_coord < g.top_coord);
    Ok(())
}

#[test]
fn draw_keeps_all_of_the_ink() -> Result<()> {
    let rasterizer = FontdueRasterizer::from_path(fixture(), SIZE)?;
    let (_, bitmap) = reference_font()?.rasterize('g', SIZE);
    let expected: u64 = bitmap.iter().map(|&v| v as u64).sum();
    assert!(expected > 0);

    let dict = dictionary(&rasterizer);
    let g = dict.get('g').expect("g is in the character set");
    let drawn: u64 = g.mask.pixels().map(|p| p.0[0] as u64).sum();
    assert_eq!(drawn, expected);
    Ok(())
}

#[test]
fn font_handle_opens_a_path() -> Result<()> {
    let rasterizer = FontHandle::path(fixture(), SIZE).open()?;
    assert_eq!(rasterizer.size(), SIZE);
    assert!(rasterizer.ink_box('x').height() > 0);
    Ok(())
}
