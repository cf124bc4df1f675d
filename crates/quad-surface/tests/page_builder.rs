use anyhow::Result;
use image::Rgb;
use quad_surface::{
    DEFAULT_DPI, LayoutError, Margins, PageBuilder, Separator, SurfaceError, save_images,
};
use quad_text::{BoxRasterizer, FontDictionary, GlyphError, GlyphStyle, InkBox};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn dictionary() -> FontDictionary {
    let font = BoxRasterizer::new(InkBox::new(0, -10, 6, 0))
        .with_glyph('x', InkBox::new(0, -6, 6, 0))
        .with_glyph('g', InkBox::new(0, -6, 6, 4))
        .with_glyph(' ', InkBox::new(0, 0, 3, 0));
    let style = GlyphStyle::default();
    FontDictionary::build("abgx ", &font, &style, &|ch: char| ch.is_ascii_lowercase())
}

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| if i % 2 == 0 { "ab".into() } else { "g x".into() }).collect()
}

#[test]
fn natural_mode_sizes_each_image_to_its_text() -> Result<()> {
    let dict = dictionary();
    let builder = PageBuilder::default().margins(Margins::new(2, 3, 4, 5));
    let images = builder.build(&["ab", "g"], &dict)?;
    assert_eq!(images.len(), 2);
    // "ab": width 12, extent -10..0
    assert_eq!(images[0].dimensions(), (12 + 6, 10 + 8));
    // "g": width 6, extent -6..4
    assert_eq!(images[1].dimensions(), (6 + 6, 10 + 8));
    // first ink pixel sits right inside the top-left margins
    assert_ne!(*images[0].get_pixel(2, 3), WHITE);
    assert_eq!(*images[0].get_pixel(1, 3), WHITE);
    assert_eq!(*images[0].get_pixel(2, 2), WHITE);
    Ok(())
}

#[test]
fn single_column_pages_round_up() -> Result<()> {
    let dict = dictionary();
    let builder = PageBuilder::grid(4, 0).page_size(200, 400);
    let pages = builder.build(&words(10), &dict)?;
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|p| p.dimensions() == (200, 400)));
    // third page holds two lines; its last two slots stay blank
    assert!((200..400).all(|y| *pages[2].get_pixel(0, y) == WHITE));
    Ok(())
}

#[test]
fn grid_pages_draw_separators_after_text() -> Result<()> {
    let dict = dictionary();
    let red = Rgb([255, 0, 0]);
    let builder = PageBuilder::grid(2, 3)
        .page_size(90, 60)
        .separator(Some(Separator {
            color: red,
            width: 1,
        }));
    let pages = builder.build(&words(7), &dict)?;
    assert_eq!(pages.len(), 2);
    for page in &pages {
        assert_eq!(*page.get_pixel(0, 30), red);
        assert_eq!(*page.get_pixel(30, 0), red);
        assert_eq!(*page.get_pixel(60, 59), red);
    }
    // the first card is centered on (15, 15) shifted down by half of x (3)
    assert_ne!(*pages[0].get_pixel(15, 15), WHITE);
    Ok(())
}

#[test]
fn invalid_geometry_fails_before_drawing() {
    let dict = dictionary();
    let err = PageBuilder::grid(-1, 2).build(&["ab"], &dict).unwrap_err();
    assert!(matches!(err, SurfaceError::Layout(LayoutError::NegativeRowCount(-1))));

    let err = PageBuilder::grid(1, 1).page_size(0, 10).build(&["ab"], &dict).unwrap_err();
    assert!(matches!(err, SurfaceError::Layout(LayoutError::NonPositivePageWidth(0))));
}

#[test]
fn unknown_characters_are_reported() {
    let dict = dictionary();
    let err = PageBuilder::grid(1, 1).build(&["ab", "a#"], &dict).unwrap_err();
    assert!(matches!(err, SurfaceError::Glyph(GlyphError::OutOfFont('#'))));
}

#[test]
fn saving_pages_numbers_or_bundles_files() -> Result<()> {
    let dict = dictionary();
    let pages = PageBuilder::grid(1, 1).page_size(40, 40).build(&words(3), &dict)?;
    let dir = tempfile::tempdir()?;

    let written = save_images(&pages, dir.path().join("deck.png"), true, DEFAULT_DPI)?;
    assert_eq!(written.len(), 3);
    assert!(dir.path().join("deck-3.png").exists());

    let written = save_images(&pages, dir.path().join("deck.pdf"), true, DEFAULT_DPI)?;
    assert_eq!(written, vec![dir.path().join("deck.pdf")]);
    let pdf = std::fs::read(&written[0])?;
    assert_eq!(pdf.windows(12).filter(|w| *w == b"/Type /Page ").count(), 3);

    let written = save_images(&pages, dir.path().join("deck.pdf"), false, DEFAULT_DPI)?;
    assert_eq!(written.len(), 3);

    // PNG output decodes to exactly the page that was drawn
    let single = save_images(&pages[..1], dir.path().join("one.png"), false, DEFAULT_DPI)?;
    assert_eq!(image::open(&single[0])?.to_rgb8(), pages[0]);
    Ok(())
}
