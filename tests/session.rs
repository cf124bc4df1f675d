use anyhow::Result;
use image::Rgb;
use quadcolor::quad_surface::{DEFAULT_DPI, Margins, PageBuilder, Separator};
use quadcolor::quad_text::{BoxRasterizer, InkBox};
use quadcolor::{ParameterUpdate, Quadcolor, save_images};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn session() -> Quadcolor {
    let mut session = Quadcolor::new();
    session.set_font(
        BoxRasterizer::new(InkBox::new(0, -10, 6, 0))
            .with_glyph('x', InkBox::new(0, -6, 6, 0))
            .with_glyph('o', InkBox::new(0, -6, 6, 0))
            .with_glyph('g', InkBox::new(0, -6, 6, 4))
            .with_glyph(' ', InkBox::new(0, 0, 3, 0)),
    );
    session
}

#[test]
fn flashcard_size_covers_every_string() {
    let mut session = session();
    // "ab g": 6 + 6 + 3 + 6 wide, -10..4 tall
    assert_eq!(session.flashcard_size(&["ab g", "x"]), (21, 14));
    assert_eq!(session.flashcard_size::<&str>(&[]), (0, 0));
}

#[test]
fn graphics_are_sized_to_their_text() -> Result<()> {
    let mut session = session();
    let images = session.make_graphics(&["xo", "ab g"], Margins::uniform(2), WHITE)?;
    assert_eq!(images[0].dimensions(), (12 + 4, 6 + 4));
    assert_eq!(images[1].dimensions(), (21 + 4, 14 + 4));
    Ok(())
}

#[test]
fn flashcards_fill_a_grid_and_save() -> Result<()> {
    let mut session = session();
    let builder = PageBuilder::grid(2, 2)
        .page_size(80, 80)
        .separator(Some(Separator::default()));
    let pages = session.make_flashcards(&["ab", "go", "x", "xo", "a"], &builder)?;
    assert_eq!(pages.len(), 2);
    assert_eq!(*pages[1].get_pixel(40, 5), Rgb([0, 0, 0]));

    let dir = tempfile::tempdir()?;
    let written = save_images(&pages, dir.path().join("cards.jpg"), true, DEFAULT_DPI)?;
    assert_eq!(
        written,
        vec![dir.path().join("cards-1.jpg"), dir.path().join("cards-2.jpg")]
    );

    let written = save_images(&pages, dir.path().join("cards.pdf"), true, DEFAULT_DPI)?;
    assert_eq!(written, vec![dir.path().join("cards.pdf")]);
    Ok(())
}

#[test]
fn substitute_height_cuts_the_a() -> Result<()> {
    let mut session = session();
    session.set_parameters(ParameterUpdate {
        substitute_height: Some(Some('o')),
        ..ParameterUpdate::default()
    })?;
    let a = session.dictionary().get('a').expect("a is in the default set");
    // "d" stands in for "a"; rows above the top of "o" are blanked
    assert_eq!(*a.quadrants.get_pixel(0, 0), WHITE);
    assert_eq!(*a.quadrants.get_pixel(0, 5), Rgb([255, 0, 0]));
    Ok(())
}

#[test]
fn snapshot_restores_the_dictionary_without_a_font() -> Result<()> {
    let mut session = session();
    let dir = tempfile::tempdir()?;
    session.save_snapshot(dir.path())?;

    let mut restored = Quadcolor::from_snapshot(dir.path())?;
    assert!(!restored.has_font());
    assert_eq!(restored.dictionary(), session.dictionary());
    assert_eq!(restored.flashcard_size(&["ab g"]), (21, 14));
    Ok(())
}
