use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::{Rgb, RgbImage};
use quadcolor::quad_config::QuadConfig;
use quadcolor::quad_surface::{Margins, Separator};
use quadcolor::quad_text::FontHandle;
use quadcolor::{Quadcolor, page_builder, save_images};

#[derive(Parser)]
#[command(name = "quadcolor", version, about = "Render text with four-color quadrant letters")]
struct Cli {
    /// Configuration file (defaults to ./quadcolor.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Font file to render with
    #[arg(long, global = true, conflicts_with = "family")]
    font: Option<PathBuf>,

    /// System font family to render with
    #[arg(long, global = true)]
    family: Option<String>,

    /// Font size in pixels
    #[arg(long, global = true)]
    size: Option<f32>,

    /// Load glyphs from a saved snapshot instead of a font
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// One image per string, sized to the text
    Graphics {
        #[arg(required = true)]
        text: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
        /// Margin on every side in pixels
        #[arg(long)]
        margin: Option<i32>,
    },
    /// Strings laid out on fixed-size pages
    Flashcards {
        #[arg(required = true)]
        text: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
        #[arg(long)]
        rows: Option<i64>,
        #[arg(long)]
        columns: Option<i64>,
        #[arg(long)]
        width: Option<i64>,
        #[arg(long)]
        height: Option<i64>,
        /// Draw separator lines between cards
        #[arg(long)]
        separators: bool,
    },
    /// Print the smallest card size that fits every string
    Size {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Save the glyph dictionary for later use with --snapshot
    Snapshot { dir: PathBuf },
}

#[derive(Args)]
struct OutputArgs {
    /// Output path; the extension picks the image format
    #[arg(short, long)]
    output: PathBuf,

    /// Write one numbered file per page even when the format could hold them all
    #[arg(long)]
    separate_files: bool,

    /// Resolution recorded in PNG, JPEG and PDF output
    #[arg(long)]
    dpi: Option<u32>,
}

impl OutputArgs {
    fn save(&self, images: &[RgbImage], config: &QuadConfig) -> Result<()> {
        let single_file = config.output.single_file && !self.separate_files;
        let dpi = self.dpi.unwrap_or(config.output.dpi);
        for path in save_images(images, &self.output, single_file, dpi)? {
            println!("{}", path.display());
        }
        Ok(())
    }
}

fn load_config(cli: &Cli) -> Result<QuadConfig> {
    let mut config = match &cli.config {
        Some(path) => QuadConfig::load_from_file(path),
        None => QuadConfig::load_or_default(),
    }
    .context("loading configuration")?;
    config.merge_with_env();

    if let Some(size) = cli.size {
        config.font.size = size;
    }
    if let Some(path) = &cli.font {
        config.font.path = Some(path.clone());
        config.font.family = None;
    }
    if let Some(family) = &cli.family {
        config.font.path = None;
        config.font.family = Some(family.clone());
    }
    if let Some(dir) = &cli.snapshot {
        config.font.path = None;
        config.font.family = None;
        config.font.snapshot = Some(dir.clone());
    }
    Ok(config)
}

fn open_session(config: &QuadConfig) -> Result<Quadcolor> {
    let mut session = Quadcolor::from_config(config).context("opening font")?;
    if !session.has_font() && session.dictionary().is_empty() {
        let fallback = FontHandle::family("DejaVu Sans", config.font.size);
        log::warn!("no font configured, trying {:?}", fallback.source);
        session
            .set_font_handle(&fallback)
            .context("no font configured; pass --font, --family or --snapshot")?;
    }
    Ok(session)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut session = open_session(&config)?;

    match &cli.command {
        Command::Graphics { text, output, margin } => {
            let margins = match margin {
                Some(m) => Margins::uniform(*m),
                None => page_builder(&config).margins,
            };
            let images = session.make_graphics(text, margins, Rgb(config.colors.background))?;
            output.save(&images, &config)?;
        }
        Command::Flashcards { text, output, rows, columns, width, height, separators } => {
            let mut builder = page_builder(&config);
            builder.rows = rows.unwrap_or(builder.rows);
            builder.columns = columns.unwrap_or(builder.columns);
            builder.width = width.unwrap_or(builder.width);
            builder.height = height.unwrap_or(builder.height);
            if *separators && builder.separator.is_none() {
                builder.separator = Some(Separator {
                    width: config.layout.separator_width,
                    ..Separator::default()
                });
            }
            let pages = session.make_flashcards(text, &builder)?;
            output.save(&pages, &config)?;
        }
        Command::Size { text } => {
            let (width, height) = session.flashcard_size(text);
            println!("{width}x{height}");
        }
        Command::Snapshot { dir } => {
            session.save_snapshot(dir)?;
            println!("{}", dir.display());
        }
    }
    Ok(())
}
