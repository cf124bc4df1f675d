//! Writing finished images to disk.
//!
//! PNG and JPEG files carry the page resolution in their headers; PDF holds
//! several pages in one document. Other extensions go through `image`'s
//! format detection.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::RgbImage;
use image::codecs::jpeg::{JpegEncoder, PixelDensity};

use crate::error::{Result, SurfaceError};
use crate::pdf::write_pdf;

/// Print resolution assumed for the default page size.
pub const DEFAULT_DPI: u32 = 300;

const JPEG_QUALITY: u8 = 95;

/// Extensions whose format can hold several images in one file.
const MULTI_PAGE_EXTENSIONS: &[&str] = &["pdf"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn is_multi_page(path: &Path) -> bool {
    extension(path).is_some_and(|e| MULTI_PAGE_EXTENSIONS.contains(&e.as_str()))
}

/// `dir/stem.ext` becomes `dir/stem-<n>.ext` (1-based).
pub fn numbered_path(path: &Path, n: usize) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{n}.{ext}"),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

/// Save `images` under `path`, picking the format from its extension.
///
/// A single image goes to `path` as-is. Several images go into one file when
/// `single_file` is set and the format supports it; otherwise each image is
/// written to its own numbered file. `dpi` is recorded where the format allows.
/// Returns the paths written.
pub fn save_images(
    images: &[RgbImage],
    path: impl AsRef<Path>,
    single_file: bool,
    dpi: u32,
) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if path.extension().is_none() {
        return Err(SurfaceError::MissingExtension(path.to_path_buf()));
    }

    match images {
        [] => Err(SurfaceError::NoImages),
        [image] => {
            write_image(image, path, dpi)?;
            Ok(vec![path.to_path_buf()])
        }
        _ if single_file && is_multi_page(path) => {
            write_pdf(images, dpi, BufWriter::new(File::create(path)?))?;
            log::debug!("wrote {} pages into {:?}", images.len(), path);
            Ok(vec![path.to_path_buf()])
        }
        _ => {
            let mut written = Vec::with_capacity(images.len());
            for (i, image) in images.iter().enumerate() {
                let target = numbered_path(path, i + 1);
                write_image(image, &target, dpi)?;
                written.push(target);
            }
            log::debug!("wrote {} numbered images next to {:?}", written.len(), path);
            Ok(written)
        }
    }
}

fn write_image(image: &RgbImage, path: &Path, dpi: u32) -> Result<()> {
    match extension(path).as_deref() {
        Some("png") => write_png(image, path, dpi),
        Some("jpg" | "jpeg") => {
            let mut encoder =
                JpegEncoder::new_with_quality(BufWriter::new(File::create(path)?), JPEG_QUALITY);
            let density = u16::try_from(dpi).unwrap_or(u16::MAX);
            encoder.set_pixel_density(PixelDensity::dpi(density));
            encoder.encode_image(image)?;
            Ok(())
        }
        Some("pdf") => {
            write_pdf(std::slice::from_ref(image), dpi, BufWriter::new(File::create(path)?))?;
            Ok(())
        }
        _ => Ok(image.save(path)?),
    }
}

fn write_png(image: &RgbImage, path: &Path, dpi: u32) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(file, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    // pHYs only knows pixels per meter
    let ppm = (dpi as f64 / 0.0254).round() as u32;
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}
