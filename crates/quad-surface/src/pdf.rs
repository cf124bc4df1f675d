//! Minimal PDF writer for raster pages.
//!
//! Every image becomes one page whose media box is the image size at the
//! requested resolution. Pixels are stored losslessly as a Flate-compressed
//! RGB image XObject.

use std::io::{self, Write};

use image::RgbImage;
use miniz_oxide::deflate::compress_to_vec_zlib;

const COMPRESSION_LEVEL: u8 = 6;

/// Page size in PDF points (1/72 inch) for `pixels` at `dpi`.
pub fn points(pixels: u32, dpi: u32) -> f64 {
    pixels as f64 * 72.0 / dpi.max(1) as f64
}

/// Flate-compressed RGB samples of `image`, as stored in the page's XObject.
pub fn compress_samples(image: &RgbImage) -> Vec<u8> {
    compress_to_vec_zlib(image.as_raw(), COMPRESSION_LEVEL)
}

struct Objects {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl Objects {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Append the next object; ids are assigned in write order starting at 1.
    fn push(&mut self, dict: &str, stream: Option<&[u8]>) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{id} 0 obj\n{dict}\n").as_bytes());
        if let Some(data) = stream {
            self.buf.extend_from_slice(b"stream\n");
            self.buf.extend_from_slice(data);
            self.buf.extend_from_slice(b"\nendstream\n");
        }
        self.buf.extend_from_slice(b"endobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref = self.buf.len();
        let count = self.offsets.len() + 1;
        let mut table = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            table.push_str(&format!("{offset:010} 00000 n \n"));
        }
        table.push_str(&format!(
            "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n"
        ));
        self.buf.extend_from_slice(table.as_bytes());
        self.buf
    }
}

/// Serialize `images` as a PDF document, one page per image.
pub fn document(images: &[RgbImage], dpi: u32) -> Vec<u8> {
    // 1: catalog, 2: page tree, then page, content and image for each page
    let page_id = |i: usize| 3 + 3 * i;
    let kids: Vec<String> = (0..images.len()).map(|i| format!("{} 0 R", page_id(i))).collect();

    let mut objects = Objects::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>", None);
    objects.push(
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            images.len()
        ),
        None,
    );

    for (i, image) in images.iter().enumerate() {
        let (w, h) = (points(image.width(), dpi), points(image.height(), dpi));
        let content_id = page_id(i) + 1;
        let image_id = page_id(i) + 2;

        objects.push(
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w:.2} {h:.2}] \
                 /Resources << /XObject << /Im0 {image_id} 0 R >> >> /Contents {content_id} 0 R >>"
            ),
            None,
        );

        let content = format!("q {w:.2} 0 0 {h:.2} 0 0 cm /Im0 Do Q");
        objects.push(
            &format!("<< /Length {} >>", content.len()),
            Some(content.as_bytes()),
        );

        let samples = compress_samples(image);
        objects.push(
            &format!(
                "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
                 /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>",
                image.width(),
                image.height(),
                samples.len()
            ),
            Some(&samples),
        );
    }

    objects.finish()
}

pub fn write_pdf<W: Write>(images: &[RgbImage], dpi: u32, mut out: W) -> io::Result<()> {
    out.write_all(&document(images, dpi))?;
    out.flush()
}
