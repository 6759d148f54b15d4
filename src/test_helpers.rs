//! Shared test utilities: synthetic PNGs, documents, and index files.

use image::{ImageEncoder, RgbImage};
use std::path::Path;

// =========================================================================
// Fixture writers
// =========================================================================

/// Write a small gradient PNG with the given dimensions.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write `<dir>/<file_name>` with a minimal valid front-matter header.
pub fn write_document(dir: &Path, file_name: &str, title: &str, date: &str) {
    let content = format!("---\ntitle: {title}\ndate: {date}\n---\n\nBody of {title}.\n");
    std::fs::write(dir.join(file_name), content).unwrap();
}

/// Write raw index JSON.
pub fn write_index(path: &Path, json: &str) {
    std::fs::write(path, json).unwrap();
}
