//! Pure Rust image backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode | `image::ImageReader` (format guessed from content) |
//! | Identify | `image::image_dimensions` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` with adaptive filtering |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{CompressParams, CompressionLevel};
use image::codecs::png::{FilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Encode `img` as PNG at `path`, replacing any existing file.
fn save_png(img: &DynamicImage, path: &Path, level: CompressionLevel) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(&mut writer, level.compression_type(), FilterType::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    // Dropping a BufWriter swallows write errors; surface them here.
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Dimensions { width, height })
    }

    fn compress(&self, params: &CompressParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        save_png(&img, &params.output, params.level)
    }
}
