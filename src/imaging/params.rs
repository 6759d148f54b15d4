//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which decides which
//! files to write) and the [`backend`](super::backend) (which does the pixel
//! work), so a mock backend can stand in during tests.

use image::codecs::png::CompressionType;
use std::path::PathBuf;

/// PNG compression effort (0-9), clamped on construction.
///
/// PNG is lossless, so the level only trades encoding time for file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Encoder setting for this level: 0-3 fast, 4-6 default, 7-9 best.
    pub fn compression_type(self) -> CompressionType {
        match self.0 {
            0..=3 => CompressionType::Fast,
            4..=6 => CompressionType::Default,
            _ => CompressionType::Best,
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// Parameters for re-encoding one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub level: CompressionLevel,
}
