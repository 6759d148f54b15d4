//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the compressor needs:
//! identify and compress. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::CompressParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source` and write it to `params.output` as an optimized PNG.
    fn compress(&self, params: &CompressParams) -> Result<(), BackendError>;
}
