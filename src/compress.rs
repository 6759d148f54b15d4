//! Thumbnail compression.
//!
//! Every immediate subdirectory of the image root holds at most one thumbnail,
//! `main.png` by default. This job re-encodes each one as an optimized PNG
//! sitting right next to it:
//!
//! ```text
//! public/images/
//! ├── kyoto/
//! │   ├── main.png          # source, never touched
//! │   └── main-min.png      # written (or overwritten) by this job
//! ├── lisbon/
//! │   ├── main.png
//! │   └── main-min.png
//! └── drafts/               # no main.png: skipped, not an error
//!     └── sketch.jpg
//! ```
//!
//! ## Failure Model
//!
//! The job is a single sequential pass. The first thumbnail that fails to
//! decode or write aborts the whole run; thumbnails already written stay on
//! disk. A missing root is an empty run, not an error.
//!
//! Re-running is idempotent: the output is rebuilt from the same source bytes
//! at the same level every time.

use crate::imaging::{BackendError, CompressionLevel, Dimensions, ImageBackend, compress_thumbnail};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to list {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// Thumbnails found under the root, in subdirectory name order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ThumbnailScan {
    /// Source thumbnails to compress.
    pub sources: Vec<PathBuf>,
    /// Subdirectories that have no thumbnail.
    pub skipped: Vec<PathBuf>,
}

/// One thumbnail written by [`compress`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub dimensions: Dimensions,
    pub source_bytes: u64,
    pub output_bytes: u64,
}

impl CompressedImage {
    /// Bytes saved relative to the source; negative if the output grew.
    pub fn saved_bytes(&self) -> i64 {
        self.source_bytes as i64 - self.output_bytes as i64
    }
}

/// Outcome of a full compression run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressReport {
    pub compressed: Vec<CompressedImage>,
    pub skipped: Vec<PathBuf>,
}

impl CompressReport {
    pub fn total_source_bytes(&self) -> u64 {
        self.compressed.iter().map(|c| c.source_bytes).sum()
    }

    pub fn total_output_bytes(&self) -> u64 {
        self.compressed.iter().map(|c| c.output_bytes).sum()
    }
}

/// Find `<root>/<subdir>/<source_name>` for every immediate subdirectory.
///
/// Read-only; used on its own by `check` and as the first half of [`compress`].
pub fn scan_thumbnails(root: &Path, source_name: &str) -> Result<ThumbnailScan, CompressError> {
    let mut scan = ThumbnailScan::default();

    if !root.is_dir() {
        log::warn!("image root {} does not exist, nothing to compress", root.display());
        return Ok(scan);
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| CompressError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        // Follows symlinked directories too.
        if !entry.path().is_dir() {
            continue;
        }

        let candidate = entry.path().join(source_name);
        if candidate.is_file() {
            log::debug!("found thumbnail {}", candidate.display());
            scan.sources.push(candidate);
        } else {
            log::debug!("no {} in {}", source_name, entry.path().display());
            scan.skipped.push(entry.into_path());
        }
    }

    Ok(scan)
}

/// Compress every thumbnail under `root`, aborting on the first failure.
pub fn compress(
    backend: &impl ImageBackend,
    root: &Path,
    source_name: &str,
    level: CompressionLevel,
) -> Result<CompressReport, CompressError> {
    let scan = scan_thumbnails(root, source_name)?;
    let mut compressed = Vec::with_capacity(scan.sources.len());

    for source in &scan.sources {
        let (params, dimensions) = compress_thumbnail(backend, source, level)?;
        let source_bytes = fs::metadata(&params.source)?.len();
        let output_bytes = fs::metadata(&params.output)?.len();
        log::info!(
            "wrote {} ({} -> {} bytes)",
            params.output.display(),
            source_bytes,
            output_bytes
        );
        compressed.push(CompressedImage {
            source: params.source,
            output: params.output,
            dimensions,
            source_bytes,
            output_bytes,
        });
    }

    Ok(CompressReport {
        compressed,
        skipped: scan.skipped,
    })
}
