//! High-level image operations.
//!
//! These functions decide the output file for a thumbnail and hand the work
//! to a backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{CompressParams, CompressionLevel};
use crate::naming::min_variant;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Sibling path for the compressed copy of `source` (`main.png` → `main-min.png`).
pub fn min_output_path(source: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    source.with_file_name(min_variant(&file_name))
}

/// Plan a compression without executing it.
pub fn plan_compression(source: &Path, level: CompressionLevel) -> CompressParams {
    CompressParams {
        source: source.to_path_buf(),
        output: min_output_path(source),
        level,
    }
}

/// Compress `source` into its `-min` sibling and return the plan that ran,
/// along with the source dimensions.
pub fn compress_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    level: CompressionLevel,
) -> Result<(CompressParams, Dimensions)> {
    let dims = backend.identify(source)?;
    let params = plan_compression(source, level);
    backend.compress(&params)?;
    Ok((params, dims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn output_path_is_min_sibling() {
        assert_eq!(
            min_output_path(Path::new("/site/images/kyoto/main.png")),
            PathBuf::from("/site/images/kyoto/main-min.png")
        );
    }

    #[test]
    fn plan_carries_level() {
        let params = plan_compression(Path::new("a/main.png"), CompressionLevel::new(3));
        assert_eq!(params.source, PathBuf::from("a/main.png"));
        assert_eq!(params.output, PathBuf::from("a/main-min.png"));
        assert_eq!(params.level.value(), 3);
    }

    #[test]
    fn compress_thumbnail_identifies_then_compresses() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 640,
            height: 480,
        }]);

        let (params, dims) =
            compress_thumbnail(&backend, Path::new("a/main.png"), CompressionLevel::default())
                .unwrap();

        assert_eq!(dims.width, 640);
        assert_eq!(params.output, PathBuf::from("a/main-min.png"));
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Identify("a/main.png".to_string()),
                RecordedOp::Compress {
                    source: "a/main.png".to_string(),
                    output: "a/main-min.png".to_string(),
                    level: 9,
                },
            ]
        );
    }
}
