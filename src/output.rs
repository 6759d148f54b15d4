//! CLI output formatting for both jobs.
//!
//! # Output Format
//!
//! ## Compress
//!
//! ```text
//! Thumbnails
//! 001 kyoto
//!     Source: kyoto/main.png (640x480)
//!     Output: kyoto/main-min.png (48.2 KB → 31.0 KB, saved 35%)
//! 002 lisbon
//!     ...
//!
//! Skipped
//!     drafts/
//!
//! Compressed 2 thumbnails (96.4 KB → 62.0 KB)
//! ```
//!
//! ## Extract
//!
//! ```text
//! Records
//! 001 Night walk in Kyoto
//!     Link: /blog/night-walk
//!     Date: 2023-04-01
//!     Image: /images/kyoto/main-min.png
//!
//! Metadata from 1 documents added to blog.json
//! Index now holds 12 entries
//! ```
//!
//! # Architecture
//!
//! Each job has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::compress::{CompressReport, CompressedImage, ThumbnailScan};
use crate::extract::ExtractReport;
use crate::types::DocumentRecord;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `path` relative to `root` when possible, for compact display.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Name of the directory holding `path`.
fn parent_name(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Human-readable byte count: `512 B`, `48.2 KB`, `3.1 MB`.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Percentage saved, or grown, relative to the source size.
fn savings(image: &CompressedImage) -> String {
    if image.source_bytes == 0 {
        return "n/a".to_string();
    }
    let pct = image.saved_bytes() as f64 / image.source_bytes as f64 * 100.0;
    if pct >= 0.0 {
        format!("saved {:.0}%", pct)
    } else {
        format!("grew {:.0}%", -pct)
    }
}

fn record_lines(index: usize, record: &DocumentRecord) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", format_index(index), record.title),
        format!("    Link: {}", record.link),
        format!("    Date: {}", record.date.format(crate::types::DATE_FORMAT)),
    ];
    if !record.image.is_empty() {
        lines.push(format!("    Image: {}", record.image));
    }
    lines
}

fn skipped_lines(skipped: &[std::path::PathBuf], root: &Path) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Skipped".to_string()];
    for dir in skipped {
        lines.push(format!("    {}/", relative(dir, root)));
    }
    lines
}

// ============================================================================
// Compress output
// ============================================================================

/// Format the result of a compression run.
pub fn format_compress_output(report: &CompressReport, root: &Path) -> Vec<String> {
    let mut lines = vec!["Thumbnails".to_string()];

    for (i, image) in report.compressed.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            parent_name(&image.source)
        ));
        lines.push(format!(
            "    Source: {} ({}x{})",
            relative(&image.source, root),
            image.dimensions.width,
            image.dimensions.height
        ));
        lines.push(format!(
            "    Output: {} ({} → {}, {})",
            relative(&image.output, root),
            format_bytes(image.source_bytes),
            format_bytes(image.output_bytes),
            savings(image)
        ));
    }

    lines.extend(skipped_lines(&report.skipped, root));

    lines.push(String::new());
    lines.push(format!(
        "Compressed {} thumbnails ({} → {})",
        report.compressed.len(),
        format_bytes(report.total_source_bytes()),
        format_bytes(report.total_output_bytes())
    ));
    lines
}

/// Print compression output to stdout.
pub fn print_compress_output(report: &CompressReport, root: &Path) {
    for line in format_compress_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Extract output
// ============================================================================

/// Format the result of an extraction run.
pub fn format_extract_output(report: &ExtractReport, index_path: &Path) -> Vec<String> {
    let mut lines = vec!["Records".to_string()];
    for (i, record) in report.added.iter().enumerate() {
        lines.extend(record_lines(i + 1, record));
    }
    lines.push(String::new());
    lines.push(format!(
        "Metadata from {} documents added to {}",
        report.added.len(),
        index_path.display()
    ));
    lines.push(format!("Index now holds {} entries", report.total));
    lines
}

/// Print extraction output to stdout.
pub fn print_extract_output(report: &ExtractReport, index_path: &Path) {
    for line in format_extract_output(report, index_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the dry-run view of both jobs: what would be written, nothing more.
pub fn format_check_output(
    scan: &ThumbnailScan,
    image_root: &Path,
    records: &[DocumentRecord],
) -> Vec<String> {
    let mut lines = vec!["Thumbnails".to_string()];
    for (i, source) in scan.sources.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            relative(source, image_root)
        ));
    }
    lines.extend(skipped_lines(&scan.skipped, image_root));

    lines.push(String::new());
    lines.push("Records".to_string());
    for (i, record) in records.iter().enumerate() {
        lines.extend(record_lines(i + 1, record));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} thumbnails to compress, {} records to append",
        scan.sources.len(),
        records.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(scan: &ThumbnailScan, image_root: &Path, records: &[DocumentRecord]) {
    for line in format_check_output(scan, image_root, records) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn record(title: &str, image: &str) -> DocumentRecord {
        DocumentRecord {
            title: title.to_string(),
            description: String::new(),
            tags: vec![String::new()],
            link: format!("/blog/{}", title.to_lowercase()),
            image: image.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn savings_direction() {
        let sized = |source_bytes, output_bytes| CompressedImage {
            source: PathBuf::from("a/main.png"),
            output: PathBuf::from("a/main-min.png"),
            dimensions: Dimensions { width: 1, height: 1 },
            source_bytes,
            output_bytes,
        };
        assert_eq!(savings(&sized(100, 65)), "saved 35%");
        assert_eq!(savings(&sized(100, 120)), "grew 20%");
        assert_eq!(savings(&sized(0, 10)), "n/a");
    }

    #[test]
    fn compress_output_lists_images_and_skips() {
        let root = PathBuf::from("/site/images");
        let report = CompressReport {
            compressed: vec![CompressedImage {
                source: root.join("kyoto/main.png"),
                output: root.join("kyoto/main-min.png"),
                dimensions: Dimensions {
                    width: 640,
                    height: 480,
                },
                source_bytes: 2048,
                output_bytes: 1024,
            }],
            skipped: vec![root.join("drafts")],
        };

        let lines = format_compress_output(&report, &root);
        assert_eq!(
            lines,
            vec![
                "Thumbnails",
                "001 kyoto",
                "    Source: kyoto/main.png (640x480)",
                "    Output: kyoto/main-min.png (2.0 KB → 1.0 KB, saved 50%)",
                "",
                "Skipped",
                "    drafts/",
                "",
                "Compressed 1 thumbnails (2.0 KB → 1.0 KB)",
            ]
        );
    }

    #[test]
    fn empty_compress_output_has_summary_only() {
        let lines = format_compress_output(&CompressReport::default(), Path::new("/x"));
        assert_eq!(lines, vec!["Thumbnails", "", "Compressed 0 thumbnails (0 B → 0 B)"]);
    }

    #[test]
    fn extract_output_reports_count() {
        let report = ExtractReport {
            added: vec![record("Kyoto", "/images/kyoto/main-min.png"), record("Lisbon", "")],
            total: 5,
        };
        let lines = format_extract_output(&report, Path::new("blog.json"));

        assert_eq!(lines[0], "Records");
        assert_eq!(lines[1], "001 Kyoto");
        assert_eq!(lines[2], "    Link: /blog/kyoto");
        assert_eq!(lines[3], "    Date: 2023-04-01");
        assert_eq!(lines[4], "    Image: /images/kyoto/main-min.png");
        assert_eq!(lines[5], "002 Lisbon");
        assert!(!lines.iter().any(|l| l == "    Image: "));
        assert_eq!(
            lines[lines.len() - 2],
            "Metadata from 2 documents added to blog.json"
        );
        assert_eq!(lines.last().unwrap(), "Index now holds 5 entries");
    }

    #[test]
    fn check_output_summarizes_both_jobs() {
        let root = PathBuf::from("/img");
        let scan = ThumbnailScan {
            sources: vec![root.join("a/main.png")],
            skipped: vec![],
        };
        let lines = format_check_output(&scan, &root, &[record("A", "")]);
        assert_eq!(lines[1], "001 a/main.png");
        assert!(lines.contains(&"Records".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "1 thumbnails to compress, 1 records to append"
        );
    }
}
