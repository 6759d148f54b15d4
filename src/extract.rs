//! Front-matter metadata extraction into the JSON index.
//!
//! Scans one directory (non-recursively) for documents, turns each document's
//! front matter into a [`DocumentRecord`], and appends all of them to the end
//! of an existing JSON array on disk.
//!
//! ## Field Mapping
//!
//! | Front matter | Record | Rule |
//! |---|---|---|
//! | `title` | `title` | required |
//! | `description` | `description` | optional, default `""` |
//! | `keywords` | `tags` | split on `", "` |
//! | *(file name)* | `link` | `<link_prefix>/<stem>` |
//! | `thumbnail` | `image` | `-min` inserted before the extension |
//! | `date` | `date` | required, written as `YYYY-MM-DD` |
//!
//! An absent `keywords` splits like an empty string and gives `[""]`, which
//! is what existing index consumers already see.
//!
//! ## Persistence
//!
//! Every record is built before the index is opened, so a bad document aborts
//! the run with the index untouched. The index is then read whole, extended,
//! and rewritten whole with two-space indentation. Existing entries are kept
//! verbatim: nothing is deduplicated, so running twice appends twice.

use crate::config::ExtractConfig;
use crate::frontmatter::{self, Frontmatter, FrontmatterError, scalar_to_string};
use crate::naming::{document_link, min_variant};
use crate::types::DocumentRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between entries of the `keywords` field.
pub const KEYWORD_SEPARATOR: &str = ", ";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    #[error("{path}: `date` is not a calendar date: {value}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("Index file not found: {0}")]
    IndexMissing(PathBuf),
    #[error("Index {path} is not valid JSON: {source}")]
    IndexJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Index {0} must contain a JSON array")]
    NotAnArray(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a full extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    /// Records appended, in the order they were written.
    pub added: Vec<DocumentRecord>,
    /// Entries in the index after the append.
    pub total: usize,
}

/// Documents directly inside `source_dir`, in directory-listing order.
pub fn list_documents(source_dir: &Path, config: &ExtractConfig) -> Result<Vec<PathBuf>, ExtractError> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let path = entry?.path();
        if path.is_file() && config.is_document(&path) {
            documents.push(path);
        }
    }
    Ok(documents)
}

/// Build the record for a single document.
pub fn extract_record(path: &Path, link_prefix: &str) -> Result<DocumentRecord, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let fm = frontmatter::parse_frontmatter(&content).map_err(|source| {
        ExtractError::Frontmatter {
            path: path.to_path_buf(),
            source,
        }
    })?;
    record_from_frontmatter(path, &fm, link_prefix)
}

/// Map parsed front matter onto a record. `path` supplies the link and error context.
pub fn record_from_frontmatter(
    path: &Path,
    fm: &Frontmatter,
    link_prefix: &str,
) -> Result<DocumentRecord, ExtractError> {
    let title = fm.get_str("title").ok_or_else(|| ExtractError::MissingField {
        path: path.to_path_buf(),
        field: "title",
    })?;
    let description = fm.get_str("description").unwrap_or_default();
    let tags = split_keywords(fm.get("keywords"));

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let link = document_link(link_prefix, &file_name);

    let image = match fm.get_str("thumbnail") {
        Some(thumb) if !thumb.is_empty() => min_variant(&thumb),
        _ => String::new(),
    };

    let raw_date = fm.get_str("date").ok_or_else(|| ExtractError::MissingField {
        path: path.to_path_buf(),
        field: "date",
    })?;
    let date = parse_date(&raw_date).ok_or_else(|| ExtractError::InvalidDate {
        path: path.to_path_buf(),
        value: raw_date.clone(),
    })?;

    Ok(DocumentRecord {
        title,
        description,
        tags,
        link,
        image,
        date,
    })
}

/// Tags from the `keywords` field.
///
/// A string is split on [`KEYWORD_SEPARATOR`]; absent or empty gives `[""]`.
/// A YAML sequence contributes its scalar items as-is.
fn split_keywords(value: Option<&serde_yaml::Value>) -> Vec<String> {
    match value {
        Some(serde_yaml::Value::Sequence(items)) => {
            items.iter().filter_map(scalar_to_string).collect()
        }
        other => {
            let raw = other.and_then(scalar_to_string).unwrap_or_default();
            raw.split(KEYWORD_SEPARATOR).map(str::to_string).collect()
        }
    }
}

/// Parse a front-matter date, keeping only the calendar day.
///
/// Accepts a bare `2023-04-01` and the YAML timestamp forms built on it:
/// `T` or space separated, optional fractional seconds, and an optional
/// offset written as `Z`, `+09:00` or ` +09:00`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in [
        "%Y-%m-%d %H:%M:%S%.f %:z",
        "%Y-%m-%d %H:%M:%S%.f %z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.date_naive());
        }
    }
    None
}

/// Build records for every document in the source directory.
///
/// Read-only: stops at the first document that fails.
pub fn collect_records(config: &ExtractConfig) -> Result<Vec<DocumentRecord>, ExtractError> {
    let documents = list_documents(&config.source_dir, config)?;
    let mut records = Vec::with_capacity(documents.len());
    for path in &documents {
        log::debug!("extracting {}", path.display());
        records.push(extract_record(path, &config.link_prefix)?);
    }
    Ok(records)
}

/// Load the index as a JSON array, keeping entries exactly as stored.
pub fn load_index(index_path: &Path) -> Result<Vec<Value>, ExtractError> {
    if !index_path.is_file() {
        return Err(ExtractError::IndexMissing(index_path.to_path_buf()));
    }
    let content = fs::read_to_string(index_path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ExtractError::IndexJson {
        path: index_path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(entries) => Ok(entries),
        _ => Err(ExtractError::NotAnArray(index_path.to_path_buf())),
    }
}

/// Append `records` to the index and rewrite the whole file. Returns the new length.
pub fn append_to_index(index_path: &Path, records: &[DocumentRecord]) -> Result<usize, ExtractError> {
    let mut entries = load_index(index_path)?;
    for record in records {
        entries.push(serde_json::to_value(record)?);
    }
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(index_path, json)?;
    log::info!(
        "wrote {} ({} entries, {} new)",
        index_path.display(),
        entries.len(),
        records.len()
    );
    Ok(entries.len())
}

/// Run the extractor: build all records, then append them to the index.
pub fn extract(config: &ExtractConfig) -> Result<ExtractReport, ExtractError> {
    let added = collect_records(config)?;
    let total = append_to_index(&config.index, &added)?;
    Ok(ExtractReport { added, total })
}
