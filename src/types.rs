//! Records written to the metadata index.
//!
//! The index is a JSON array consumed by the site's front end, so field names
//! and order here are a wire format: `title`, `description`, `tags`, `link`,
//! `image`, `date`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-day form of [`DocumentRecord::date`], as chrono's serde writes it.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metadata for one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// `/blog/<file stem>` by default.
    pub link: String,
    /// Path of the compressed thumbnail, or empty.
    pub image: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}
