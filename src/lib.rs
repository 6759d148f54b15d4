//! # site-upkeep
//!
//! Maintenance jobs for a personal site. Two independent batch passes share
//! one naming convention:
//!
//! ```text
//! compress   public/images/*/main.png  →  public/images/*/main-min.png
//! extract    page-old/*.mdx            →  blog.json (records appended)
//! ```
//!
//! The extractor rewrites each document's `thumbnail` to the `-min` file the
//! compressor produces, so the index points at compressed images even though
//! the two jobs never talk to each other at run time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compress`] | Walks the image root and re-encodes every `main.png` |
//! | [`extract`] | Builds records from front matter and appends them to the index |
//! | [`frontmatter`] | Splits a `---`-delimited YAML header from the document body |
//! | [`imaging`] | Backend trait plus the pure-Rust PNG encoder |
//! | [`naming`] | `-min` variants and document links |
//! | [`types`] | The index record and its JSON shape |
//! | [`config`] | `site-upkeep.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Model
//!
//! Both jobs are single-threaded and stop at the first error. The extractor
//! builds every record before it opens the index, so a bad document never
//! leaves a half-written index behind. The index itself has no locking: two
//! concurrent extractor runs race and the last writer wins.

pub mod compress;
pub mod config;
pub mod extract;
pub mod frontmatter;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
