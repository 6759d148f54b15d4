//! Centralized filename conventions shared by both jobs.
//!
//! The compressor writes `main-min.png` next to `main.png`, and the extractor
//! rewrites each document's `thumbnail` to point at that compressed file. Both
//! sides go through [`min_variant`] so the two names can never drift apart.
//!
//! ## `-min` Variants
//!
//! The suffix goes in front of the extension of the *last* path component:
//! - `main.png` → `main-min.png`
//! - `/images/trip/main.png` → `/images/trip/main-min.png`
//! - `archive.tar.gz` → `archive.tar-min.gz`
//! - `README` → `README-min`
//! - `.hidden` → `.hidden-min` (leading dots are not an extension separator)
//! - `v1.2/cover` → `v1.2/cover-min` (dots in parent directories are ignored)

/// Suffix inserted before the extension of compressed outputs.
pub const MIN_SUFFIX: &str = "-min";

/// Insert [`MIN_SUFFIX`] before the extension of the last path component.
///
/// Accepts both URL-style (`/`) and Windows-style (`\`) separators, since
/// thumbnail values in front matter are site paths rather than OS paths.
pub fn min_variant(name: &str) -> String {
    let base_start = name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let base = &name[base_start..];

    match extension_dot(base) {
        Some(dot) => {
            let split = base_start + dot;
            format!("{}{}{}", &name[..split], MIN_SUFFIX, &name[split..])
        }
        None => format!("{name}{MIN_SUFFIX}"),
    }
}

/// Byte offset of the dot that starts the extension, if `base` has one.
///
/// Dots at the start of the name do not count, so `.hidden` and `..` have no
/// extension.
fn extension_dot(base: &str) -> Option<usize> {
    let dot = base.rfind('.')?;
    if base[..dot].chars().all(|c| c == '.') {
        None
    } else {
        Some(dot)
    }
}

/// Site link for a document: `<prefix>/<file name without extension>`.
///
/// Only the final extension is removed, so `a.b.mdx` links to `<prefix>/a.b`.
pub fn document_link(prefix: &str, file_name: &str) -> String {
    let stem = match extension_dot(file_name) {
        Some(dot) => &file_name[..dot],
        None => file_name,
    };
    format!("{}/{}", prefix.trim_end_matches('/'), stem)
}
