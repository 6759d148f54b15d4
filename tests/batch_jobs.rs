//! End-to-end runs of both jobs against a throwaway site tree.
//!
//! Builds the layout the jobs expect (an image root with per-post
//! subdirectories and a document directory next to an existing index), then
//! checks that the compressed files and the appended records line up.

use image::{ImageEncoder, RgbaImage};
use serde_json::{Value, json};
use site_upkeep::compress::{self, CompressError};
use site_upkeep::config::{ExtractConfig, UpkeepConfig, load_config};
use site_upkeep::extract::{self, ExtractError};
use site_upkeep::imaging::{CompressionLevel, RustBackend};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, 200, 255])
    });
    let file = fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}

struct Site {
    _tmp: TempDir,
    images: PathBuf,
    extract: ExtractConfig,
}

fn site() -> Site {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("public/images");
    for post in ["kyoto", "lisbon"] {
        fs::create_dir_all(images.join(post)).unwrap();
        write_png(&images.join(post).join("main.png"), 120, 90);
    }
    fs::create_dir_all(images.join("empty")).unwrap();

    let source_dir = tmp.path().join("page-old");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(
        source_dir.join("kyoto.mdx"),
        "---\ntitle: Night walk in Kyoto\ndescription: Lanterns and rain\nkeywords: travel, japan\nthumbnail: /images/kyoto/main.png\ndate: 2023-04-01\n---\n\nIt rained.\n",
    )
    .unwrap();

    let index = tmp.path().join("blog.json");
    fs::write(
        &index,
        r#"[
  {
    "title": "A",
    "description": "",
    "tags": [""],
    "link": "/blog/a",
    "image": "",
    "date": "2022-01-01"
  }
]"#,
    )
    .unwrap();

    Site {
        images,
        extract: ExtractConfig {
            source_dir,
            index,
            ..ExtractConfig::default()
        },
        _tmp: tmp,
    }
}

#[test]
fn compressed_thumbnails_match_index_images() {
    let site = site();

    let report = compress::compress(
        &RustBackend::new(),
        &site.images,
        "main.png",
        CompressionLevel::default(),
    )
    .unwrap();
    assert_eq!(report.compressed.len(), 2);
    assert_eq!(report.skipped, vec![site.images.join("empty")]);

    let extracted = extract::extract(&site.extract).unwrap();
    assert_eq!(extracted.added.len(), 1);

    let index: Value = serde_json::from_str(&fs::read_to_string(&site.extract.index).unwrap()).unwrap();
    let entries = index.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "A");
    assert_eq!(
        entries[1],
        json!({
            "title": "Night walk in Kyoto",
            "description": "Lanterns and rain",
            "tags": ["travel", "japan"],
            "link": "/blog/kyoto",
            "image": "/images/kyoto/main-min.png",
            "date": "2023-04-01"
        })
    );

    // The record's image resolves to a file the compressor wrote.
    let image_rel = entries[1]["image"].as_str().unwrap().trim_start_matches("/images/");
    let written = site.images.join(image_rel);
    let decoded = image::open(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 90));
}

#[test]
fn compressed_pixels_match_source() {
    let site = site();
    compress::compress(
        &RustBackend::new(),
        &site.images,
        "main.png",
        CompressionLevel::new(6),
    )
    .unwrap();

    let source = image::open(site.images.join("lisbon/main.png")).unwrap();
    let output = image::open(site.images.join("lisbon/main-min.png")).unwrap();
    assert_eq!(source.to_rgba8(), output.to_rgba8());
}

#[test]
fn invalid_document_aborts_without_touching_index() {
    let site = site();
    let before = fs::read_to_string(&site.extract.index).unwrap();
    fs::write(
        site.extract.source_dir.join("broken.mdx"),
        "---\ndate: 2023-04-02\n---\nno title\n",
    )
    .unwrap();

    let result = extract::extract(&site.extract);
    assert!(matches!(
        result,
        Err(ExtractError::MissingField { field: "title", .. })
    ));
    assert_eq!(fs::read_to_string(&site.extract.index).unwrap(), before);
}

#[test]
fn corrupt_thumbnail_aborts_compress() {
    let site = site();
    fs::write(site.images.join("kyoto/main.png"), "not a png").unwrap();

    let result = compress::compress(
        &RustBackend::new(),
        &site.images,
        "main.png",
        CompressionLevel::default(),
    );
    assert!(matches!(result, Err(CompressError::Imaging(_))));
}

#[test]
fn config_file_drives_both_jobs() {
    let site = site();
    let config_path = site.images.parent().unwrap().join("site-upkeep.toml");
    fs::write(
        &config_path,
        format!(
            "[compress]\nroot = {:?}\nlevel = 3\n\n[extract]\nsource_dir = {:?}\nindex = {:?}\nlink_prefix = \"/posts\"\n",
            site.images.to_string_lossy(),
            site.extract.source_dir.to_string_lossy(),
            site.extract.index.to_string_lossy(),
        ),
    )
    .unwrap();

    let config: UpkeepConfig = load_config(&config_path).unwrap();
    assert_eq!(config.compress.level, 3);

    let report = extract::extract(&config.extract).unwrap();
    assert_eq!(report.added[0].link, "/posts/kyoto");
}
