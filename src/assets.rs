//! Static asset fingerprinting and copying.
//!
//! Every file under `<source>/assets/` is published as
//! `assets/<stem>.<hash8>.<ext>`, where `hash8` is the first eight hex digits
//! of the SHA-256 of its contents. Fingerprinted names can be cached forever
//! by the browser; a changed image gets a new URL.
//!
//! ## Manifest
//!
//! The [`AssetManifest`] maps logical references (the `assets/before.jpg` a
//! user writes in `landing.toml`) to published paths, together with pixel
//! dimensions for raster images. Page rendering resolves every image
//! reference through it, so a typo in the config is a build error rather
//! than a broken image:
//!
//! ```json
//! {
//!   "assets/before.jpg": {
//!     "output": "assets/before.3f2a9c1e.jpg",
//!     "hash": "3f2a9c1e…",
//!     "dimensions": [1600, 1067],
//!     "bytes": 245123
//!   }
//! }
//! ```
//!
//! References that do not start with `assets/` (absolute URLs, `/…` paths)
//! pass through untouched.
//!
//! Hashing and dimension probing run in parallel on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Directory name of static assets, in both source and output.
pub const ASSETS_DIR: &str = "assets";

const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Referenced asset not found: {0}")]
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Published path relative to the output root.
    pub output: String,
    /// SHA-256 of the contents, hex.
    pub hash: String,
    /// Pixel dimensions for raster images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetManifest {
    pub entries: BTreeMap<String, AssetEntry>,
}

impl AssetManifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, reference: &str) -> Option<&AssetEntry> {
        self.entries.get(reference)
    }

    /// Resolve an image reference to the URL the page should use.
    pub fn resolve(&self, reference: &str) -> Result<String, AssetError> {
        if !is_local_reference(reference) {
            return Ok(reference.to_string());
        }
        self.get(reference)
            .map(|entry| entry.output.clone())
            .ok_or_else(|| AssetError::Missing(reference.to_string()))
    }

    /// Pixel dimensions of a local raster asset, if known.
    pub fn dimensions(&self, reference: &str) -> Option<(u32, u32)> {
        self.get(reference).and_then(|entry| entry.dimensions)
    }
}

/// Whether a reference points into the source `assets/` directory.
pub fn is_local_reference(reference: &str) -> bool {
    reference.starts_with("assets/")
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Insert the first eight hash digits before the extension:
/// `steps/upload.png` → `steps/upload.1a2b3c4d.png`.
pub fn fingerprinted_name(relative: &str, hash: &str) -> String {
    let short = &hash[..hash.len().min(8)];
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, relative),
    };
    let renamed = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{short}.{ext}"),
        _ => format!("{file}.{short}"),
    };
    match dir {
        Some(dir) => format!("{dir}/{renamed}"),
        None => renamed,
    }
}

fn is_raster(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RASTER_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Logical reference for a file below `assets_root`, always `/`-separated.
fn logical_reference(assets_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(assets_root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{ASSETS_DIR}/{}", parts.join("/"))
}

/// All files below `<source>/assets/`, sorted. Missing directory → empty.
pub fn collect_assets(source: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let root = source.join(ASSETS_DIR);
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn describe(assets_root: &Path, path: &Path) -> Result<(String, AssetEntry), AssetError> {
    let reference = logical_reference(assets_root, path);
    let hash = hash_file(path)?;
    let bytes = fs::metadata(path)?.len();
    let dimensions = if is_raster(path) {
        let dims = image::image_dimensions(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Some(dims)
    } else {
        None
    };
    let output = fingerprinted_name(&reference, &hash);
    Ok((
        reference,
        AssetEntry {
            output,
            hash,
            dimensions,
            bytes,
        },
    ))
}

/// Hash and probe every asset without writing anything.
pub fn plan_assets(source: &Path) -> Result<AssetManifest, AssetError> {
    let files = collect_assets(source)?;
    let assets_root = source.join(ASSETS_DIR);
    let entries = files
        .par_iter()
        .map(|path| describe(&assets_root, path))
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(AssetManifest { entries })
}

/// Copy every planned asset to its fingerprinted path under `output`.
pub fn copy_assets(
    source: &Path,
    manifest: &AssetManifest,
    output: &Path,
) -> Result<(), AssetError> {
    manifest
        .entries
        .par_iter()
        .try_for_each(|(reference, entry)| -> Result<(), AssetError> {
            let src = source.join(reference);
            let dst = output.join(&entry.output);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&src, &dst)?;
            debug!(from = %src.display(), to = %dst.display(), "copied asset");
            Ok(())
        })
}
