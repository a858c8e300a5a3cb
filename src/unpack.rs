//! Write a decoded bundle's contents out to disk.

use std::fs;
use std::path::{Component, Path};

use crate::error::SeaError;
use crate::types::{SeaBlob, ASSETS_DIR, CACHE_FILE, MAIN_FILE};

/// Check that an asset name stays inside the assets directory when joined
/// onto it.
///
/// The check is lexical: absolute names and any `..`, root, or drive-prefix
/// component are rejected. Nothing written here creates symlinks, so a name
/// that passes cannot resolve outside the directory.
pub fn is_safe_asset_name(name: &str) -> bool {
    let path = Path::new(name);
    if path.is_absolute() {
        return false;
    }
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Unpack a bundle into `out_dir`.
///
/// Writes the main script as `sea.js`, the code cache (if present) as
/// `sea.jsc`, and each asset under `sea_assets/`, creating directories as
/// needed. Asset names may contain subdirectories. An asset whose name
/// fails [`is_safe_asset_name`] aborts the whole unpack before anything is
/// written for it.
pub fn write_bundle(sea: &SeaBlob, out_dir: &Path) -> Result<(), SeaError> {
    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join(MAIN_FILE), &sea.code)?;

    if let Some(cache) = &sea.code_cache {
        fs::write(out_dir.join(CACHE_FILE), cache)?;
    }

    if let Some(assets) = &sea.assets {
        let assets_dir = out_dir.join(ASSETS_DIR);
        fs::create_dir_all(&assets_dir)?;

        for (name, content) in assets {
            if !is_safe_asset_name(name) {
                return Err(SeaError::UnsafeAssetPath(name.clone()));
            }
            let asset_path = assets_dir.join(name);
            if let Some(parent) = asset_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(asset_path, content)?;
        }
    }

    Ok(())
}
