//! Reconstruct the `sea-config.json` a bundle was built from.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{SeaBlob, SeaFlags, ASSETS_DIR, MAIN_FILE, OUTPUT_BLOB};

/// The build configuration projected back out of a decoded bundle.
///
/// Serializes to the same shape Node's `--experimental-sea-config` consumes:
/// boolean keys appear only for flag bits that were set, and `assets` maps
/// each name to its unpacked location under the assets directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeaConfig {
    pub main: String,
    pub output: String,
    #[serde(
        rename = "disableExperimentalSEAWarning",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_experimental_sea_warning: Option<bool>,
    #[serde(rename = "useSnapshot", skip_serializing_if = "Option::is_none")]
    pub use_snapshot: Option<bool>,
    #[serde(rename = "useCodeCache", skip_serializing_if = "Option::is_none")]
    pub use_code_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<BTreeMap<String, String>>,
}

impl SeaBlob {
    /// Project this bundle's flags and assets into a [`SeaConfig`].
    ///
    /// Pure; no I/O. Asset paths are relative joins of the assets directory
    /// and the asset name, regardless of whether anything gets written.
    pub fn create_config(&self) -> SeaConfig {
        let flag_key = |flag: SeaFlags| self.flags.contains(flag).then_some(true);

        SeaConfig {
            main: MAIN_FILE.to_string(),
            output: OUTPUT_BLOB.to_string(),
            disable_experimental_sea_warning: flag_key(SeaFlags::DISABLE_EXPERIMENTAL_SEA_WARNING),
            use_snapshot: flag_key(SeaFlags::USE_SNAPSHOT),
            use_code_cache: flag_key(SeaFlags::USE_CODE_CACHE),
            assets: self.assets.as_ref().map(|assets| {
                assets
                    .keys()
                    .map(|name| (name.clone(), format!("{}/{}", ASSETS_DIR, name)))
                    .collect()
            }),
        }
    }
}
