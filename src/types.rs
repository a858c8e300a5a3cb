//! Core types for SEA bundle extraction.
//!
//! This module defines the decoded bundle record and the flag bits that
//! gate its optional sections.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::BitOr;

/// Name of the main script written when unpacking a bundle.
pub const MAIN_FILE: &str = "sea.js";
/// Name of the code cache file written when the bundle carries one.
pub const CACHE_FILE: &str = "sea.jsc";
/// Directory that bundled assets are unpacked into.
pub const ASSETS_DIR: &str = "sea_assets";
/// Blob output name used in the reconstructed `sea-config.json`.
pub const OUTPUT_BLOB: &str = "sea.blob";

/// SEA bundle flags, combined by bitwise OR.
///
/// These mirror the flag bits Node writes into the blob header. The
/// `USE_CODE_CACHE` and `INCLUDE_ASSETS` bits gate optional trailing
/// sections of the binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct SeaFlags(pub u32);

impl SeaFlags {
    /// No flags set
    pub const DEFAULT: SeaFlags = SeaFlags(0);
    /// Suppress the experimental-SEA warning at startup
    pub const DISABLE_EXPERIMENTAL_SEA_WARNING: SeaFlags = SeaFlags(1 << 0);
    /// Bundle was built from a V8 startup snapshot
    pub const USE_SNAPSHOT: SeaFlags = SeaFlags(1 << 1);
    /// Bundle carries a V8 code cache section
    pub const USE_CODE_CACHE: SeaFlags = SeaFlags(1 << 2);
    /// Bundle carries a named-asset section
    pub const INCLUDE_ASSETS: SeaFlags = SeaFlags(1 << 3);

    /// Check whether every bit in `other` is set in `self`.
    pub fn contains(self, other: SeaFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// The raw bitmask.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for SeaFlags {
    type Output = SeaFlags;

    fn bitor(self, rhs: SeaFlags) -> SeaFlags {
        SeaFlags(self.0 | rhs.0)
    }
}

/// A decoded SEA bundle.
///
/// Produced once per invocation by [`crate::decode_blob`] and read-only
/// afterward. The optional fields are coupled to the flag bits: `code_cache`
/// is present iff [`SeaFlags::USE_CODE_CACHE`] is set, `assets` iff
/// [`SeaFlags::INCLUDE_ASSETS`] is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeaBlob {
    /// Flag bits from the blob header
    pub flags: SeaFlags,
    /// Source file path recorded at build time; informational only,
    /// never used for filesystem access
    pub code_path: String,
    /// The bundled interpreter source
    pub code: String,
    /// V8 code cache bytes, opaque binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_cache: Option<Vec<u8>>,
    /// Bundled assets, name to content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<BTreeMap<String, String>>,
}
