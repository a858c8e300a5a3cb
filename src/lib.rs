//! # unsea - Node.js SEA bundle extraction
//!
//! This library locates and decodes the data blob that `node --experimental-sea-config`
//! plus `postject` embed into a single-executable application (SEA), turning
//! a compiled binary back into its inputs: the bundled script, an optional
//! V8 code cache, and optional named assets.
//!
//! ## Background
//!
//! The SEA blob is injected post-build, and each executable format hides it
//! behind a different marker:
//!
//! - ELF: a note named `NODE_SEA_BLOB`
//! - PE: a resource directory entry named `NODE_SEA_BLOB`
//! - Mach-O: a `__POSTJECT` segment
//!
//! The blob itself is a little-endian, length-prefixed record with two
//! optional trailing sections gated by a flags bitmask. Extraction is
//! one-directional: nothing here re-injects or modifies binaries.
//!
//! ## Usage
//!
//! ```no_run
//! let data = std::fs::read("my_sea_app").unwrap();
//! let sea = unsea::parse_sea(&data).unwrap();
//!
//! println!("built from {}", sea.code_path);
//! println!("{}", serde_json::to_string_pretty(&sea.create_config()).unwrap());
//! ```

mod config;
mod decode;
mod error;
mod locate;
mod types;
mod unpack;

pub use config::SeaConfig;
pub use decode::{decode_blob, SeaReader};
pub use error::SeaError;
pub use locate::{
    locate_blob, read_from_elf, read_from_macho, read_from_pe, SEA_NOTE_NAME, SEA_SEGMENT_NAME,
};
pub use types::{SeaBlob, SeaFlags, ASSETS_DIR, CACHE_FILE, MAIN_FILE, OUTPUT_BLOB};
pub use unpack::{is_safe_asset_name, write_bundle};

// Re-export goblin so library clients can parse binaries themselves
pub use goblin;

/// Locate and decode the SEA bundle embedded in an executable.
///
/// Convenience over [`locate_blob`] followed by [`decode_blob`]; the input
/// buffer is borrowed, never mutated, and the decode allocates its own
/// strings.
pub fn parse_sea(data: &[u8]) -> Result<SeaBlob, SeaError> {
    let blob = locate_blob(data)?;
    decode_blob(blob)
}
