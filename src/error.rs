//! Error type for SEA extraction.

/// Errors produced while locating, decoding, or unpacking a SEA bundle.
///
/// Locating and decoding never produce a partial result: the blob format has
/// no recovery points, so the first failed read aborts the whole operation.
#[derive(Debug, thiserror::Error)]
pub enum SeaError {
    /// The file parsed as something other than ELF, PE, or thin Mach-O.
    #[error("unsupported container format: {0}")]
    UnsupportedFormat(&'static str),

    /// A recognized container with no SEA blob marker inside.
    #[error("no NODE_SEA_BLOB found in binary")]
    NotFound,

    /// A fixed-size or declared-length read would pass the end of the blob.
    #[error("truncated blob: read past end of buffer at offset {offset}")]
    TruncatedInput {
        /// Cursor position at which the shortfall occurred
        offset: usize,
    },

    /// A string field's bytes are not valid UTF-8.
    #[error("invalid UTF-8 in {field}")]
    InvalidEncoding {
        /// Which field of the layout held the bad bytes
        field: &'static str,
    },

    /// An asset name resolves outside the assets directory.
    #[error("unsafe asset path: {0}")]
    UnsafeAssetPath(String),

    /// The container itself failed to parse.
    #[error("malformed binary: {0}")]
    Malformed(#[from] goblin::error::Error),

    /// Filesystem failure while unpacking.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
