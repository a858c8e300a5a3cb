//! Deserialize the raw SEA blob into a [`SeaBlob`] record.
//!
//! The blob layout is sequential, little-endian, with length-prefixed
//! strings (8-byte length, then that many raw bytes, no terminator):
//!
//! ```text
//! u32 magic
//! u32 flags
//! u64 code_path_len, bytes[code_path_len] code_path (utf8)
//! u64 code_len,      bytes[code_len] code (utf8)
//! if flags & USE_CODE_CACHE:
//!     u64 cache_len, bytes[cache_len] cache (opaque)
//! if flags & INCLUDE_ASSETS:
//!     u64 asset_count
//!     repeat asset_count times:
//!         u64 name_len,    bytes[name_len] name (utf8)
//!         u64 content_len, bytes[content_len] content (utf8)
//! ```
//!
//! Decoding advances a single cursor; the first read that would pass the
//! end of the buffer aborts the whole decode, since every later field's
//! offset depends on it.

use std::collections::BTreeMap;

use crate::error::SeaError;
use crate::types::{SeaBlob, SeaFlags};

/// Sequential cursor over a SEA blob.
///
/// Every read is fallible and consumes exactly its declared byte span.
pub struct SeaReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SeaReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        SeaReader { buf, pos: 0 }
    }

    /// Current cursor position, in bytes from the start of the blob.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Consume `len` bytes, or fail with the offset of the shortfall.
    fn take(&mut self, len: usize) -> Result<&'a [u8], SeaError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(SeaError::TruncatedInput { offset: self.pos })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, SeaError> {
        let offset = self.pos;
        let bytes = self.take(4)?;
        bytes
            .try_into()
            .map(u32::from_le_bytes)
            .map_err(|_| SeaError::TruncatedInput { offset })
    }

    pub fn read_u64(&mut self) -> Result<u64, SeaError> {
        let offset = self.pos;
        let bytes = self.take(8)?;
        bytes
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| SeaError::TruncatedInput { offset })
    }

    /// Read a u64 length prefix and narrow it to usize.
    ///
    /// A length that doesn't fit usize cannot fit the buffer either, so it
    /// reports as truncation at the prefix's offset.
    fn read_len(&mut self) -> Result<usize, SeaError> {
        let offset = self.pos;
        let len = self.read_u64()?;
        usize::try_from(len).map_err(|_| SeaError::TruncatedInput { offset })
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, SeaError> {
        let len = self.read_len()?;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| SeaError::InvalidEncoding { field })
    }

    /// Read a length-prefixed opaque byte span. Never UTF-8 validated.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, SeaError> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }
}

/// Decode a located blob into a [`SeaBlob`].
///
/// Trailing bytes after the record (segment padding and the like) are
/// ignored. The leading magic word is read but not checked against a known
/// constant; upstream Node does not validate it on this path either.
pub fn decode_blob(blob: &[u8]) -> Result<SeaBlob, SeaError> {
    let mut reader = SeaReader::new(blob);

    let _magic = reader.read_u32()?;
    let flags = SeaFlags(reader.read_u32()?);
    let code_path = reader.read_string("code_path")?;
    let code = reader.read_string("code")?;

    let code_cache = if flags.contains(SeaFlags::USE_CODE_CACHE) {
        Some(reader.read_bytes()?)
    } else {
        None
    };

    let assets = if flags.contains(SeaFlags::INCLUDE_ASSETS) {
        let count = reader.read_len()?;
        let mut assets = BTreeMap::new();
        for _ in 0..count {
            let name = reader.read_string("asset_name")?;
            let content = reader.read_string("asset_content")?;
            assets.insert(name, content);
        }
        Some(assets)
    } else {
        None
    };

    Ok(SeaBlob {
        flags,
        code_path,
        code,
        code_cache,
        assets,
    })
}
