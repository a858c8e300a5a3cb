//! Locate the embedded SEA blob inside an executable container.
//!
//! Each of the three supported formats hides the blob behind a different
//! marker:
//!
//! - ELF: a note named `NODE_SEA_BLOB` (the injector writes the name with a
//!   trailing NUL); the note's description bytes are the blob.
//! - PE: a resource directory entry named `NODE_SEA_BLOB`, one level below
//!   the root (type) directories; its first data entry is the blob.
//! - Mach-O: a `__POSTJECT` segment; its file range is the blob.
//!
//! Location is a pure read over the parsed container. The returned slice
//! borrows from the input buffer; nothing here interprets its contents.

use goblin::elf::note::Note;
use goblin::elf::Elf;
use goblin::mach::{Mach, MachO};
use goblin::pe::PE;
use goblin::Object;

use crate::error::SeaError;

/// ELF note / PE resource name marking the blob.
pub const SEA_NOTE_NAME: &str = "NODE_SEA_BLOB";
/// Mach-O segment name used by postject-injected blobs.
pub const SEA_SEGMENT_NAME: &str = "__POSTJECT";

/// Parse `data` as an executable and return the embedded SEA blob bytes.
///
/// Dispatches to the per-format reader based on what the container parses
/// as. Fat Mach-O binaries are not supported; extract a single architecture
/// first.
pub fn locate_blob(data: &[u8]) -> Result<&[u8], SeaError> {
    match Object::parse(data)? {
        Object::Elf(elf) => read_from_elf(&elf, data),
        Object::PE(pe) => read_from_pe(&pe, data),
        Object::Mach(Mach::Binary(macho)) => read_from_macho(&macho, data),
        Object::Mach(Mach::Fat(_)) => Err(SeaError::UnsupportedFormat("fat mach-o")),
        Object::Archive(_) => Err(SeaError::UnsupportedFormat("archive")),
        _ => Err(SeaError::UnsupportedFormat("unknown")),
    }
}

/// Find the SEA blob in an ELF binary.
///
/// Scans notes from PT_NOTE program headers first, then from note sections;
/// the first note named [`SEA_NOTE_NAME`] wins. Notes that fail to parse
/// (bad name encoding, short descriptors) are skipped rather than
/// propagated, since unrelated tooling writes all kinds of notes.
pub fn read_from_elf<'a>(elf: &Elf<'a>, data: &'a [u8]) -> Result<&'a [u8], SeaError> {
    if let Some(notes) = elf.iter_note_headers(data) {
        if let Some(desc) = scan_notes(notes) {
            return Ok(desc);
        }
    }
    if let Some(notes) = elf.iter_note_sections(data, None) {
        if let Some(desc) = scan_notes(notes) {
            return Ok(desc);
        }
    }
    Err(SeaError::NotFound)
}

fn scan_notes<'a>(
    notes: impl Iterator<Item = goblin::error::Result<Note<'a>>>,
) -> Option<&'a [u8]> {
    for note in notes {
        let Ok(note) = note else { continue };
        if is_sea_note_name(note.name) {
            return Some(note.desc);
        }
    }
    None
}

/// Exact match against the injected note name.
///
/// On disk the name is `NODE_SEA_BLOB` plus its NUL terminator; goblin's
/// parsed name may or may not keep that byte, so exactly one trailing NUL
/// is stripped before comparing. Extra NULs are a different name.
fn is_sea_note_name(name: &str) -> bool {
    name.strip_suffix('\0').unwrap_or(name) == SEA_NOTE_NAME
}

/// Find the SEA blob in a Mach-O binary.
///
/// The blob lives in a dedicated [`SEA_SEGMENT_NAME`] segment; its content
/// is the segment's raw file range.
pub fn read_from_macho<'a>(macho: &MachO, data: &'a [u8]) -> Result<&'a [u8], SeaError> {
    for seg in &macho.segments {
        if seg.name().map(|n| n == SEA_SEGMENT_NAME).unwrap_or(false) {
            let start = usize::try_from(seg.fileoff).map_err(|_| SeaError::NotFound)?;
            let len = usize::try_from(seg.filesize).map_err(|_| SeaError::NotFound)?;
            return start
                .checked_add(len)
                .and_then(|end| data.get(start..end))
                .ok_or(SeaError::NotFound);
        }
    }
    Err(SeaError::NotFound)
}

// High bit of a resource directory entry field: the entry's name (or target)
// is an offset to a string (or subdirectory) rather than an ID (or data
// entry). Offsets are relative to the start of the resource section.
const RSRC_SUBDIR_BIT: u32 = 0x8000_0000;

/// Find the SEA blob in a PE binary.
///
/// Walks the resource directory tree: root entries are resource-type
/// directories; one level below, an entry named [`SEA_NOTE_NAME`] points at
/// the blob's data entry (usually through one more language-level
/// directory). Any out-of-bounds read while walking means there is no
/// well-formed SEA resource, which reports as `NotFound`.
pub fn read_from_pe<'a>(pe: &PE, data: &'a [u8]) -> Result<&'a [u8], SeaError> {
    let optional = pe.header.optional_header.as_ref().ok_or(SeaError::NotFound)?;
    let table = optional
        .data_directories
        .get_resource_table()
        .ok_or(SeaError::NotFound)?;

    let rsrc_off = rva_to_file_offset(pe, table.virtual_address).ok_or(SeaError::NotFound)?;
    let rsrc_end = rsrc_off
        .checked_add(table.size as usize)
        .map(|end| end.min(data.len()))
        .ok_or(SeaError::NotFound)?;
    let rsrc = data.get(rsrc_off..rsrc_end).ok_or(SeaError::NotFound)?;

    for entry in dir_entries(rsrc, 0).ok_or(SeaError::NotFound)? {
        if entry.target & RSRC_SUBDIR_BIT == 0 {
            continue;
        }
        let Some(children) = dir_entries(rsrc, (entry.target & !RSRC_SUBDIR_BIT) as usize) else {
            continue;
        };
        for child in children {
            match resource_name(rsrc, child.name) {
                Some(name) if name == SEA_NOTE_NAME => {}
                _ => continue,
            }
            let Some(data_entry) = first_data_entry(rsrc, child.target, 2) else {
                continue;
            };
            let rva = read_u32_le(rsrc, data_entry).ok_or(SeaError::NotFound)?;
            let size = read_u32_le(rsrc, data_entry + 4).ok_or(SeaError::NotFound)? as usize;
            let off = rva_to_file_offset(pe, rva).ok_or(SeaError::NotFound)?;
            return off
                .checked_add(size)
                .and_then(|end| data.get(off..end))
                .ok_or(SeaError::NotFound);
        }
    }
    Err(SeaError::NotFound)
}

/// A single 8-byte resource directory entry.
struct RsrcEntry {
    name: u32,
    target: u32,
}

/// Read the entries of the resource directory at `dir_off`.
///
/// An IMAGE_RESOURCE_DIRECTORY is 16 bytes (the entry counts sit at offsets
/// 12 and 14), followed by 8-byte entries, named entries first.
fn dir_entries(rsrc: &[u8], dir_off: usize) -> Option<Vec<RsrcEntry>> {
    let named = read_u16_le(rsrc, dir_off.checked_add(12)?)? as usize;
    let ids = read_u16_le(rsrc, dir_off + 14)? as usize;

    let mut entries = Vec::with_capacity(named + ids);
    for i in 0..named + ids {
        let entry_off = dir_off + 16 + i * 8;
        entries.push(RsrcEntry {
            name: read_u32_le(rsrc, entry_off)?,
            target: read_u32_le(rsrc, entry_off + 4)?,
        });
    }
    Some(entries)
}

/// Decode an entry's UTF-16 name string, or `None` for ID entries.
fn resource_name(rsrc: &[u8], name_field: u32) -> Option<String> {
    if name_field & RSRC_SUBDIR_BIT == 0 {
        return None;
    }
    let off = (name_field & !RSRC_SUBDIR_BIT) as usize;
    let len = read_u16_le(rsrc, off)? as usize;

    let mut units = Vec::with_capacity(len);
    for i in 0..len {
        units.push(read_u16_le(rsrc, off + 2 + i * 2)?);
    }
    String::from_utf16(&units).ok()
}

/// Descend through subdirectories until a data entry is reached.
///
/// Returns the data entry's offset within the resource section. `depth`
/// bounds the walk so a cyclic tree cannot loop forever.
fn first_data_entry(rsrc: &[u8], target: u32, depth: u8) -> Option<usize> {
    if target & RSRC_SUBDIR_BIT == 0 {
        return Some(target as usize);
    }
    if depth == 0 {
        return None;
    }
    let entries = dir_entries(rsrc, (target & !RSRC_SUBDIR_BIT) as usize)?;
    entries
        .into_iter()
        .find_map(|e| first_data_entry(rsrc, e.target, depth - 1))
}

/// Convert an RVA to a file offset through the PE section table.
fn rva_to_file_offset(pe: &PE, rva: u32) -> Option<usize> {
    for section in &pe.sections {
        let start = section.virtual_address;
        let span = section.virtual_size.max(section.size_of_raw_data);
        if rva >= start && rva - start < span {
            return Some((rva - start + section.pointer_to_raw_data) as usize);
        }
    }
    None
}

/// Safely read a u16 in little-endian from a slice at a given offset.
///
/// Returns `None` if there aren't enough bytes available.
#[inline]
fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    data.get(offset..offset.checked_add(2)?)?
        .try_into()
        .ok()
        .map(u16::from_le_bytes)
}

/// Safely read a u32 in little-endian from a slice at a given offset.
#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset.checked_add(4)?)?
        .try_into()
        .ok()
        .map(u32::from_le_bytes)
}
