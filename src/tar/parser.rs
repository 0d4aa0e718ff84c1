//! Header scanning for ghost bundles.
//!
//! The bundle format is a strict subset of ustar: 512-byte header blocks,
//! each followed by its payload padded up to the next block boundary. The
//! scan trusts the byte layout and treats the first header it cannot make
//! sense of as the end of the archive, so a malformed buffer yields a short
//! listing instead of an error.
//!
//! ## Stopping rule
//!
//! Real tar ends with two zero blocks. Here the first block with an empty
//! name ends the scan, and so does a remainder shorter than one header.

use tracing::trace;

use super::structures::{EntryType, HEADER_SIZE, TarEntry, TarHeader};

/// List the regular files in `data`, in archive order.
///
/// Directories, links and every other non-file type flag are skipped but
/// still advance the scan past their payload.
pub fn list_entries(data: &[u8]) -> Vec<TarEntry> {
    let mut entries = Vec::new();
    let mut offset = 0usize;

    while data.len().saturating_sub(offset) >= HEADER_SIZE {
        let Some(header) = TarHeader::from_bytes(&data[offset..offset + HEADER_SIZE]) else {
            trace!(offset, "end of archive");
            break;
        };

        if header.entry_type == EntryType::File {
            entries.push(TarEntry {
                name: header.name,
                size: header.size,
                offset,
            });
        } else {
            trace!(
                offset,
                name = %header.name,
                type_flag = header.entry_type.as_u8(),
                "skipping non-file entry"
            );
        }

        match next_header_offset(offset, header.size) {
            Some(next) => offset = next,
            None => break,
        }
    }

    entries
}

/// Borrow the payload of `entry` from `data`.
///
/// The slice is clamped to the end of the buffer, so a truncated archive
/// yields a short (possibly empty) payload rather than a panic.
pub fn read_entry<'a>(entry: &TarEntry, data: &'a [u8]) -> &'a [u8] {
    let start = entry.data_offset().min(data.len());
    let end = start.saturating_add(entry.size).min(data.len());
    &data[start..end]
}

/// Offset of the header that follows an entry at `offset` with `size` bytes
/// of payload.
fn next_header_offset(offset: usize, size: usize) -> Option<usize> {
    offset
        .checked_add(HEADER_SIZE)?
        .checked_add(size)?
        .checked_next_multiple_of(HEADER_SIZE)
}
