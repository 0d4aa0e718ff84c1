//! Ghost bundle (tar) reading and extraction.
//!
//! Ghost bundles are small tar archives. This module reads them from a
//! byte buffer that is already in memory, typically the body returned by
//! [`ApiClient::download_ghost`](crate::api::ApiClient::download_ghost).
//!
//! ## Architecture
//!
//! - [`structures`]: header layout constants, type flags and entry records
//! - [`parser`]: scanning a buffer into entries and slicing out payloads
//! - [`extractor`]: writing entries to memory, disk or stdout
//!
//! ## Limitations
//!
//! - No checksum or magic number validation
//! - No long-name (GNU / pax) extensions
//! - No compression; decompress the bundle first

mod extractor;
mod parser;
mod structures;

pub use extractor::{TarExtractor, ensure_relative};
pub use parser::{list_entries, read_entry};
pub use structures::*;
