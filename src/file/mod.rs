//! Byte-level access to support-table resources.
//!
//! This module holds everything below the metadata model: the little-endian
//! [`io`] helpers, the cursor-based [`parser::Parser`], and gzip handling for
//! the compressed resources the metadata store is loaded from.
//!
//! Resources are always fully decompressed into an owned buffer before parsing;
//! the buffer is dropped by the caller as soon as the table has been built.

pub mod io;
pub mod parser;

use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use crate::{Error, Result};

/// Magic bytes at the start of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Decompress a gzip-compressed resource into memory.
///
/// # Errors
/// Returns [`crate::Error::Empty`] for empty input, [`crate::Error::NotSupported`] if the
/// data does not start with the gzip magic, and [`crate::Error::FileError`] if the stream
/// is corrupt or truncated.
///
/// # Examples
///
/// ```rust
/// use netoffice_compat::file::{compress_gzip, decompress_gzip};
///
/// let packed = compress_gzip(b"NOSP")?;
/// assert_eq!(decompress_gzip(&packed)?, b"NOSP");
/// # Ok::<(), netoffice_compat::Error>(())
/// ```
pub fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::Empty);
    }
    if !data.starts_with(&GZIP_MAGIC) {
        return Err(Error::NotSupported);
    }

    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;

    Ok(decompressed)
}

/// Compress `data` into a gzip stream using the default compression level.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if the encoder fails.
pub fn compress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
