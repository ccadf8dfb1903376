//! Decompression of zlib-wrapped cel payloads.

use std::io::{self, Read as _};

use flate2::read::DeflateDecoder;

/// The only zlib stream header accepted in cel payloads (deflate, 32K window,
/// default compression level).
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0x9C];

#[derive(Debug, thiserror::Error)]
pub enum DecompressError {
    #[error("Compressed payload of {0} bytes is too short for a zlib header")]
    MissingHeader(usize),
    #[error("Unexpected zlib header bytes {found:02x?}, expected [78, 9c]")]
    Header { found: [u8; 2] },
    #[error("Corrupt DEFLATE stream: {0}")]
    Deflate(#[source] io::Error),
    #[error("Decompressed size mismatch: expected {expected} bytes, got {actual}")]
    Size { expected: usize, actual: usize },
}

/// Inflates a zlib-wrapped payload that must decompress to exactly
/// `expected_len` bytes.
///
/// The two header bytes are checked and stripped, and the remainder is fed to
/// a raw DEFLATE decoder. The trailing Adler-32 checksum is not verified.
pub fn inflate_exact(payload: &[u8], expected_len: usize) -> Result<Vec<u8>, DecompressError> {
    let Some((header, stream)) = payload.split_first_chunk::<2>() else {
        return Err(DecompressError::MissingHeader(payload.len()));
    };
    if *header != ZLIB_HEADER {
        return Err(DecompressError::Header { found: *header });
    }

    // One byte past the expected size is enough to detect an oversized stream.
    // The output grows with the data actually inflated; `expected_len` comes
    // straight from the file and may be far larger than the stream.
    let limit = u64::try_from(expected_len).map_or(u64::MAX, |len| len.saturating_add(1));
    let mut output = Vec::new();
    DeflateDecoder::new(stream)
        .take(limit)
        .read_to_end(&mut output)
        .map_err(DecompressError::Deflate)?;

    if output.len() != expected_len {
        return Err(DecompressError::Size {
            expected: expected_len,
            actual: output.len(),
        });
    }
    Ok(output)
}
