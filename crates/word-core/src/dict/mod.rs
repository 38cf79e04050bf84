//! Word list storage.
//!
//! `WordSet` holds the normalized, deduplicated dictionary with an alphagram
//! index. `codec` packs a `WordSet` into a compact prefix/suffix encoded
//! payload for caching.

pub mod codec;
#[cfg(test)]
mod tests;
mod word_set;

pub use codec::{decode, encode, CompressedWords, Entry};
pub use word_set::{alphagram, normalize_word, WordSet, MAX_WORD_LEN, MIN_WORD_LEN};

/// Errors raised while decoding a cached payload.
///
/// Every variant means the payload is unusable; the loader treats all of
/// them as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected {expected})")]
    InvalidMagic { expected: &'static str },

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    Checksum { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("{table} table index {index} out of range ({len} entries)")]
    TableIndex {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("decoded word {0:?} is not a valid dictionary word")]
    InvalidWord(String),

    #[error("frequency table has {records} records for {words} words")]
    LengthMismatch { words: usize, records: usize },
}

/// Frame a bincode body as `magic | version | crc32 (LE) | body`.
pub(crate) fn frame(magic: &[u8; 4], version: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
    buf.extend_from_slice(magic);
    buf.push(version);
    buf.extend_from_slice(&crc32fast::hash(body).to_le_bytes());
    buf.extend_from_slice(body);
    buf
}

/// Validate a frame written by [`frame`] and return its body.
pub(crate) fn unframe<'a>(
    data: &'a [u8],
    magic: &'static [u8; 4],
    version: u8,
) -> Result<&'a [u8], CodecError> {
    if data.len() < HEADER_SIZE {
        return Err(CodecError::InvalidHeader);
    }
    if &data[..4] != magic {
        return Err(CodecError::InvalidMagic {
            expected: std::str::from_utf8(magic).unwrap_or("????"),
        });
    }
    if data[4] != version {
        return Err(CodecError::UnsupportedVersion(data[4]));
    }
    let expected = u32::from_le_bytes([data[5], data[6], data[7], data[8]]);
    let body = &data[HEADER_SIZE..];
    let actual = crc32fast::hash(body);
    if actual != expected {
        return Err(CodecError::Checksum { expected, actual });
    }
    Ok(body)
}

/// 4 bytes magic + 1 byte version + 4 bytes crc32.
pub(crate) const HEADER_SIZE: usize = 9;
