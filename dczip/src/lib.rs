//! # dczip
//!
//! Lossless byte-stream compression built on distance coding.
//!
//! A blob travels through four stages:
//!
//! 1. **Burrows-Wheeler transform** ([`bwt`]): sort all rotations of the
//!    sentinel-extended input and keep the last column, grouping symbols
//!    that share a right context.
//! 2. **Distance coding** ([`dc`]): replace each symbol occurrence with
//!    the reduced distance to its next occurrence; runs and determined
//!    slots vanish from the stream entirely.
//! 3. **Byte-oriented varints** ([`dczip_core::varint`]): serialize the
//!    distance list, small values in one byte each.
//! 4. **Adaptive Huffman coding** ([`huffman`]): entropy-code the varint
//!    bytes with a tree both sides grow in lockstep.
//!
//! The output is self-delimiting and carries no magic number, length
//! field, or checksum.
//!
//! ## Example
//!
//! ```
//! let data = b"mississippi mississippi mississippi";
//! let blob = dczip::compress(data).unwrap();
//! let restored = dczip::decompress(&blob).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! The sentinel byte `0x00` is reserved by the transform stage: input
//! containing it is rejected up front with
//! [`DczipError::InvalidSentinel`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bwt;
pub mod dc;
pub mod huffman;
pub mod suffix;

pub use dczip_core::error::{DczipError, Result};
pub use dczip_core::varint;

/// Number of distinct byte values; also the length of the conceptual
/// alphabet prefix in the distance-coding buffer.
pub const ALPHABET_SIZE: usize = 256;

/// Byte reserved as the rotation terminator. It must not occur in
/// compressor input.
pub const SENTINEL: u8 = 0;

/// Compress `text` into a self-delimiting blob.
///
/// Returns [`DczipError::InvalidSentinel`] if `text` contains the
/// [`SENTINEL`] byte.
pub fn compress(text: &[u8]) -> Result<Vec<u8>> {
    let transformed = bwt::transform(text)?;
    let distances = dc::encode(&transformed);
    let serialized = varint::encode(&distances);
    Ok(huffman::encode(&serialized))
}

/// Decompress a blob produced by [`compress`].
///
/// Structural damage anywhere in the blob surfaces as
/// [`DczipError::CorruptStream`] or [`DczipError::TruncatedInput`]; no
/// stage silently produces wrong output for a stream it can detect as
/// inconsistent.
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>> {
    let serialized = huffman::decode(blob)?;
    let distances = varint::decode(&serialized)?;
    let transformed = dc::decode(&distances)?;
    bwt::inverse_transform(&transformed)
}
