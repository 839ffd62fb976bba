//! # dczip Core
//!
//! Core components for the dczip compression library.
//!
//! This crate provides the building blocks shared by the compression
//! pipeline:
//!
//! - [`bitstream`]: MSB-first bit collection and front-padded packing for
//!   adaptive Huffman codes
//! - [`fenwick`]: Fenwick tree used as the distance coder's presence index
//! - [`varint`]: Self-delimiting variable-length integer codec
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use dczip_core::FenwickTree;
//! use dczip_core::varint;
//!
//! // Count present slots and locate empty ones.
//! let mut presence = FenwickTree::new(8);
//! presence.add(2, 1);
//! presence.add(5, 1);
//! assert_eq!(presence.range_sum(0, 8), 2);
//! assert_eq!(presence.select_zero(3), Some(3));
//!
//! // Self-delimiting integers need no length prefix.
//! let bytes = varint::encode(&[7, 300]);
//! assert_eq!(varint::decode(&bytes).unwrap(), vec![7, 300]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod fenwick;
pub mod varint;

// Re-exports for convenience
pub use bitstream::{MsbBitReader, MsbBitWriter};
pub use error::{DczipError, Result};
pub use fenwick::FenwickTree;
