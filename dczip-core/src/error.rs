//! Error types for dczip operations.
//!
//! Decoding distinguishes inputs that end too early from inputs whose
//! structure is internally inconsistent. Both abort at the first detected
//! problem; no stage ever returns partially reconstructed output.

use std::io;
use thiserror::Error;

/// The main error type for dczip operations.
#[derive(Debug, Error)]
pub enum DczipError {
    /// I/O error from the caller's reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Plaintext passed to compression contains the reserved sentinel byte.
    #[error("Sentinel byte {byte:#04x} in plaintext at offset {offset}")]
    InvalidSentinel {
        /// The reserved byte value that was found.
        byte: u8,
        /// Offset of its first occurrence.
        offset: usize,
    },

    /// Input ended before a value or code completed.
    #[error("Truncated input: {message}")]
    TruncatedInput {
        /// Description of what was being read.
        message: String,
    },

    /// A structural invariant of the stream does not hold.
    #[error("Corrupt stream: {message}")]
    CorruptStream {
        /// Description of the violated invariant.
        message: String,
    },
}

/// Result type alias for dczip operations.
pub type Result<T> = std::result::Result<T, DczipError>;

impl DczipError {
    /// Create an invalid sentinel error.
    pub fn invalid_sentinel(byte: u8, offset: usize) -> Self {
        Self::InvalidSentinel { byte, offset }
    }

    /// Create a truncated input error.
    pub fn truncated(message: impl Into<String>) -> Self {
        Self::TruncatedInput {
            message: message.into(),
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptStream {
            message: message.into(),
        }
    }
}
