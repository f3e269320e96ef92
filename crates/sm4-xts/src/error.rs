//! Error type for the XTS mode.

use sm4_core::Sm4Error;
use thiserror::Error;

/// Errors reported by XTS construction and processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum XtsError {
    /// Input shorter than one block cannot be processed.
    #[error("XTS input of {len} bytes is shorter than one 16-byte block")]
    InputTooShort {
        /// Length that was supplied.
        len: usize,
    },
    /// Data-unit size smaller than one block.
    #[error("sector size {size} is smaller than one 16-byte block")]
    InvalidSectorSize {
        /// Size that was supplied.
        size: usize,
    },
    /// Key material rejected by the underlying cipher.
    #[error(transparent)]
    Cipher(#[from] Sm4Error),
}
