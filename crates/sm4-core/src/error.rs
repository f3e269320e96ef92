//! Error type for SM4 construction.

use thiserror::Error;

/// Errors reported by the SM4 key constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Sm4Error {
    /// Key material was not exactly 16 bytes.
    #[error("invalid SM4 key length {len}, expected 16 bytes")]
    InvalidKeyLength {
        /// Length that was supplied.
        len: usize,
    },
}
