//! XTS tweakable-block mode with ciphertext stealing.
//!
//! The mode is generic over any [`BlockCipher`] with 16-byte blocks and uses
//! two independent instances: one encrypts data, the other turns the caller's
//! initial tweak into the per-block tweak chain. [`Sm4Xts`] binds it to SM4.
//!
//! Tweak conventions differ between published XTS variants; see
//! [`TweakConfig`] for the supported choices.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod mode;
mod sector;
mod tweak;

pub use crate::cipher::BlockCipher;
pub use crate::error::XtsError;
pub use crate::mode::{Direction, Sm4Xts, Xts};
pub use crate::sector::sector_tweak;
pub use crate::tweak::{Doubling, Stealing, TweakConfig};
pub use sm4_core::{Block, BLOCK_SIZE};
