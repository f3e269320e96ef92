//! SM4 block cipher as standardised in GB/T 32907-2016.
//!
//! This crate provides:
//! - Key schedule producing the 32 round keys.
//! - Single-block encryption and decryption.
//! - An [`Sm4`] instance type binding an expanded schedule to both directions.
//!
//! The round function is table-driven (byte S-box lookups). It makes no
//! certified constant-time claims and should not be treated as side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Sm4};
pub use crate::error::Sm4Error;
pub use crate::key::{RoundKeys, Sm4Key, KEY_SIZE, ROUNDS};
pub use crate::sbox::sbox;
