//! Sector-addressed helpers for disk-style use of the mode.

use log::trace;
use sm4_core::{Block, BLOCK_SIZE};

use crate::cipher::BlockCipher;
use crate::error::XtsError;
use crate::mode::{Direction, Xts};

/// Encodes a sector number as an initial tweak: little-endian in the low 8 bytes.
pub fn sector_tweak(sector: u64) -> Block {
    let mut tweak = [0u8; BLOCK_SIZE];
    tweak[..8].copy_from_slice(&sector.to_le_bytes());
    tweak
}

impl<C: BlockCipher> Xts<C> {
    /// Encrypts consecutive sectors of `sector_size` bytes starting at `first_sector`.
    ///
    /// The final sector may be shorter than `sector_size` but not shorter than
    /// one block.
    pub fn encrypt_sectors(
        &self,
        first_sector: u64,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<(), XtsError> {
        self.process_sectors(first_sector, sector_size, buf, Direction::Encrypt)
    }

    /// Decrypts consecutive sectors; inverse of [`Xts::encrypt_sectors`].
    pub fn decrypt_sectors(
        &self,
        first_sector: u64,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<(), XtsError> {
        self.process_sectors(first_sector, sector_size, buf, Direction::Decrypt)
    }

    fn process_sectors(
        &self,
        first_sector: u64,
        sector_size: usize,
        buf: &mut [u8],
        direction: Direction,
    ) -> Result<(), XtsError> {
        if sector_size < BLOCK_SIZE {
            return Err(XtsError::InvalidSectorSize { size: sector_size });
        }
        let last_len = match buf.len() % sector_size {
            0 => sector_size.min(buf.len()),
            short => short,
        };
        if last_len < BLOCK_SIZE {
            return Err(XtsError::InputTooShort { len: last_len });
        }

        for (index, chunk) in buf.chunks_mut(sector_size).enumerate() {
            let sector = first_sector.wrapping_add(index as u64);
            trace!("{direction:?} sector {sector} ({} bytes)", chunk.len());
            self.process_in_place(&sector_tweak(sector), chunk, direction)?;
        }
        Ok(())
    }
}
