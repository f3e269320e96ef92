//! Block-cipher capability consumed by the mode.

use sm4_core::{Block, Sm4};

/// A 128-bit block cipher usable as either half of an XTS pair.
pub trait BlockCipher {
    /// Encrypts one block.
    fn encrypt_block(&self, block: &Block) -> Block;

    /// Decrypts one block.
    fn decrypt_block(&self, block: &Block) -> Block;
}

impl BlockCipher for Sm4 {
    #[inline]
    fn encrypt_block(&self, block: &Block) -> Block {
        Sm4::encrypt_block(self, block)
    }

    #[inline]
    fn decrypt_block(&self, block: &Block) -> Block {
        Sm4::decrypt_block(self, block)
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    #[inline]
    fn encrypt_block(&self, block: &Block) -> Block {
        (**self).encrypt_block(block)
    }

    #[inline]
    fn decrypt_block(&self, block: &Block) -> Block {
        (**self).decrypt_block(block)
    }
}
