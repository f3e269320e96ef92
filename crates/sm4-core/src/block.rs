//! Block representation helpers.

/// Size of an SM4 block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// SM4 block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Splits a block into four big-endian words.
#[inline]
pub(crate) fn load_words(block: &Block) -> [u32; 4] {
    core::array::from_fn(|i| {
        u32::from_be_bytes([
            block[4 * i],
            block[4 * i + 1],
            block[4 * i + 2],
            block[4 * i + 3],
        ])
    })
}

/// Writes four words back as a block, each word big-endian.
#[inline]
pub(crate) fn store_words(words: &[u32; 4]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    for (chunk, word) in block.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_big_endian() {
        let block: Block = [
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ];
        let words = load_words(&block);
        assert_eq!(words, [0x01234567, 0x89abcdef, 0xfedcba98, 0x76543210]);
        assert_eq!(store_words(&words), block);
    }

    #[test]
    fn xor_with_self_clears() {
        let mut a: Block = [0x5a; 16];
        let b = a;
        xor_in_place(&mut a, &b);
        assert_eq!(a, [0u8; 16]);
    }
}
