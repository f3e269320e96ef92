//! SM4 key schedule and block encryption/decryption.

use crate::block::{load_words, store_words, Block};
use crate::error::Sm4Error;
use crate::key::{RoundKeys, Sm4Key, ROUNDS};
use crate::round::{key_mix, round};

/// System parameter FK mixed into the key before expansion.
const FK: [u32; 4] = [0xa3b1_bac6, 0x56aa_3350, 0x677d_9197, 0xb270_22dc];

/// Fixed parameter CK: byte `j` of word `i` is `(4i + j) * 7 mod 256`.
const CK: [u32; ROUNDS] = ck_table();

const fn ck_table() -> [u32; ROUNDS] {
    let mut table = [0u32; ROUNDS];
    let mut i = 0;
    while i < ROUNDS {
        let mut word = 0u32;
        let mut j = 0;
        while j < 4 {
            let byte = ((4 * i + j) * 7) as u8;
            word = (word << 8) | byte as u32;
            j += 1;
        }
        table[i] = word;
        i += 1;
    }
    table
}

/// Expands a 128-bit key into 32 round keys.
pub fn expand_key(key: &Sm4Key) -> RoundKeys {
    let mk = load_words(key.as_bytes());
    let mut k = [mk[0] ^ FK[0], mk[1] ^ FK[1], mk[2] ^ FK[2], mk[3] ^ FK[3]];
    let mut rk = [0u32; ROUNDS];

    for (i, slot) in rk.iter_mut().enumerate() {
        let next = k[0] ^ key_mix(k[1] ^ k[2] ^ k[3] ^ CK[i]);
        *slot = next;
        k = [k[1], k[2], k[3], next];
    }

    RoundKeys(rk)
}

fn crypt<'a>(block: &Block, round_keys: impl Iterator<Item = &'a u32>) -> Block {
    let mut state = load_words(block);
    for rk in round_keys {
        round(&mut state, *rk);
    }
    state.reverse();
    store_words(&state)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt(block, round_keys.as_words().iter())
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
///
/// Same structure as [`encrypt_block`]; only the schedule is walked in reverse.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt(block, round_keys.as_words().iter().rev())
}

/// SM4 cipher instance holding an expanded key schedule.
///
/// The raw key is not retained; the schedule is wiped when the instance is dropped.
#[derive(Clone)]
pub struct Sm4 {
    round_keys: RoundKeys,
}

impl Sm4 {
    /// Builds an instance from a 16-byte key.
    pub fn new(key: &[u8; 16]) -> Self {
        Self::from_key(&Sm4Key::from(*key))
    }

    /// Builds an instance from key material of unchecked length.
    pub fn from_slice(key: &[u8]) -> Result<Self, Sm4Error> {
        let key = Sm4Key::try_from(key)?;
        Ok(Self::from_key(&key))
    }

    /// Builds an instance from a typed key.
    pub fn from_key(key: &Sm4Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Returns the expanded schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }
}

impl core::fmt::Debug for Sm4 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sm4").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const GB_KEY: [u8; 16] = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ];
    const GB_PLAIN: [u8; 16] = GB_KEY;
    const GB_CIPHER: [u8; 16] = [
        0x68, 0x1e, 0xdf, 0x34, 0xd2, 0x06, 0x96, 0x5e, 0x86, 0xb3, 0xe9, 0x4f, 0x53, 0x6e, 0x42,
        0x46,
    ];
    const GB_CIPHER_1M: [u8; 16] = [
        0x59, 0x52, 0x98, 0xc7, 0xc6, 0xfd, 0x27, 0x1f, 0x04, 0x02, 0xf8, 0x04, 0xc3, 0x3d, 0x3f,
        0x66,
    ];

    #[test]
    fn ck_table_matches_published_words() {
        assert_eq!(CK[0], 0x0007_0e15);
        assert_eq!(CK[1], 0x1c23_2a31);
        assert_eq!(CK[31], 0x646b_7279);
    }

    #[test]
    fn key_schedule_matches_published_round_keys() {
        let rks = expand_key(&Sm4Key::from(GB_KEY));
        assert_eq!(rks.get(0), 0xf121_86f9);
        assert_eq!(rks.get(1), 0x4166_2b61);
        assert_eq!(rks.get(31), 0x9124_a012);
    }

    #[test]
    fn encrypt_matches_gb_vector() {
        let cipher = Sm4::new(&GB_KEY);
        assert_eq!(cipher.encrypt_block(&GB_PLAIN), GB_CIPHER);
    }

    #[test]
    fn decrypt_matches_gb_vector() {
        let cipher = Sm4::new(&GB_KEY);
        assert_eq!(cipher.decrypt_block(&GB_CIPHER), GB_PLAIN);
    }

    #[test]
    fn million_chained_encryptions_and_back() {
        let rks = expand_key(&Sm4Key::from(GB_KEY));
        let mut block = GB_PLAIN;
        for _ in 0..1_000_000 {
            block = encrypt_block(&block, &rks);
        }
        assert_eq!(block, GB_CIPHER_1M);
        for _ in 0..1_000_000 {
            block = decrypt_block(&block, &rks);
        }
        assert_eq!(block, GB_PLAIN);
    }

    #[test]
    fn decrypt_is_encrypt_with_reversed_schedule() {
        let rks = expand_key(&Sm4Key::from(GB_KEY));
        let mut reversed = rks.as_words().to_owned();
        reversed.reverse();
        let reversed = RoundKeys(reversed);
        assert_eq!(encrypt_block(&GB_CIPHER, &reversed), GB_PLAIN);
        assert_eq!(decrypt_block(&GB_PLAIN, &reversed), GB_CIPHER);
    }

    #[test]
    fn slice_constructor_rejects_bad_lengths() {
        assert!(Sm4::from_slice(&GB_KEY).is_ok());
        assert_eq!(
            Sm4::from_slice(&GB_KEY[..8]).unwrap_err(),
            Sm4Error::InvalidKeyLength { len: 8 }
        );
    }

    #[test]
    fn instances_from_same_key_agree() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let mut key = [0u8; 16];
        rng.fill_bytes(&mut key);
        let a = Sm4::new(&key);
        let b = Sm4::from_slice(&key).expect("valid key");
        assert_eq!(a.round_keys(), b.round_keys());
        for _ in 0..32 {
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut block);
            assert_eq!(a.encrypt_block(&block), b.encrypt_block(&block));
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let cipher = Sm4::new(&key_bytes);
            let ct = cipher.encrypt_block(&block);
            assert_eq!(cipher.decrypt_block(&ct), block);
        }
    }

    #[test]
    fn instance_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sm4>();
    }
}
