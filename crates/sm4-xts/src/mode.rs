//! XTS encryption and decryption with ciphertext stealing.

use sm4_core::{xor_in_place, Block, Sm4, BLOCK_SIZE};

use crate::cipher::BlockCipher;
use crate::error::XtsError;
use crate::tweak::{double, Stealing, TweakConfig};

/// Direction of the inner block-cipher call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Encrypt data blocks.
    Encrypt,
    /// Decrypt data blocks.
    Decrypt,
}

/// XTS mode over a pair of independent block-cipher instances.
///
/// The data cipher and tweak cipher must be keyed independently; this is not
/// checked.
#[derive(Clone, Debug)]
pub struct Xts<C> {
    data: C,
    tweak: C,
    config: TweakConfig,
}

/// XTS over SM4.
pub type Sm4Xts = Xts<Sm4>;

impl Xts<Sm4> {
    /// Builds SM4-XTS from a data key and a tweak key, each 16 bytes.
    pub fn new(data_key: &[u8], tweak_key: &[u8]) -> Result<Self, XtsError> {
        Ok(Self::from_ciphers(
            Sm4::from_slice(data_key)?,
            Sm4::from_slice(tweak_key)?,
        ))
    }
}

impl<C: BlockCipher> Xts<C> {
    /// Builds the mode from already keyed instances with the default tweak config.
    pub fn from_ciphers(data: C, tweak: C) -> Self {
        Self::with_config(data, tweak, TweakConfig::default())
    }

    /// Builds the mode with an explicit tweak config.
    pub fn with_config(data: C, tweak: C, config: TweakConfig) -> Self {
        Self {
            data,
            tweak,
            config,
        }
    }

    /// Returns the mode with a different tweak config.
    pub fn with_tweak_config(mut self, config: TweakConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tweak config.
    pub fn tweak_config(&self) -> TweakConfig {
        self.config
    }

    /// Encrypts `plaintext` (at least 16 bytes) under `tweak`.
    pub fn encrypt(&self, tweak: &Block, plaintext: &[u8]) -> Result<Vec<u8>, XtsError> {
        self.process(tweak, plaintext, Direction::Encrypt)
    }

    /// Decrypts `ciphertext` (at least 16 bytes) under `tweak`.
    pub fn decrypt(&self, tweak: &Block, ciphertext: &[u8]) -> Result<Vec<u8>, XtsError> {
        self.process(tweak, ciphertext, Direction::Decrypt)
    }

    /// Encrypts `buf` in place.
    pub fn encrypt_in_place(&self, tweak: &Block, buf: &mut [u8]) -> Result<(), XtsError> {
        self.process_in_place(tweak, buf, Direction::Encrypt)
    }

    /// Decrypts `buf` in place.
    pub fn decrypt_in_place(&self, tweak: &Block, buf: &mut [u8]) -> Result<(), XtsError> {
        self.process_in_place(tweak, buf, Direction::Decrypt)
    }

    /// Processes `input` into a fresh buffer of the same length.
    pub fn process(
        &self,
        tweak: &Block,
        input: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, XtsError> {
        check_len(input.len())?;
        let mut out = input.to_vec();
        self.process_in_place(tweak, &mut out, direction)?;
        Ok(out)
    }

    /// Processes `buf` in place. Fails before touching `buf` if it is shorter
    /// than one block.
    pub fn process_in_place(
        &self,
        tweak: &Block,
        buf: &mut [u8],
        direction: Direction,
    ) -> Result<(), XtsError> {
        check_len(buf.len())?;

        // The tweak is always encrypted, whatever the data direction.
        let mut t = self.tweak.encrypt_block(tweak);

        let tail = buf.len() % BLOCK_SIZE;
        let full_blocks = buf.len() / BLOCK_SIZE;
        let plain_blocks = if tail == 0 {
            full_blocks
        } else {
            full_blocks - 1
        };

        let (head, rest) = buf.split_at_mut(plain_blocks * BLOCK_SIZE);
        for chunk in head.chunks_exact_mut(BLOCK_SIZE) {
            let out = self.cipher_with_tweak(to_block(chunk), &t, direction);
            chunk.copy_from_slice(&out);
            double(&mut t, self.config.doubling);
        }

        if tail == 0 {
            return Ok(());
        }

        // `rest` holds the last full block followed by the partial one and `t`
        // is the last full block's tweak.
        let (first_tweak, second_tweak) = match self.config.stealing {
            Stealing::ReuseTweak => (t, t),
            Stealing::NextTweak => {
                let mut next = t;
                double(&mut next, self.config.doubling);
                match direction {
                    Direction::Encrypt => (t, next),
                    Direction::Decrypt => (next, t),
                }
            }
        };

        let (last_full, partial) = rest.split_at_mut(BLOCK_SIZE);
        let cc = self.cipher_with_tweak(to_block(last_full), &first_tweak, direction);

        let mut stolen = cc;
        stolen[..tail].copy_from_slice(partial);
        partial.copy_from_slice(&cc[..tail]);

        let out = self.cipher_with_tweak(stolen, &second_tweak, direction);
        last_full.copy_from_slice(&out);
        Ok(())
    }

    fn cipher_with_tweak(&self, mut block: Block, tweak: &Block, direction: Direction) -> Block {
        xor_in_place(&mut block, tweak);
        let mut out = match direction {
            Direction::Encrypt => self.data.encrypt_block(&block),
            Direction::Decrypt => self.data.decrypt_block(&block),
        };
        xor_in_place(&mut out, tweak);
        out
    }
}

fn check_len(len: usize) -> Result<(), XtsError> {
    if len < BLOCK_SIZE {
        return Err(XtsError::InputTooShort { len });
    }
    Ok(())
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}
