//! Key types for SM4.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Sm4Error;

/// Size of an SM4 key in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of rounds, and therefore round keys.
pub const ROUNDS: usize = 32;

/// SM4 key wrapper.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4Key([u8; KEY_SIZE]);

impl Sm4Key {
    /// Borrows the raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for Sm4Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Sm4Key {
    type Error = Sm4Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value
            .try_into()
            .map_err(|_| Sm4Error::InvalidKeyLength { len: value.len() })?;
        Ok(Self(bytes))
    }
}

impl core::fmt::Debug for Sm4Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sm4Key(..)")
    }
}

/// Expanded round keys for SM4, consumed front to back when encrypting and
/// back to front when decrypting.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub(crate) [u32; ROUNDS]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..32).
    #[inline]
    pub fn get(&self, round: usize) -> u32 {
        self.0[round]
    }

    /// Borrows the whole schedule.
    #[inline]
    pub fn as_words(&self) -> &[u32; ROUNDS] {
        &self.0
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_key_requires_sixteen_bytes() {
        assert!(Sm4Key::try_from(&[0u8; 16][..]).is_ok());
        assert_eq!(
            Sm4Key::try_from(&[0u8; 15][..]).unwrap_err(),
            Sm4Error::InvalidKeyLength { len: 15 }
        );
        assert_eq!(
            Sm4Key::try_from(&[0u8; 32][..]).unwrap_err(),
            Sm4Error::InvalidKeyLength { len: 32 }
        );
    }

    #[test]
    fn debug_hides_key_material() {
        let key = Sm4Key::from([0xaa; 16]);
        assert_eq!(format!("{key:?}"), "Sm4Key(..)");
    }
}
