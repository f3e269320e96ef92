//! Tweak chain arithmetic in GF(2^128) and the stealing conventions.

use sm4_core::Block;

/// How the 16-byte tweak is interpreted when multiplied by α.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Doubling {
    /// IEEE 1619: byte 0 is least significant, shift left, fold `0x87` into byte 0.
    #[default]
    LittleEndian,
    /// GB/T 17964-2021: bit-reflected big-endian value, shift right, fold `0xE1`
    /// into byte 0.
    BigEndian,
}

/// Which tweak encrypts the block rebuilt by ciphertext stealing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stealing {
    /// Reuse the tweak of the last full block. Decryption then has exactly the
    /// same shape as encryption.
    #[default]
    ReuseTweak,
    /// Advance to the next tweak in the chain, as IEEE 1619 and GB/T 17964 do.
    /// Decryption swaps the two tweaks.
    NextTweak,
}

/// Tweak handling for an [`Xts`](crate::Xts) instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TweakConfig {
    /// Field doubling convention.
    pub doubling: Doubling,
    /// Stealing tweak selection.
    pub stealing: Stealing,
}

impl TweakConfig {
    /// IEEE Std 1619-2007 XTS.
    pub const fn ieee1619() -> Self {
        Self {
            doubling: Doubling::LittleEndian,
            stealing: Stealing::NextTweak,
        }
    }

    /// GB/T 17964-2021 XTS.
    pub const fn gbt17964() -> Self {
        Self {
            doubling: Doubling::BigEndian,
            stealing: Stealing::NextTweak,
        }
    }
}

const LE_REDUCTION: u128 = 0x87;
const BE_REDUCTION: u128 = 0xe1 << 120;

/// Multiplies the tweak by α in place, modulo x^128 + x^7 + x^2 + x + 1.
///
/// The reduction is applied through a mask rather than a branch.
#[inline]
pub(crate) fn double(tweak: &mut Block, doubling: Doubling) {
    match doubling {
        Doubling::LittleEndian => {
            let value = u128::from_le_bytes(*tweak);
            let carry = value >> 127;
            let value = (value << 1) ^ (LE_REDUCTION & carry.wrapping_neg());
            *tweak = value.to_le_bytes();
        }
        Doubling::BigEndian => {
            let value = u128::from_be_bytes(*tweak);
            let carry = value & 1;
            let value = (value >> 1) ^ (BE_REDUCTION & carry.wrapping_neg());
            *tweak = value.to_be_bytes();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_bytewise(tweak: &Block) -> Block {
        let mut out = *tweak;
        let mut carry = 0u8;
        for byte in out.iter_mut() {
            let next = *byte >> 7;
            *byte = (*byte << 1) | carry;
            carry = next;
        }
        if carry != 0 {
            out[0] ^= 0x87;
        }
        out
    }

    #[test]
    fn little_endian_shifts_across_bytes() {
        let mut t = [0u8; 16];
        t[0] = 0x80;
        double(&mut t, Doubling::LittleEndian);
        let mut expected = [0u8; 16];
        expected[1] = 0x01;
        assert_eq!(t, expected);
    }

    #[test]
    fn little_endian_reduces_top_bit() {
        let mut t = [0u8; 16];
        t[0] = 0x80;
        t[15] = 0x80;
        double(&mut t, Doubling::LittleEndian);
        let mut expected = [0u8; 16];
        expected[0] = 0x87;
        expected[1] = 0x01;
        assert_eq!(t, expected);
    }

    #[test]
    fn little_endian_matches_bytewise_definition() {
        let mut t: Block = core::array::from_fn(|i| (i as u8).wrapping_mul(37) ^ 0xa5);
        for _ in 0..300 {
            let expected = double_bytewise(&t);
            double(&mut t, Doubling::LittleEndian);
            assert_eq!(t, expected);
        }
    }

    #[test]
    fn big_endian_reduces_low_bit() {
        let mut t = [0u8; 16];
        t[0] = 0x80;
        t[15] = 0x80;
        double(&mut t, Doubling::BigEndian);
        let mut expected = [0u8; 16];
        expected[0] = 0x40;
        expected[15] = 0x40;
        assert_eq!(t, expected);

        let mut t = [0u8; 16];
        t[15] = 0x01;
        double(&mut t, Doubling::BigEndian);
        let mut expected = [0u8; 16];
        expected[0] = 0xe1;
        assert_eq!(t, expected);
    }

    #[test]
    fn presets() {
        assert_eq!(TweakConfig::default().stealing, Stealing::ReuseTweak);
        assert_eq!(TweakConfig::ieee1619().doubling, Doubling::LittleEndian);
        assert_eq!(TweakConfig::gbt17964().doubling, Doubling::BigEndian);
    }
}
