//! SM4 round transformations.

use crate::sbox::sbox;

/// Non-linear transform τ: substitutes each byte of the word through the S-box.
#[inline]
pub fn tau(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_be_bytes();
    u32::from_be_bytes([sbox(b0), sbox(b1), sbox(b2), sbox(b3)])
}

/// Linear transform L used by the encryption round.
#[inline]
pub fn linear(word: u32) -> u32 {
    word ^ word.rotate_left(2) ^ word.rotate_left(10) ^ word.rotate_left(18) ^ word.rotate_left(24)
}

/// Linear transform L' used by the key schedule.
#[inline]
pub fn linear_key(word: u32) -> u32 {
    word ^ word.rotate_left(13) ^ word.rotate_left(23)
}

/// Round mixer T = L ∘ τ.
#[inline]
pub fn round_mix(word: u32) -> u32 {
    linear(tau(word))
}

/// Key-schedule mixer T' = L' ∘ τ.
#[inline]
pub fn key_mix(word: u32) -> u32 {
    linear_key(tau(word))
}

/// One unbalanced Feistel round over the four-word state window.
#[inline]
pub fn round(state: &mut [u32; 4], round_key: u32) {
    let [x0, x1, x2, x3] = *state;
    let x4 = x0 ^ round_mix(x1 ^ x2 ^ x3 ^ round_key);
    *state = [x1, x2, x3, x4];
}
