//! Feistel block representation helpers.

use num_bigint::BigUint;

use crate::numeral;

/// A `2 * side_size`-bit block split into two `side_size`-bit halves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeistelBlock {
    /// High half.
    pub left: BigUint,
    /// Low half.
    pub right: BigUint,
    side_size: usize,
}

impl FeistelBlock {
    /// Splits `value` (at most `2 * side_size` bits) into halves.
    pub fn split(value: &BigUint, side_size: usize) -> Self {
        Self {
            left: low_bits(&(value >> side_size), side_size),
            right: low_bits(value, side_size),
            side_size,
        }
    }

    /// Joins the halves back into a single integer `left ‖ right`.
    pub fn join(&self) -> BigUint {
        (&self.left << self.side_size) | &self.right
    }

    /// Half width in bits.
    pub fn side_size(&self) -> usize {
        self.side_size
    }
}

/// Renders `value` as a `width`-character string of `'0'`/`'1'`.
pub fn bit_string(value: &BigUint, width: usize) -> String {
    numeral::render(value, 2, width)
}

/// Low-order `bits` bits of `value`.
pub fn low_bits(value: &BigUint, bits: usize) -> BigUint {
    let mask = (BigUint::from(1u8) << bits) - 1u8;
    value & mask
}

/// XORs two halves; the result keeps the operands' width.
#[inline]
pub fn xor(lhs: &BigUint, rhs: &BigUint) -> BigUint {
    lhs ^ rhs
}
