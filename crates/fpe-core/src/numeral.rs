//! Conversions between binary, decimal and hexadecimal digit strings and raw bytes.
//!
//! Every conversion goes through an arbitrary-precision integer, so it is exact
//! for any non-negative value. Functions taking `length` left-pad their output
//! with `'0'` to at least that many digits; `0` means "no padding".
//!
//! Raw byte sequences are big-endian with no leading zero bytes. Zero encodes
//! as the empty sequence.

use num_bigint::BigUint;
use num_traits::{Num, Zero};

use crate::error::NumeralError;

/// Parses `input` as an unsigned integer in `radix`.
///
/// Only plain digits are accepted: no sign, whitespace or separators.
pub fn parse(input: &str, radix: u32) -> Result<BigUint, NumeralError> {
    let invalid = || NumeralError {
        input: input.to_owned(),
        radix,
    };
    if input.is_empty() || !input.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    BigUint::from_str_radix(input, radix).map_err(|_| invalid())
}

/// Renders `value` in `radix` (lowercase), padded to `length` digits.
pub fn render(value: &BigUint, radix: u32, length: usize) -> String {
    pad(&value.to_str_radix(radix), length)
}

/// Big-endian bytes of `value`, empty for zero.
pub fn to_raw(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Integer value of big-endian `raw` bytes.
pub fn from_raw(raw: &[u8]) -> BigUint {
    BigUint::from_bytes_be(raw)
}

/// Strips leading zeros, maps the empty result to `"0"` and left-pads to `length`.
pub fn pad(input: &str, length: usize) -> String {
    let trimmed = input.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{trimmed:0>length$}")
}

/// Binary string to decimal string.
pub fn bin_to_dec(bin: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(bin, 2)?, 10, length))
}

/// Binary string to hexadecimal string.
pub fn bin_to_hex(bin: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(bin, 2)?, 16, length))
}

/// Binary string to raw bytes.
pub fn bin_to_raw(bin: &str) -> Result<Vec<u8>, NumeralError> {
    Ok(to_raw(&parse(bin, 2)?))
}

/// Decimal string to binary string.
pub fn dec_to_bin(dec: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(dec, 10)?, 2, length))
}

/// Decimal string to hexadecimal string.
pub fn dec_to_hex(dec: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(dec, 10)?, 16, length))
}

/// Decimal string to raw bytes.
pub fn dec_to_raw(dec: &str) -> Result<Vec<u8>, NumeralError> {
    Ok(to_raw(&parse(dec, 10)?))
}

/// Hexadecimal string to binary string.
pub fn hex_to_bin(hex: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(hex, 16)?, 2, length))
}

/// Hexadecimal string to decimal string.
pub fn hex_to_dec(hex: &str, length: usize) -> Result<String, NumeralError> {
    Ok(render(&parse(hex, 16)?, 10, length))
}

/// Hexadecimal string to raw bytes.
pub fn hex_to_raw(hex: &str) -> Result<Vec<u8>, NumeralError> {
    Ok(to_raw(&parse(hex, 16)?))
}

/// Raw bytes to binary string.
pub fn raw_to_bin(raw: &[u8], length: usize) -> String {
    render(&from_raw(raw), 2, length)
}

/// Raw bytes to decimal string.
pub fn raw_to_dec(raw: &[u8], length: usize) -> String {
    render(&from_raw(raw), 10, length)
}

/// Raw bytes to hexadecimal string.
pub fn raw_to_hex(raw: &[u8], length: usize) -> String {
    render(&from_raw(raw), 16, length)
}
