//! Building blocks for format-preserving encryption over bounded integer domains.
//!
//! This crate provides everything the Feistel engine consumes:
//! - Exact conversions between binary, decimal, hexadecimal and raw numerals.
//! - Domain validation and Feistel block sizing.
//! - The cipher registry and its block-cipher / password-digest boundary.
//! - Round-key derivation and the round function.
//!
//! The block cipher itself comes from the RustCrypto `aes`, `cbc` and `ecb`
//! crates and is treated as an opaque pseudorandom permutation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod base;
mod block;
mod cipher;
mod domain;
mod error;
mod key;
pub mod numeral;
mod round;

pub use crate::base::Base;
pub use crate::block::{bit_string, low_bits, xor, FeistelBlock};
pub use crate::cipher::CipherId;
pub use crate::domain::{Domain, SizingParameters};
pub use crate::error::{ConfigError, Error, InputError, NumeralError, Result};
pub use crate::key::{KeyMaterial, KeySchedule, KEY_MIN_LENGTH};
pub use crate::round::{derive_schedule, round_function, schedule_with, RoundCipher};

/// Smallest accepted number of Feistel rounds.
pub const MIN_ROUNDS: u32 = 3;
