//! Round-key derivation and the Feistel round function.
//!
//! Both are built on a single keyed primitive, [`RoundCipher`]: the block
//! cipher under the password-derived key and the caller's IV. Truncation always
//! keeps the *low-order* `side_size` bits of the cipher output.

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::block::{bit_string, low_bits};
use crate::cipher::CipherId;
use crate::error::Result;
use crate::key::{KeyMaterial, KeySchedule};
use crate::numeral;

/// Block cipher bound to a fixed `(password-derived key, iv)` pair.
pub struct RoundCipher {
    cipher: CipherId,
    key: Zeroizing<Vec<u8>>,
    iv: Option<Zeroizing<Vec<u8>>>,
}

impl RoundCipher {
    /// Binds `cipher` to the password and IV carried by `material`.
    ///
    /// Fails if the IV does not suit the cipher mode.
    pub fn new(cipher: CipherId, material: &KeyMaterial) -> Result<Self> {
        cipher.validate_iv(material.iv())?;
        Ok(Self {
            cipher,
            key: cipher.digest_password(material.password()),
            iv: material.iv().map(|iv| Zeroizing::new(iv.to_vec())),
        })
    }

    /// Cipher in use.
    pub fn cipher(&self) -> CipherId {
        self.cipher
    }

    /// Encrypts an arbitrary byte string.
    pub fn encrypt(&self, input: &[u8]) -> Result<Vec<u8>> {
        let iv = self.iv.as_ref().map(|iv| iv.as_slice());
        Ok(self.cipher.encrypt(input, &self.key, iv)?)
    }

    /// Low-order `bits` bits of the encryption of `input`.
    pub fn truncated(&self, input: &[u8], bits: usize) -> Result<BigUint> {
        let out = self.encrypt(input)?;
        Ok(low_bits(&numeral::from_raw(&out), bits))
    }
}

/// Derives one `side_size`-bit subkey per round by chaining cipher applications
/// from the master key.
///
/// The chain starts at `Encrypt(master_key)`; each round key is the low-order
/// `side_size` bits of the next link. The result is a pure function of the key
/// material, `rounds`, `side_size` and `cipher`.
pub fn derive_schedule(
    material: &KeyMaterial,
    rounds: u32,
    side_size: usize,
    cipher: CipherId,
) -> Result<KeySchedule> {
    let round_cipher = RoundCipher::new(cipher, material)?;
    schedule_with(&round_cipher, material.master_key(), rounds, side_size)
}

/// Same as [`derive_schedule`] with an already bound [`RoundCipher`].
pub fn schedule_with(
    round_cipher: &RoundCipher,
    master_key: &[u8],
    rounds: u32,
    side_size: usize,
) -> Result<KeySchedule> {
    let mut prev = Zeroizing::new(round_cipher.encrypt(master_key)?);
    let mut keys = Vec::with_capacity(rounds as usize);
    for _ in 0..rounds {
        prev = Zeroizing::new(round_cipher.encrypt(&prev)?);
        keys.push(low_bits(&numeral::from_raw(&prev), side_size));
    }
    Ok(KeySchedule::new(round_cipher.cipher(), side_size, keys))
}

/// Feistel round function `F(x, k)`.
///
/// Encrypts the ASCII bit string `x ‖ k` (both `side_size` characters) and
/// keeps the low-order `side_size` bits of the result.
pub fn round_function(
    round_cipher: &RoundCipher,
    half: &BigUint,
    round_key: &BigUint,
    side_size: usize,
) -> Result<BigUint> {
    let mut input = bit_string(half, side_size);
    input.push_str(&bit_string(round_key, side_size));
    round_cipher.truncated(input.as_bytes(), side_size)
}
