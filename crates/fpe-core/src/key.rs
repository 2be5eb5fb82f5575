//! Key material supplied per call and the per-round subkeys derived from it.

use core::fmt;

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::CipherId;
use crate::error::{ConfigError, Result};

/// Minimum length in bytes of the master key and the password.
pub const KEY_MIN_LENGTH: usize = 16;

/// Secrets for one encrypt/decrypt call.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    master_key: Vec<u8>,
    password: Vec<u8>,
    iv: Option<Vec<u8>>,
}

impl KeyMaterial {
    /// Bundles a master key, password and optional IV.
    ///
    /// Both the master key and the password must be at least
    /// [`KEY_MIN_LENGTH`] bytes. The IV is checked against the cipher later,
    /// when the material is used.
    pub fn new(
        master_key: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
        iv: Option<Vec<u8>>,
    ) -> Result<Self> {
        let material = Self {
            master_key: master_key.into(),
            password: password.into(),
            iv,
        };
        if material.master_key.len() < KEY_MIN_LENGTH {
            return Err(ConfigError::KeyTooShort {
                len: material.master_key.len(),
                min: KEY_MIN_LENGTH,
            }
            .into());
        }
        if material.password.len() < KEY_MIN_LENGTH {
            return Err(ConfigError::PasswordTooShort {
                len: material.password.len(),
                min: KEY_MIN_LENGTH,
            }
            .into());
        }
        Ok(material)
    }

    /// Master key seeding the round-key chain.
    pub fn master_key(&self) -> &[u8] {
        &self.master_key
    }

    /// Password from which the cipher key is digested.
    pub fn password(&self) -> &[u8] {
        &self.password
    }

    /// Initialization vector, if any.
    pub fn iv(&self) -> Option<&[u8]> {
        self.iv.as_deref()
    }

    /// Returns a copy with a different IV.
    pub fn with_iv(&self, iv: Option<Vec<u8>>) -> Self {
        Self {
            master_key: self.master_key.clone(),
            password: self.password.clone(),
            iv,
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("master_key", &"<redacted>")
            .field("password", &"<redacted>")
            .field("iv", &self.iv.as_ref().map(|iv| iv.len()))
            .finish()
    }
}

/// Ordered round subkeys, each `side_size` bits wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    cipher: CipherId,
    side_size: usize,
    keys: Vec<BigUint>,
}

impl KeySchedule {
    pub(crate) fn new(cipher: CipherId, side_size: usize, keys: Vec<BigUint>) -> Self {
        Self {
            cipher,
            side_size,
            keys,
        }
    }

    /// Returns the subkey for `round` (1-based, `1..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &BigUint {
        &self.keys[round - 1]
    }

    /// Number of rounds covered.
    pub fn rounds(&self) -> usize {
        self.keys.len()
    }

    /// Width of each subkey in bits.
    pub fn side_size(&self) -> usize {
        self.side_size
    }

    /// Cipher the schedule was derived with.
    pub fn cipher(&self) -> CipherId {
        self.cipher
    }

    /// Iterates the subkeys in round order.
    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.keys.iter()
    }
}
