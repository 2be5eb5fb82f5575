//! Cipher registry and the block-cipher / password-digest boundary.
//!
//! The Feistel construction only ever needs one primitive: encrypt an
//! arbitrary byte string under a fixed `(key, iv)` pair. AES in CBC or ECB
//! mode with PKCS#7 padding fills that role, taken from the RustCrypto crates.

use core::fmt;
use core::str::FromStr;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{ConfigError, InputError};

/// AES block width shared by every registered cipher.
const AES_BLOCK_BITS: usize = 128;

/// Native IV length of the CBC modes.
const CBC_IV_BYTES: usize = 16;

/// Supported cipher identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CipherId {
    /// `aes-128-cbc`
    #[default]
    Aes128Cbc,
    /// `aes-192-cbc`
    Aes192Cbc,
    /// `aes-256-cbc`
    Aes256Cbc,
    /// `aes-128-ecb`
    Aes128Ecb,
    /// `aes-192-ecb`
    Aes192Ecb,
    /// `aes-256-ecb`
    Aes256Ecb,
}

impl CipherId {
    /// Every registered cipher.
    pub const ALL: [CipherId; 6] = [
        CipherId::Aes128Cbc,
        CipherId::Aes192Cbc,
        CipherId::Aes256Cbc,
        CipherId::Aes128Ecb,
        CipherId::Aes192Ecb,
        CipherId::Aes256Ecb,
    ];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            CipherId::Aes128Cbc => "aes-128-cbc",
            CipherId::Aes192Cbc => "aes-192-cbc",
            CipherId::Aes256Cbc => "aes-256-cbc",
            CipherId::Aes128Ecb => "aes-128-ecb",
            CipherId::Aes192Ecb => "aes-192-ecb",
            CipherId::Aes256Ecb => "aes-256-ecb",
        }
    }

    /// Block width in bits; bounds the usable Feistel side size.
    pub const fn block_bits(self) -> usize {
        AES_BLOCK_BITS
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        match self {
            CipherId::Aes128Cbc | CipherId::Aes128Ecb => 16,
            CipherId::Aes192Cbc | CipherId::Aes192Ecb => 24,
            CipherId::Aes256Cbc | CipherId::Aes256Ecb => 32,
        }
    }

    /// Required IV length, `None` for modes without an IV.
    pub const fn iv_bytes(self) -> Option<usize> {
        match self {
            CipherId::Aes128Cbc | CipherId::Aes192Cbc | CipherId::Aes256Cbc => Some(CBC_IV_BYTES),
            CipherId::Aes128Ecb | CipherId::Aes192Ecb | CipherId::Aes256Ecb => None,
        }
    }

    /// Whether this cipher mode needs an IV.
    pub const fn requires_iv(self) -> bool {
        self.iv_bytes().is_some()
    }

    /// Checks that `iv` is present with the native length, or absent when none is used.
    pub fn validate_iv(self, iv: Option<&[u8]>) -> Result<(), InputError> {
        match (self.iv_bytes(), iv) {
            (Some(expected), Some(iv)) if iv.len() == expected => Ok(()),
            (Some(expected), iv) => Err(InputError::IvLength {
                cipher: self.name(),
                expected,
                actual: iv.map_or(0, <[u8]>::len),
            }),
            (None, None) => Ok(()),
            (None, Some(_)) => Err(InputError::UnexpectedIv {
                cipher: self.name(),
            }),
        }
    }

    /// Derives the cipher key from an arbitrary-length password.
    ///
    /// The key is the leading `key_bytes` characters of the lowercase hex MD5
    /// digest of the password.
    pub fn digest_password(self, password: &[u8]) -> Zeroizing<Vec<u8>> {
        let hex_digest = Zeroizing::new(hex::encode(Md5::digest(password)));
        Zeroizing::new(hex_digest.as_bytes()[..self.key_bytes()].to_vec())
    }

    /// Encrypts `plaintext` with PKCS#7 padding.
    ///
    /// `key` must be `key_bytes` long and `iv` must already satisfy
    /// [`validate_iv`](Self::validate_iv); the output is one block longer than
    /// the plaintext rounded down to a block multiple.
    pub fn encrypt(
        self,
        plaintext: &[u8],
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<Vec<u8>, ConfigError> {
        let iv = iv.unwrap_or_default();
        let out = match self {
            CipherId::Aes128Cbc => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            CipherId::Aes192Cbc => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            CipherId::Aes256Cbc => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            CipherId::Aes128Ecb => ecb::Encryptor::<Aes128>::new_from_slice(key)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            CipherId::Aes192Ecb => ecb::Encryptor::<Aes192>::new_from_slice(key)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
            CipherId::Aes256Ecb => ecb::Encryptor::<Aes256>::new_from_slice(key)
                .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        };
        out.map_err(|_| ConfigError::KeyTooShort {
            len: key.len(),
            min: self.key_bytes(),
        })
    }

    fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CipherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ConfigError::UnsupportedCipher {
                name: s.to_owned(),
                allowed: Self::allowed_names(),
            })
    }
}

impl TryFrom<String> for CipherId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CipherId> for String {
    fn from(value: CipherId) -> Self {
        value.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS-197 appendix C.1 key and plaintext.
    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn ecb_first_block_matches_nist_vector() {
        let out = CipherId::Aes128Ecb
            .encrypt(&NIST_PLAIN, &NIST_KEY, None)
            .unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(&out[..16], &NIST_CIPHER);
    }

    #[test]
    fn cbc_with_zero_iv_matches_ecb_on_first_block() {
        let iv = [0u8; 16];
        let cbc = CipherId::Aes128Cbc
            .encrypt(&NIST_PLAIN, &NIST_KEY, Some(&iv))
            .unwrap();
        assert_eq!(&cbc[..16], &NIST_CIPHER);
    }

    #[test]
    fn output_is_padded_to_next_block() {
        let key = [7u8; 32];
        for len in [0usize, 1, 15, 16, 17, 40] {
            let input = vec![b'1'; len];
            let out = CipherId::Aes256Ecb.encrypt(&input, &key, None).unwrap();
            assert_eq!(out.len(), 16 * (len / 16 + 1));
        }
    }

    #[test]
    fn digest_password_uses_hex_md5_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        let key = CipherId::Aes128Cbc.digest_password(b"");
        assert_eq!(key.as_slice(), b"d41d8cd98f00b204");
        let key = CipherId::Aes256Cbc.digest_password(b"");
        assert_eq!(key.as_slice(), b"d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(CipherId::Aes192Ecb.digest_password(b"pw").len(), 24);
    }

    #[test]
    fn iv_rules_follow_mode() {
        let cbc = CipherId::Aes128Cbc;
        assert!(cbc.validate_iv(Some(&[0u8; 16])).is_ok());
        assert_eq!(
            cbc.validate_iv(Some(&[0u8; 8])),
            Err(InputError::IvLength {
                cipher: "aes-128-cbc",
                expected: 16,
                actual: 8,
            })
        );
        assert!(matches!(
            cbc.validate_iv(None),
            Err(InputError::IvLength { actual: 0, .. })
        ));

        let ecb = CipherId::Aes128Ecb;
        assert!(ecb.validate_iv(None).is_ok());
        assert!(matches!(
            ecb.validate_iv(Some(&[0u8; 16])),
            Err(InputError::UnexpectedIv { .. })
        ));
    }

    #[test]
    fn names_round_trip() {
        for cipher in CipherId::ALL {
            assert_eq!(cipher.name().parse::<CipherId>().unwrap(), cipher);
            assert_eq!(cipher.block_bits(), 128);
        }
        let err = "des-ede3".parse::<CipherId>().unwrap_err();
        assert!(err.to_string().contains("aes-128-cbc, aes-192-cbc"));
    }
}
