//! Format-preserving encryption engine for bounded integer domains.
//!
//! A numeral in base 2, 10 or 16 is mapped to a block just wide enough to hold
//! the domain, permuted by a balanced Feistel network keyed from AES, and
//! cycle-walked until the result lies back inside `[min, max]`. The output is
//! rendered in the input's base.
//!
//! ```
//! use fpe_core::{Base, CipherId, Domain, KeyMaterial};
//! use fpe_runtime::FpeContext;
//!
//! let ctx = FpeContext::new(Domain::new("0", "999999999")?, CipherId::Aes128Cbc, 7)?;
//! let key = KeyMaterial::new(
//!     "0123456789zxcvbn",
//!     "0123456789qwerty",
//!     Some(b"0123456789abcdef".to_vec()),
//! )?;
//!
//! let encrypted = ctx.encrypt("2048", Base::Decimal, &key, false)?;
//! assert_eq!(ctx.decrypt(&encrypted, Base::Decimal, &key, false)?, "2048");
//! # Ok::<(), fpe_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod context;
pub mod feistel;
mod walk;

pub use crate::config::{FpeConfig, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
pub use crate::context::FpeContext;
pub use crate::feistel::RoundFunction;
pub use crate::walk::{CycleWalker, DEFAULT_WALK_LIMIT};

use fpe_core::{Base, CipherId, Domain, KeyMaterial, Result};

/// One-shot encryption without keeping a context around.
pub fn encrypt(
    value: &str,
    base: Base,
    domain: &Domain,
    material: &KeyMaterial,
    rounds: u32,
    cipher: CipherId,
    pad: bool,
) -> Result<String> {
    FpeContext::new(domain.clone(), cipher, rounds)?.encrypt(value, base, material, pad)
}

/// One-shot decryption, inverse of [`encrypt`].
pub fn decrypt(
    value: &str,
    base: Base,
    domain: &Domain,
    material: &KeyMaterial,
    rounds: u32,
    cipher: CipherId,
    pad: bool,
) -> Result<String> {
    FpeContext::new(domain.clone(), cipher, rounds)?.decrypt(value, base, material, pad)
}
