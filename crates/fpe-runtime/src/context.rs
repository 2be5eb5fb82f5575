//! Reusable encryption context.

use fpe_core::{
    numeral, schedule_with, Base, CipherId, ConfigError, Domain, KeyMaterial, KeySchedule,
    Result, RoundCipher, SizingParameters, MIN_ROUNDS,
};
use tracing::debug;

use crate::feistel::{decrypt_block, encrypt_block};
use crate::walk::{CycleWalker, DEFAULT_WALK_LIMIT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Immutable FPE context: domain, cipher and round count are fixed at
/// construction, key material is supplied per call.
///
/// Nothing is cached between calls, so one context can be shared freely
/// across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpeContext {
    domain: Domain,
    cipher: CipherId,
    rounds: u32,
    sizing: SizingParameters,
    walk_limit: u32,
}

impl FpeContext {
    /// Validates the configuration and sizes the Feistel block.
    pub fn new(domain: Domain, cipher: CipherId, rounds: u32) -> Result<Self> {
        if rounds < MIN_ROUNDS {
            return Err(ConfigError::TooFewRounds {
                rounds,
                min: MIN_ROUNDS,
            }
            .into());
        }
        let sizing = SizingParameters::derive(&domain, cipher)?;
        Ok(Self {
            domain,
            cipher,
            rounds,
            sizing,
            walk_limit: DEFAULT_WALK_LIMIT,
        })
    }

    /// Returns a context with a different cycle-walk cap.
    pub fn with_walk_limit(self, walk_limit: u32) -> Result<Self> {
        if walk_limit == 0 {
            return Err(ConfigError::ZeroWalkLimit.into());
        }
        Ok(Self { walk_limit, ..self })
    }

    /// Domain the context permutes.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Cipher used for key derivation and the round function.
    pub fn cipher(&self) -> CipherId {
        self.cipher
    }

    /// Number of Feistel rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Block widths derived from the domain.
    pub fn sizing(&self) -> &SizingParameters {
        &self.sizing
    }

    /// Cycle-walk cap.
    pub fn walk_limit(&self) -> u32 {
        self.walk_limit
    }

    /// Derives the key schedule this context would use for `material`.
    pub fn derive_schedule(&self, material: &KeyMaterial) -> Result<KeySchedule> {
        fpe_core::derive_schedule(material, self.rounds, self.sizing.side_size, self.cipher)
    }

    /// Encrypts `value`, a numeral in `base` inside the domain.
    ///
    /// The result is in the same base; `pad` left-pads it to the domain's
    /// canonical width for that base, otherwise leading zeros are stripped.
    pub fn encrypt(
        &self,
        value: &str,
        base: Base,
        material: &KeyMaterial,
        pad: bool,
    ) -> Result<String> {
        self.run(Direction::Encrypt, value, base, material, pad)
    }

    /// Inverse of [`encrypt`](Self::encrypt).
    pub fn decrypt(
        &self,
        value: &str,
        base: Base,
        material: &KeyMaterial,
        pad: bool,
    ) -> Result<String> {
        self.run(Direction::Decrypt, value, base, material, pad)
    }

    fn run(
        &self,
        direction: Direction,
        value: &str,
        base: Base,
        material: &KeyMaterial,
        pad: bool,
    ) -> Result<String> {
        base.validate(value)?;
        self.domain.check(&numeral::parse(value, base.radix())?)?;

        let round_cipher = RoundCipher::new(self.cipher, material)?;
        let schedule = schedule_with(
            &round_cipher,
            material.master_key(),
            self.rounds,
            self.sizing.side_size,
        )?;
        debug!(
            ?direction,
            cipher = %self.cipher,
            rounds = self.rounds,
            bin_size = self.sizing.bin_size,
            "derived key schedule"
        );

        let walker = CycleWalker::new(&self.domain, &self.sizing, self.walk_limit);
        walker.walk(value, base, pad, |block| match direction {
            Direction::Encrypt => encrypt_block(block, &round_cipher, &schedule),
            Direction::Decrypt => decrypt_block(block, &round_cipher, &schedule),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpe_core::{Error, InputError};

    fn material() -> KeyMaterial {
        KeyMaterial::new(
            "0123456789zxcvbn",
            "0123456789qwerty",
            Some(b"0123456789abcdef".to_vec()),
        )
        .unwrap()
    }

    fn context(min: &str, max: &str) -> FpeContext {
        FpeContext::new(Domain::new(min, max).unwrap(), CipherId::Aes128Cbc, 7).unwrap()
    }

    #[test]
    fn documented_usage_round_trips() {
        let ctx = context("0", "999999999");
        let m = material();
        let encrypted = ctx.encrypt("2048", Base::Decimal, &m, false).unwrap();
        assert_ne!(encrypted, "2048");
        let decrypted = ctx.decrypt(&encrypted, Base::Decimal, &m, false).unwrap();
        assert_eq!(decrypted, "2048");
    }

    #[test]
    fn too_few_rounds_is_rejected() {
        let err = FpeContext::new(Domain::new("0", "99").unwrap(), CipherId::Aes128Cbc, 2)
            .unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::TooFewRounds { rounds: 2, min: 3 })
        );
    }

    #[test]
    fn zero_walk_limit_is_rejected() {
        let err = context("0", "99").with_walk_limit(0).unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::ZeroWalkLimit));
        let ctx = context("0", "99").with_walk_limit(3).unwrap();
        assert_eq!(ctx.walk_limit(), 3);
    }

    #[test]
    fn malformed_input_is_rejected_before_cipher_work() {
        let ctx = context("0", "999");
        // No IV: would fail in the cipher layer if validation came later.
        let m = material().with_iv(None);
        let err = ctx.encrypt("12a", Base::Decimal, &m, false).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::MalformedNumeral { .. })));
        let err = ctx.encrypt("FF", Base::Hexadecimal, &m, false).unwrap_err();
        assert!(matches!(err, Error::Input(InputError::MalformedNumeral { .. })));
    }

    #[test]
    fn out_of_domain_input_is_rejected() {
        let ctx = context("100", "999");
        let err = ctx
            .encrypt("99", Base::Decimal, &material(), false)
            .unwrap_err();
        assert!(matches!(err, Error::Input(InputError::OutOfDomain { .. })));
        let err = ctx
            .decrypt("1000", Base::Decimal, &material(), false)
            .unwrap_err();
        assert!(matches!(err, Error::Input(InputError::OutOfDomain { .. })));
    }

    #[test]
    fn missing_iv_is_rejected_for_cbc() {
        let ctx = context("0", "999");
        let err = ctx
            .encrypt("5", Base::Decimal, &material().with_iv(None), false)
            .unwrap_err();
        assert!(matches!(err, Error::Input(InputError::IvLength { actual: 0, .. })));
    }

    #[test]
    fn padding_uses_canonical_width() {
        let ctx = context("0", "999999999");
        let m = material();
        let padded = ctx.encrypt("7", Base::Decimal, &m, true).unwrap();
        assert_eq!(padded.len(), 9);
        let unpadded = ctx.encrypt("7", Base::Decimal, &m, false).unwrap();
        assert_eq!(numeral::pad(&padded, 0), unpadded);

        let bin = ctx.encrypt("111", Base::Binary, &m, true).unwrap();
        assert_eq!(bin.len(), 30);
    }

    #[test]
    fn schedule_matches_context_parameters() {
        let ctx = context("0", "999999999");
        let schedule = ctx.derive_schedule(&material()).unwrap();
        assert_eq!(schedule.rounds(), 7);
        assert_eq!(schedule.side_size(), 15);
        assert_eq!(schedule.cipher(), CipherId::Aes128Cbc);
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FpeContext>();
    }
}
