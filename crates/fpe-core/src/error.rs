//! Error taxonomy shared by the core primitives and the runtime engine.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by every fallible operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The engine was configured with parameters it cannot work with.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A per-call input (numeral, base, IV) was rejected before any cipher work.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A numeral string could not be parsed in its radix.
    #[error(transparent)]
    Numeral(#[from] NumeralError),

    /// Cycle walking hit its iteration cap without landing inside the domain.
    #[error("cycle walk did not land inside the domain after {limit} iterations")]
    DomainExhausted {
        /// Iteration cap that was exceeded.
        limit: u32,
    },
}

/// Construction-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Cipher name is not part of the registry.
    #[error("cipher must be one of {allowed}, got \"{name}\"")]
    UnsupportedCipher {
        /// Name that was requested.
        name: String,
        /// Comma separated list of registered ciphers.
        allowed: String,
    },

    /// Fewer Feistel rounds than the minimum.
    #[error("number of rounds must be at least {min}, got {rounds}")]
    TooFewRounds {
        /// Requested round count.
        rounds: u32,
        /// Minimum accepted round count.
        min: u32,
    },

    /// Master key is shorter than the minimum.
    #[error("key must be at least {min} bytes long, got {len}")]
    KeyTooShort {
        /// Provided length in bytes.
        len: usize,
        /// Minimum length in bytes.
        min: usize,
    },

    /// Password is shorter than the minimum.
    #[error("password must be at least {min} bytes long, got {len}")]
    PasswordTooShort {
        /// Provided length in bytes.
        len: usize,
        /// Minimum length in bytes.
        min: usize,
    },

    /// Half-block width exceeds what the cipher block can seed.
    #[error("side size ({side_bits} bits) must be less or equal to cipher block length ({block_bits} bits)")]
    SideTooWide {
        /// Required half-block width.
        side_bits: usize,
        /// Cipher block width.
        block_bits: usize,
    },

    /// Domain bound is not a canonical decimal string.
    #[error("{which} value must be a decimal number without leading zeros, got \"{value}\"")]
    InvalidBound {
        /// `"min"` or `"max"`.
        which: &'static str,
        /// Offending value.
        value: String,
    },

    /// `max` does not exceed `min`.
    #[error("max value ({max}) must be greater than min value ({min})")]
    EmptyDomain {
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },

    /// Cycle-walk cap of zero.
    #[error("walk limit must be at least 1")]
    ZeroWalkLimit,
}

/// Call-entry failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Radix outside the supported set.
    #[error("base must be one of 2, 10, 16 (or bin, dec, hex), got \"{0}\"")]
    UnsupportedBase(String),

    /// Numeral contains characters outside its base's class.
    #[error("input \"{input}\" does not match pattern {pattern}")]
    MalformedNumeral {
        /// Offending input.
        input: String,
        /// Character class the input must match.
        pattern: &'static str,
    },

    /// Numeral value lies outside `[min, max]`.
    #[error("input value {value} is outside the domain [{min}, {max}]")]
    OutOfDomain {
        /// Decimal value of the input.
        value: String,
        /// Domain lower bound.
        min: String,
        /// Domain upper bound.
        max: String,
    },

    /// IV length does not match the cipher's native IV size.
    #[error("initialization vector of {expected} bytes is required for cipher \"{cipher}\", {actual} given")]
    IvLength {
        /// Cipher name.
        cipher: &'static str,
        /// Required IV length.
        expected: usize,
        /// Provided IV length (0 when absent).
        actual: usize,
    },

    /// IV supplied for a cipher mode that takes none.
    #[error("cipher \"{cipher}\" does not use an initialization vector")]
    UnexpectedIv {
        /// Cipher name.
        cipher: &'static str,
    },
}

/// A numeral string is not a valid number in the requested radix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a valid base-{radix} numeral")]
pub struct NumeralError {
    /// Offending input.
    pub input: String,
    /// Radix it was parsed in.
    pub radix: u32,
}
