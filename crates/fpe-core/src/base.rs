//! Numeral bases accepted by the engine.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Radix of an input or output numeral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// `[0-1]+`
    #[serde(alias = "bin", alias = "2")]
    Binary,
    /// `[0-9]+`
    #[serde(alias = "dec", alias = "10")]
    Decimal,
    /// `[a-f0-9]+`, lowercase only.
    #[serde(alias = "hex", alias = "16")]
    Hexadecimal,
}

impl Base {
    /// All supported bases.
    pub const ALL: [Base; 3] = [Base::Binary, Base::Decimal, Base::Hexadecimal];

    /// Numeric radix.
    pub const fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// Character class a numeral in this base must match.
    pub const fn pattern(self) -> &'static str {
        match self {
            Base::Binary => "[0-1]+",
            Base::Decimal => "[0-9]+",
            Base::Hexadecimal => "[a-f0-9]+",
        }
    }

    fn accepts(self, byte: u8) -> bool {
        match self {
            Base::Binary => matches!(byte, b'0' | b'1'),
            Base::Decimal => byte.is_ascii_digit(),
            Base::Hexadecimal => matches!(byte, b'0'..=b'9' | b'a'..=b'f'),
        }
    }

    /// Checks `input` against this base's character class.
    pub fn validate(self, input: &str) -> Result<(), InputError> {
        if !input.is_empty() && input.bytes().all(|b| self.accepts(b)) {
            Ok(())
        } else {
            Err(InputError::MalformedNumeral {
                input: input.to_owned(),
                pattern: self.pattern(),
            })
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.radix())
    }
}

impl FromStr for Base {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" | "bin" | "binary" => Ok(Base::Binary),
            "10" | "dec" | "decimal" => Ok(Base::Decimal),
            "16" | "hex" | "hexadecimal" => Ok(Base::Hexadecimal),
            other => Err(InputError::UnsupportedBase(other.to_owned())),
        }
    }
}
