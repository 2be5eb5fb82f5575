//! Bounded integer domains and the Feistel block sizing derived from them.

use num_bigint::BigUint;

use crate::base::Base;
use crate::cipher::CipherId;
use crate::error::{ConfigError, InputError};
use crate::numeral;

/// Inclusive integer range `[min, max]` with `max > min >= 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    min: BigUint,
    max: BigUint,
}

impl Domain {
    /// Builds a domain from canonical decimal strings (no leading zeros except `"0"`).
    pub fn new(min: &str, max: &str) -> Result<Self, ConfigError> {
        let min = parse_bound("min", min)?;
        let max = parse_bound("max", max)?;
        Self::from_bounds(min, max)
    }

    /// Builds a domain from integer bounds.
    pub fn from_bounds(min: BigUint, max: BigUint) -> Result<Self, ConfigError> {
        if max <= min {
            return Err(ConfigError::EmptyDomain {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> &BigUint {
        &self.min
    }

    /// Upper bound.
    pub fn max(&self) -> &BigUint {
        &self.max
    }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: &BigUint) -> bool {
        &self.min <= value && value <= &self.max
    }

    /// Rejects `value` unless it lies inside the domain.
    pub fn check(&self, value: &BigUint) -> Result<(), InputError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(InputError::OutOfDomain {
                value: value.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            })
        }
    }
}

fn parse_bound(which: &'static str, value: &str) -> Result<BigUint, ConfigError> {
    let canonical = value == "0"
        || (value.starts_with(|c: char| matches!(c, '1'..='9'))
            && value.bytes().all(|b| b.is_ascii_digit()));
    let invalid = || ConfigError::InvalidBound {
        which,
        value: value.to_owned(),
    };
    if !canonical {
        return Err(invalid());
    }
    numeral::parse(value, 10).map_err(|_| invalid())
}

/// Widths derived from a domain and the cipher block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizingParameters {
    /// Even Feistel block width in bits, minimal with `4^(bin_size/2) > max`.
    pub bin_size: usize,
    /// Half-block width in bits.
    pub side_size: usize,
    /// Decimal digit count of `max`.
    pub dec_size: usize,
    /// Hexadecimal digit count of a full block (`bin_size / 4`).
    pub hex_size: usize,
}

impl SizingParameters {
    /// Sizes the Feistel block for `domain` and checks it against `cipher`'s block.
    pub fn derive(domain: &Domain, cipher: CipherId) -> Result<Self, ConfigError> {
        Self::for_max(domain.max(), cipher.block_bits())
    }

    /// Sizes the Feistel block for an upper bound and a block width in bits.
    pub fn for_max(max: &BigUint, block_bits: usize) -> Result<Self, ConfigError> {
        let four = BigUint::from(4u8);
        let mut bin_size = 2usize;
        let mut span = four.clone();
        while &span <= max {
            bin_size += 2;
            span *= &four;
        }

        let side_size = bin_size / 2;
        if side_size > block_bits {
            return Err(ConfigError::SideTooWide {
                side_bits: side_size,
                block_bits,
            });
        }

        Ok(Self {
            bin_size,
            side_size,
            dec_size: max.to_str_radix(10).len(),
            hex_size: bin_size / 4,
        })
    }

    /// Canonical output width for `base` when padding is requested.
    pub fn width(&self, base: Base) -> usize {
        match base {
            Base::Binary => self.bin_size,
            Base::Decimal => self.dec_size,
            Base::Hexadecimal => self.hex_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn sizing(max: &str) -> SizingParameters {
        let domain = Domain::new("0", max).unwrap();
        SizingParameters::derive(&domain, CipherId::Aes128Cbc).unwrap()
    }

    #[test]
    fn bin_size_is_minimal_even_width() {
        assert_eq!(sizing("1").bin_size, 2);
        assert_eq!(sizing("3").bin_size, 2);
        assert_eq!(sizing("4").bin_size, 4);
        assert_eq!(sizing("15").bin_size, 4);
        assert_eq!(sizing("16").bin_size, 6);
        assert_eq!(sizing("999").bin_size, 10);
        assert_eq!(sizing("1024").bin_size, 12);
    }

    #[test]
    fn derived_widths() {
        let s = sizing("999999999");
        assert_eq!(s.bin_size, 30);
        assert_eq!(s.side_size, 15);
        assert_eq!(s.dec_size, 9);
        assert_eq!(s.hex_size, 7);
        assert_eq!(s.width(Base::Binary), 30);
        assert_eq!(s.width(Base::Decimal), 9);
        assert_eq!(s.width(Base::Hexadecimal), 7);

        let s = sizing("9999999999");
        assert_eq!(s.bin_size, 34);
        assert_eq!(s.dec_size, 10);
    }

    #[test]
    fn rejects_side_wider_than_block() {
        // 2^256 - 1 needs a 256-bit block, i.e. 128-bit halves: still fits.
        let max = (BigUint::one() << 256usize) - BigUint::one();
        let s = SizingParameters::for_max(&max, 128).unwrap();
        assert_eq!(s.side_size, 128);

        let max = BigUint::one() << 256usize;
        assert_eq!(
            SizingParameters::for_max(&max, 128),
            Err(ConfigError::SideTooWide {
                side_bits: 129,
                block_bits: 128,
            })
        );
    }

    #[test]
    fn domain_bounds_are_validated() {
        assert!(Domain::new("0", "10").is_ok());
        assert!(Domain::new("100", "999").is_ok());
        assert!(matches!(
            Domain::new("007", "999"),
            Err(ConfigError::InvalidBound { which: "min", .. })
        ));
        assert!(matches!(Domain::new("0", "0"), Err(ConfigError::EmptyDomain { .. })));
        assert!(matches!(
            Domain::new("1", "-5"),
            Err(ConfigError::InvalidBound { which: "max", .. })
        ));
        assert!(matches!(
            Domain::new("50", "50"),
            Err(ConfigError::EmptyDomain { .. })
        ));
        assert!(matches!(
            Domain::new("60", "50"),
            Err(ConfigError::EmptyDomain { .. })
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let domain = Domain::new("100", "999").unwrap();
        assert!(domain.contains(&BigUint::from(100u32)));
        assert!(domain.contains(&BigUint::from(999u32)));
        assert!(!domain.contains(&BigUint::from(99u32)));
        assert!(!domain.contains(&BigUint::from(1000u32)));
        assert!(matches!(
            domain.check(&BigUint::from(5u32)),
            Err(InputError::OutOfDomain { .. })
        ));
    }
}
