//! Cycle walking: re-apply the block permutation until the output lands in the domain.

use fpe_core::{numeral, Base, Domain, Error, Result, SizingParameters};
use num_bigint::BigUint;
use tracing::{debug, warn};

/// Default cap on permutation applications per call.
///
/// Each attempt lands in the domain with probability above 1/4, so reaching
/// this cap means something is badly wrong rather than unlucky.
pub const DEFAULT_WALK_LIMIT: u32 = 1000;

/// Drives a block permutation until its output falls inside `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct CycleWalker<'a> {
    domain: &'a Domain,
    sizing: &'a SizingParameters,
    limit: u32,
}

impl<'a> CycleWalker<'a> {
    /// Creates a walker with an explicit iteration cap.
    pub fn new(domain: &'a Domain, sizing: &'a SizingParameters, limit: u32) -> Self {
        Self {
            domain,
            sizing,
            limit,
        }
    }

    /// Walks from `input` (already validated for `base`) and returns the
    /// first in-domain output, rendered in `base`.
    ///
    /// Every attempt runs the full pipeline: the previous output numeral is
    /// converted back to a block, permuted, and rendered again.
    pub fn walk<P>(&self, input: &str, base: Base, pad: bool, mut permute: P) -> Result<String>
    where
        P: FnMut(&BigUint) -> Result<BigUint>,
    {
        let width = if pad { self.sizing.width(base) } else { 0 };
        let mut current = input.to_owned();

        for attempt in 1..=self.limit {
            let block = self.to_block(&current, base)?;
            let output = permute(&block)?;
            let rendered = numeral::render(&output, base.radix(), width);
            if self.domain.contains(&output) {
                if attempt > 1 {
                    debug!(attempts = attempt, "cycle walk landed in domain");
                }
                return Ok(rendered);
            }
            debug!(attempt, "output outside domain, walking again");
            current = rendered;
        }

        warn!(limit = self.limit, "cycle walk limit reached");
        Err(Error::DomainExhausted { limit: self.limit })
    }

    fn to_block(&self, digits: &str, base: Base) -> Result<BigUint> {
        let bits = match base {
            Base::Binary => numeral::pad(digits, self.sizing.bin_size),
            Base::Decimal => numeral::dec_to_bin(digits, self.sizing.bin_size)?,
            Base::Hexadecimal => numeral::hex_to_bin(digits, self.sizing.bin_size)?,
        };
        Ok(numeral::parse(&bits, 2)?)
    }
}
