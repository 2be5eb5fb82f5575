//! Serializable engine configuration.

use fpe_core::{CipherId, Domain, Result, MIN_ROUNDS};
use serde::{Deserialize, Serialize};

use crate::context::FpeContext;
use crate::walk::DEFAULT_WALK_LIMIT;

/// Default lower bound.
pub const DEFAULT_MIN_VALUE: &str = "0";

/// Default upper bound.
pub const DEFAULT_MAX_VALUE: &str = "9999999999";

/// Everything needed to build an [`FpeContext`], in a serde-friendly shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FpeConfig {
    /// Domain lower bound as a decimal string.
    pub min: String,
    /// Domain upper bound as a decimal string.
    pub max: String,
    /// Cipher name, e.g. `aes-128-cbc`.
    pub cipher: CipherId,
    /// Feistel round count.
    pub rounds: u32,
    /// Cycle-walk cap.
    pub walk_limit: u32,
}

impl Default for FpeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE.to_owned(),
            max: DEFAULT_MAX_VALUE.to_owned(),
            cipher: CipherId::default(),
            rounds: MIN_ROUNDS,
            walk_limit: DEFAULT_WALK_LIMIT,
        }
    }
}

impl FpeConfig {
    /// Validates the configuration into a context.
    pub fn build(&self) -> Result<FpeContext> {
        let domain = Domain::new(&self.min, &self.max)?;
        FpeContext::new(domain, self.cipher, self.rounds)?.with_walk_limit(self.walk_limit)
    }
}
