use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::ConfigError, subsample::Subsampler};

/// Engine sizing, fixed for the lifetime of an [`Engine`](crate::engine::Engine).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Number of region slots `N`.
    pub capacity: usize,
    /// Rendered-edge cap for subsampling; `0` disables it.
    pub target_count: usize,
}

impl EngineConfig {
    pub const DEFAULT_CAPACITY: usize = 5;
    pub const MAX_CAPACITY: usize = 64;

    /// Reject capacities the dense `2N × 2N` matrix can't be sized for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let err = ConfigError::Capacity { capacity: self.capacity, max: Self::MAX_CAPACITY };
        match self.capacity.checked_mul(2) {
            Some(_) if self.capacity <= Self::MAX_CAPACITY => Ok(()),
            _ => Err(err),
        }
    }

    pub fn subsampler(&self) -> Subsampler {
        Subsampler::new(Some(self.target_count))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            capacity: Self::DEFAULT_CAPACITY,
            target_count: Subsampler::DEFAULT_TARGET_COUNT,
        }
    }
}
