//! Deterministic thinning of the rendered edge set.
//!
//! Counts always cover every visible edge; only what is handed to the renderer is thinned, by
//! keeping edges whose id is a multiple of the stride.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Subsampler {
    /// Rendering cap; `0` disables thinning.
    pub target_count: usize,
}

impl Default for Subsampler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Subsampler {
    pub const DEFAULT_TARGET_COUNT: usize = 20_000;

    pub fn new(target_count: Option<usize>) -> Self {
        Subsampler { target_count: target_count.unwrap_or(Self::DEFAULT_TARGET_COUNT) }
    }

    /// `floor(total / target)`, never below 1.
    pub fn stride(&self, total_visible: usize) -> usize {
        if self.target_count == 0 {
            return 1;
        }
        (total_visible / self.target_count).max(1)
    }

    pub fn keeps(id: u64, stride: usize) -> bool {
        id % (stride.max(1) as u64) == 0
    }
}
