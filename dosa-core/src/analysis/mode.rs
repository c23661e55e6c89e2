//! Classification mode flags and the strategies they select.
//!
//! The three user-facing flags combine into eight modes, but the classifier only distinguishes
//! a handful of behaviors: whether same-region edges are attributed to the diagonal, and which
//! rule (if any) handles edges that leave a region. [`ClassificationMode::strategy`] is the
//! decision table between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Which kinds of flows are shown; toggled independently by the filter UI.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(default)]
pub struct ClassificationMode {
    /// Both endpoints in the same region.
    pub within: bool,
    /// Endpoints in two different active regions.
    pub between: bool,
    /// One endpoint in a region, the other outside every active region.
    pub background: bool,
}

/// How edges with exactly one endpoint in the region under test are handled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum CrossRule {
    /// Never attributed.
    Off,
    /// Attributed only when the other endpoint lies in another active region.
    Between,
    /// Attributed to the region's background pseudo-node when the other endpoint lies outside all
    /// active regions; region-to-region flows are dropped.
    Background,
    /// Region-to-region flows go to the region pair, everything else to the background node.
    BackgroundBetween,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub struct Strategy {
    pub within: bool,
    pub cross: CrossRule,
}

impl Strategy {
    /// Nothing can ever be visible.
    pub fn is_empty(&self) -> bool {
        !self.within && self.cross == CrossRule::Off
    }
}

impl ClassificationMode {
    pub fn new(within: bool, between: bool, background: bool) -> Self {
        ClassificationMode { within, between, background }
    }

    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    pub fn strategy(&self) -> Strategy {
        use CrossRule::*;
        let cross = match (self.between, self.background) {
            (false, false) => Off,
            (true, false) => Between,
            (false, true) => Background,
            (true, true) => BackgroundBetween,
        };
        Strategy { within: self.within, cross }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool, c: char| if on { c } else { '-' };
        write!(f, "{}{}{}", flag(self.within, 'w'), flag(self.between, 'b'), flag(self.background, 'g'))
    }
}
