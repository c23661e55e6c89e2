//! Per-edge region attribution.
//!
//! Regions are tested in ascending slot order and the first region whose rule fires decides the
//! edge: either it is attributed to exactly one matrix cell, or it is excluded outright. The
//! classifier never touches the matrix; callers fold the results.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    contains::Contains,
    edge::Edge,
    matrix::Attribution,
    mode::{ClassificationMode, CrossRule, Strategy},
    r2::R2,
    registry::Region,
    weekday::WeekdayMask,
};

/// Everything the filter UI controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(default)]
pub struct Filters {
    pub mode: ClassificationMode,
    pub weekdays: WeekdayMask,
}

impl Default for Filters {
    fn default() -> Self {
        Filters { mode: ClassificationMode::all(), weekdays: WeekdayMask::ALL }
    }
}

/// Outcome of testing an edge against one region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Verdict {
    Attribute(Attribution),
    Exclude,
    Next,
}

pub struct Classifier<'a> {
    regions: &'a [Region],
    strategy: Strategy,
    weekdays: WeekdayMask,
}

impl<'a> Classifier<'a> {
    /// `regions` must be the active regions in ascending slot order.
    pub fn new(regions: &'a [Region], filters: &Filters) -> Self {
        Classifier {
            regions,
            strategy: filters.mode.strategy(),
            weekdays: filters.weekdays.normalized(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The cell `edge` is counted in, or `None` if it is not visible.
    pub fn classify(&self, edge: &Edge) -> Option<Attribution> {
        if self.strategy.is_empty() || !self.weekdays.admits(edge) {
            return None;
        }
        for region in self.regions {
            match self.verdict(region, edge) {
                Verdict::Attribute(attribution) => return Some(attribution),
                Verdict::Exclude => return None,
                Verdict::Next => {}
            }
        }
        None
    }

    fn verdict(&self, region: &Region, edge: &Edge) -> Verdict {
        let slot = region.slot;
        let o = region.contains(&edge.origin);
        let d = region.contains(&edge.destination);
        if !o && !d {
            return Verdict::Next;
        }
        if self.strategy.within && o && d {
            return Verdict::Attribute(Attribution::within(slot));
        }
        match self.strategy.cross {
            CrossRule::Off => Verdict::Next,
            CrossRule::Background | CrossRule::BackgroundBetween => {
                let between = self.strategy.cross == CrossRule::BackgroundBetween;
                if o && !d {
                    match self.other_containing(slot, &edge.destination) {
                        Some(other) if between => Verdict::Attribute(Attribution::between(slot, other)),
                        Some(_) => Verdict::Exclude,
                        None => Verdict::Attribute(Attribution::outbound(slot)),
                    }
                } else if d && !o {
                    match self.other_containing(slot, &edge.origin) {
                        Some(other) if between => Verdict::Attribute(Attribution::between(other, slot)),
                        Some(_) => Verdict::Exclude,
                        None => Verdict::Attribute(Attribution::inbound(slot)),
                    }
                } else {
                    Verdict::Next
                }
            }
            CrossRule::Between => {
                if o {
                    if let Some(other) = self.other_containing(slot, &edge.destination) {
                        return Verdict::Attribute(Attribution::between(slot, other));
                    }
                }
                if d {
                    if let Some(other) = self.other_containing(slot, &edge.origin) {
                        return Verdict::Attribute(Attribution::between(other, slot));
                    }
                }
                Verdict::Next
            }
        }
    }

    /// Lowest active slot other than `slot` containing `p`.
    fn other_containing(&self, slot: usize, p: &R2<f64>) -> Option<usize> {
        self.regions
            .iter()
            .filter(|r| r.slot != slot)
            .find(|r| r.contains(p))
            .map(|r| r.slot)
    }
}

/// One-off classification, without holding on to a [`Classifier`].
pub fn classify(edge: &Edge, regions: &[Region], filters: &Filters) -> Option<Attribution> {
    Classifier::new(regions, filters).classify(edge)
}
