use std::fmt;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::RegionError, r2::R2};

/// Axis-aligned rectangle, always stored normalized: `corner_a` is the top-left corner (smaller
/// `x`, larger `y`), `corner_b` the bottom-right one (larger `x`, smaller `y`).
///
/// Only [`Rect::new`] builds one, so `corner_a.x < corner_b.x && corner_a.y > corner_b.y` holds for
/// every value in circulation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Tsify)]
pub struct Rect {
    pub corner_a: R2<f64>,
    pub corner_b: R2<f64>,
}

/// Raw corner pair as delivered by a region-drawing UI: draw-start and draw-end, in any order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Corners {
    pub a: R2<f64>,
    pub b: R2<f64>,
}

impl Rect {
    /// Build a rectangle from two opposite corners.
    ///
    /// Reversed drags (end corner left of or above the start corner) are normalized. Rectangles
    /// with zero width or height would contain nothing under half-open bounds and are rejected.
    pub fn new(a: R2<f64>, b: R2<f64>) -> Result<Rect, RegionError> {
        if !a.is_finite() {
            return Err(RegionError::NonFinite(a));
        }
        if !b.is_finite() {
            return Err(RegionError::NonFinite(b));
        }
        if a.x == b.x || a.y == b.y {
            return Err(RegionError::Degenerate { a, b });
        }
        Ok(Rect {
            corner_a: R2 { x: a.x.min(b.x), y: a.y.max(b.y) },
            corner_b: R2 { x: a.x.max(b.x), y: a.y.min(b.y) },
        })
    }

    pub fn width(&self) -> f64 {
        (self.corner_b - self.corner_a).x
    }

    pub fn height(&self) -> f64 {
        -(self.corner_b - self.corner_a).y
    }
}

impl TryFrom<Corners> for Rect {
    type Error = RegionError;
    fn try_from(Corners { a, b }: Corners) -> Result<Self, Self::Error> {
        Rect::new(a, b)
    }
}

impl From<Rect> for Corners {
    fn from(rect: Rect) -> Self {
        Corners { a: rect.corner_a, b: rect.corner_b }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.corner_a, self.corner_b)
    }
}
