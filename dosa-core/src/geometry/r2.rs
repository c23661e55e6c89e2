use std::{ops::Sub, fmt::{Display, Formatter, self}};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// A point in the (already projected) coordinate space shared by edges and regions.
///
/// `y` grows "up": the top-left corner of a region has the smaller `x` and the larger `y`,
/// matching longitude/latitude. Screen-space callers flip `y` before handing points over.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

impl<D> R2<D> {
    pub fn new(x: D, y: D) -> Self {
        R2 { x, y }
    }
}

impl R2<f64> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<D: Display> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl From<(f64, f64)> for R2<f64> {
    fn from((x, y): (f64, f64)) -> Self {
        R2 { x, y }
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
