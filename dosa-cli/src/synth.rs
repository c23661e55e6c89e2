//! Synthetic flight lists: random airports inside a bounding box, random routes between them.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dosa_core::{Edge, Rect, R2};

#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub count: usize,
    pub airports: usize,
    pub bbox: Rect,
    pub start: NaiveDate,
    pub days: u64,
    pub seed: u64,
}

/// `count` flights with ids `0..count`, dated uniformly over `days` days from `start`.
/// Airports are drawn from the half-open box, so every endpoint is contained in `bbox`.
pub fn synth(config: &SynthConfig) -> Result<Vec<Edge>> {
    let days = config.days.max(1);
    config
        .start
        .checked_add_days(Days::new(days - 1))
        .with_context(|| format!("{} days from {} is past the last representable date", days, config.start))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let R2 { x: x0, y: y0 } = config.bbox.corner_a;
    let R2 { x: x1, y: y1 } = config.bbox.corner_b;
    let airports: Vec<R2<f64>> = (0..config.airports.max(2))
        .map(|_| R2::new(rng.gen_range(x0..x1), y0 - rng.gen_range(0.0..y0 - y1)))
        .collect();
    let n = airports.len();
    (0..config.count as u64)
        .map(|id| {
            let o = rng.gen_range(0..n);
            // any index but the origin's
            let d = (o + 1 + rng.gen_range(0..n - 1)) % n;
            let offset = Days::new(rng.gen_range(0..days));
            let day = config.start.checked_add_days(offset).context("flight date out of range")?;
            Ok(Edge { id, origin: airports[o], destination: airports[d], day })
        })
        .collect()
}
