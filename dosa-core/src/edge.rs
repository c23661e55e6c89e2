use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

/// A directed flight: origin → destination, flown on `day`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Edge {
    pub id: u64,
    pub origin: R2<f64>,
    pub destination: R2<f64>,
    /// ISO date, `YYYY-MM-DD`
    #[tsify(type = "string")]
    pub day: NaiveDate,
}

impl Edge {
    pub fn new(id: u64, origin: impl Into<R2<f64>>, destination: impl Into<R2<f64>>, day: NaiveDate) -> Self {
        Edge { id, origin: origin.into(), destination: destination.into(), day }
    }

    pub fn weekday(&self) -> Weekday {
        self.day.weekday()
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
///
/// Loaders are expected to hand over deduplicated data already; this only guards the `id mod
/// stride` subsampling (and the per-id rendering keys downstream) against duplicates.
pub fn dedup(edges: Vec<Edge>) -> Vec<Edge> {
    let n = edges.len();
    let edges: Vec<Edge> = edges.into_iter().unique_by(|e| e.id).collect();
    if edges.len() != n {
        debug!("dropped {} edges with duplicate ids", n - edges.len());
    }
    edges
}
