//! Owns the edge collection, region slots and filters, and runs the classification pass.
//!
//! Every change to regions or filters invalidates the last pass; [`Engine::recompute`] then
//! rebuilds it from scratch (matrix reset, full scan, full visible-set rebuild). Nothing is
//! updated incrementally.

use derive_more::Display;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    classify::{Classifier, Filters},
    config::EngineConfig,
    edge::{self, Edge},
    error::{ConfigError, DatasetError, RegionError},
    matrix::{AggregateMatrix, Attribution},
    mode::ClassificationMode,
    r2::R2,
    rect::Rect,
    registry::{Region, Registry, SlotEvent},
    subsample::Subsampler,
    weekday::WeekdayMask,
};

#[cfg(test)]
mod tests;

/// Handle for an in-flight dataset load; only the most recently issued one may complete.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub struct LoadTicket(pub u64);

/// A rendered edge, tagged with the cell it was counted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct VisibleEdge {
    pub id: u64,
    pub origin: R2<f64>,
    pub destination: R2<f64>,
    pub attribution: Attribution,
}

impl VisibleEdge {
    fn new(edge: &Edge, attribution: Attribution) -> Self {
        VisibleEdge { id: edge.id, origin: edge.origin, destination: edge.destination, attribution }
    }
}

/// Result of one classification pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    /// Subsampled visible edges, in dataset order.
    pub visible: Vec<VisibleEdge>,
    /// Counts over every visible edge, before subsampling.
    pub matrix: AggregateMatrix,
    /// Number of visible edges before subsampling; equals `matrix.total()`.
    pub total_visible: usize,
    /// Size of the scanned edge collection.
    pub total_edges: usize,
    pub stride: usize,
}

impl Pass {
    fn empty(capacity: usize) -> Self {
        Pass {
            visible: Vec::new(),
            matrix: AggregateMatrix::new(capacity),
            total_visible: 0,
            total_edges: 0,
            stride: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    subsampler: Subsampler,
    edges: Vec<Edge>,
    registry: Registry,
    filters: Filters,
    /// Last ticket handed out by [`Engine::begin_load`].
    generation: u64,
    /// Ticket of the load still expected to complete, if any.
    pending: Option<u64>,
    pass: Pass,
    dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    /// Fails if `config.capacity` is above [`EngineConfig::MAX_CAPACITY`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// `config` must already be validated.
    fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            subsampler: config.subsampler(),
            edges: Vec::new(),
            registry: Registry::new(config.capacity),
            filters: Filters::default(),
            generation: 0,
            pending: None,
            pass: Pass::empty(config.capacity),
            dirty: true,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // Dataset

    /// Start a dataset load. Any load started earlier and not yet finished becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if let Some(stale) = self.pending.replace(self.generation) {
            debug!("load {} superseded by load {}", stale, self.generation);
        }
        LoadTicket(self.generation)
    }

    /// Replace the edge collection with the result of the load identified by `ticket`.
    ///
    /// Results of superseded loads are discarded and the current collection is kept.
    pub fn finish_load(&mut self, ticket: LoadTicket, edges: Vec<Edge>) -> Result<usize, DatasetError> {
        if self.pending != Some(ticket.0) {
            warn!("discarding {} edges from stale load {} (latest {})", edges.len(), ticket, self.generation);
            return Err(DatasetError::Stale { ticket: ticket.0, latest: self.generation });
        }
        self.pending = None;
        self.edges = edge::dedup(edges);
        self.dirty = true;
        info!("loaded {} edges (load {})", self.edges.len(), ticket);
        Ok(self.edges.len())
    }

    /// Synchronous load: begin and finish in one step.
    pub fn load(&mut self, edges: Vec<Edge>) -> usize {
        let ticket = self.begin_load();
        self.finish_load(ticket, edges).unwrap_or_default()
    }

    // Regions

    /// Store the rectangle spanned by `a` and `b` in the lowest free slot.
    ///
    /// Declined draws (all slots taken, degenerate rectangle) leave the engine untouched.
    pub fn add_region(&mut self, a: R2<f64>, b: R2<f64>) -> Result<usize, RegionError> {
        let result = Rect::new(a, b).and_then(|rect| {
            self.registry.allocate(rect).ok_or(RegionError::Full { capacity: self.registry.capacity() })
        });
        match &result {
            Ok(_) => self.dirty = true,
            Err(e) => warn!("declined region {} → {}: {}", a, b, e),
        }
        result
    }

    pub fn remove_region(&mut self, slot: usize) -> bool {
        let removed = self.registry.free(slot);
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn clear_regions(&mut self) -> usize {
        let removed = self.registry.clear();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn regions(&self) -> Vec<Region> {
        self.registry.active().copied().collect()
    }

    pub fn drain_events(&mut self) -> Vec<SlotEvent> {
        self.registry.drain_events()
    }

    // Filters

    pub fn set_filters(&mut self, filters: Filters) {
        let filters = Filters { weekdays: filters.weekdays.normalized(), ..filters };
        if filters != self.filters {
            debug!("filters: mode {} → {}, weekdays {} → {}", self.filters.mode, filters.mode, self.filters.weekdays, filters.weekdays);
            self.filters = filters;
            self.dirty = true;
        }
    }

    pub fn set_mode(&mut self, mode: ClassificationMode) {
        self.set_filters(Filters { mode, ..self.filters });
    }

    pub fn set_weekdays(&mut self, weekdays: WeekdayMask) {
        self.set_filters(Filters { weekdays, ..self.filters });
    }

    // Pass

    /// The pass for the current state, recomputed only if something changed since the last one.
    pub fn recompute(&mut self) -> &Pass {
        if self.dirty {
            self.run_pass();
            self.dirty = false;
        }
        &self.pass
    }

    /// The most recent pass, without recomputing; stale if [`Engine::is_dirty`].
    pub fn last_pass(&self) -> &Pass {
        &self.pass
    }

    fn run_pass(&mut self) {
        let regions = self.regions();
        let classifier = Classifier::new(&regions, &self.filters);
        let classified: Vec<(&Edge, Attribution)> = self
            .edges
            .iter()
            .filter_map(|e| classifier.classify(e).map(|a| (e, a)))
            .collect();

        let pass = &mut self.pass;
        pass.matrix.reset();
        for (_, attribution) in &classified {
            pass.matrix.record(attribution);
        }
        pass.total_visible = classified.len();
        pass.total_edges = self.edges.len();
        pass.stride = self.subsampler.stride(classified.len());
        let stride = pass.stride;
        pass.visible = classified
            .into_iter()
            .filter(|(e, _)| Subsampler::keeps(e.id, stride))
            .map(|(e, a)| VisibleEdge::new(e, a))
            .collect();
        debug!(
            "pass: {} regions, mode {}, weekdays {}: {} / {} edges visible, stride {}, {} rendered",
            regions.len(), self.filters.mode, self.filters.weekdays,
            pass.total_visible, pass.total_edges, pass.stride, pass.visible.len(),
        );
    }
}
