//! WASM bindings for the dosa flight-flow engine.
//!
//! The browser front end owns the map, the region-drawing gestures and the graph view; this crate
//! exposes a stateful [`FlowEngine`] it drives on every region, filter or dataset change.

use std::fmt::Display;

use dosa_core::{
    classify, Corners, CondensedGraph, Edge, Engine, EngineConfig, Filters, ClassificationMode,
    LoadTicket, Rect, Region, WeekdayMask, WidthRange, R2,
};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use tsify::declare;
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

#[declare]
pub type Edges = Vec<Edge>;

#[declare]
pub type RegionCorners = Vec<Corners>;

fn js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_err)
}

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => web_sys::console::warn_1(&format!("failed to set console.logger: {}", e).into()),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsValue> {
    let level: Option<String> = from_js(level, "log level")?;
    let level = dosa_core::parse_log_level(level.as_deref()).map_err(js_err)?;
    log::set_max_level(level);
    Ok(())
}

/// Classifies a single edge without building an engine.
///
/// # Arguments
/// * `edge` - The [`Edge`] to classify.
/// * `regions` - Region corner pairs; the i-th entry occupies slot i.
/// * `filters` - Mode flags and weekday mask.
///
/// # Returns
/// The [`dosa_core::Attribution`] the edge is counted under, or `undefined` if it is not visible.
#[wasm_bindgen]
pub fn classify_edge(edge: JsValue, regions: JsValue, filters: JsValue) -> Result<JsValue, JsValue> {
    let edge: Edge = from_js(edge, "edge")?;
    let corners: Vec<Corners> = from_js(regions, "regions")?;
    let filters: Filters = from_js(filters, "filters")?;
    let regions = corners
        .into_iter()
        .enumerate()
        .map(|(slot, c)| Rect::try_from(c).map(|rect| Region { slot, rect }))
        .collect::<Result<Vec<_>, _>>()
        .map_err(js_err)?;
    to_js(&classify::classify(&edge, &regions, &filters))
}

/// Stateful engine: edges, region slots and filters, with a cached classification pass.
#[wasm_bindgen]
pub struct FlowEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl FlowEngine {
    /// Creates an engine.
    ///
    /// # Arguments
    /// * `config` - Optional [`EngineConfig`] (`capacity`, `targetCount`); defaults apply to
    ///   missing fields. Throws if `capacity` exceeds [`EngineConfig::MAX_CAPACITY`].
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FlowEngine, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            from_js(config, "config")?
        };
        debug!("FlowEngine: capacity {}, target count {}", config.capacity, config.target_count);
        let engine = Engine::new(config).map_err(js_err)?;
        Ok(FlowEngine { engine })
    }

    /// Replaces the edge collection in one step.
    ///
    /// # Returns
    /// Number of edges kept after dropping duplicate ids.
    pub fn load_edges(&mut self, edges: JsValue) -> Result<usize, JsValue> {
        let edges: Vec<Edge> = from_js(edges, "edges")?;
        Ok(self.engine.load(edges))
    }

    /// Starts an asynchronous dataset load; pass the returned ticket to [`FlowEngine::finish_load`]
    /// once the data has arrived. Starting another load makes earlier tickets stale.
    pub fn begin_load(&mut self) -> u64 {
        self.engine.begin_load().0
    }

    /// Installs the edges fetched for `ticket`.
    ///
    /// # Returns
    /// Number of edges kept, or throws if the ticket was superseded (the previous dataset stays).
    pub fn finish_load(&mut self, ticket: u64, edges: JsValue) -> Result<usize, JsValue> {
        let edges: Vec<Edge> = from_js(edges, "edges")?;
        self.engine.finish_load(LoadTicket(ticket), edges).map_err(js_err)
    }

    pub fn is_loading(&self) -> bool {
        self.engine.is_loading()
    }

    /// Stores a drawn rectangle in the lowest free slot.
    ///
    /// # Arguments
    /// * `a` - Draw-start corner `{x, y}`.
    /// * `b` - Draw-end corner `{x, y}`; reversed drags are normalized.
    ///
    /// # Returns
    /// The slot index, or `undefined` if the draw was declined (all slots taken, zero-area or
    /// malformed rectangle).
    pub fn add_region(&mut self, a: JsValue, b: JsValue) -> Option<usize> {
        let corners = from_js::<R2<f64>>(a, "corner a").and_then(|a| from_js::<R2<f64>>(b, "corner b").map(|b| (a, b)));
        match corners {
            Ok((a, b)) => self.engine.add_region(a, b).ok(),
            Err(e) => {
                error!("{:?}", e);
                None
            }
        }
    }

    /// Frees `slot`; returns whether a region was removed.
    pub fn remove_region(&mut self, slot: usize) -> bool {
        self.engine.remove_region(slot)
    }

    pub fn clear_regions(&mut self) -> usize {
        self.engine.clear_regions()
    }

    /// Active regions in slot order.
    pub fn regions(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.regions())
    }

    pub fn set_mode(&mut self, within: bool, between: bool, background: bool) {
        self.engine.set_mode(ClassificationMode::new(within, between, background));
    }

    /// Sets the 7-bit weekday mask (bit 0 = Monday … bit 6 = Sunday).
    pub fn set_weekdays(&mut self, mask: u8) {
        if mask > WeekdayMask::ALL.0 {
            warn!("ignoring weekday mask bits above Sunday: {:#b}", mask);
        }
        self.engine.set_weekdays(WeekdayMask(mask));
    }

    pub fn set_filters(&mut self, filters: JsValue) -> Result<(), JsValue> {
        let filters: Filters = from_js(filters, "filters")?;
        self.engine.set_filters(filters);
        Ok(())
    }

    /// Runs the classification pass if anything changed since the last one.
    ///
    /// # Returns
    /// The [`dosa_core::Pass`]: subsampled visible edges with their attributions, the count
    /// matrix, and totals.
    pub fn recompute(&mut self) -> Result<JsValue, JsValue> {
        to_js(self.engine.recompute())
    }

    /// Builds the condensed region graph for the current pass.
    ///
    /// # Arguments
    /// * `min_width` / `max_width` - Range link widths are scaled into.
    pub fn condensed_graph(&mut self, min_width: f64, max_width: f64) -> Result<JsValue, JsValue> {
        let range = WidthRange { min: min_width, max: max_width };
        self.engine.recompute();
        to_js(&CondensedGraph::new(self.engine.last_pass(), self.engine.registry(), range))
    }

    /// Slot allocations and frees since the last call, oldest first.
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.drain_events())
    }
}
