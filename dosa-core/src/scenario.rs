//! Serializable engine setup: sizing, filters and the regions to draw, in slot order.

use log::warn;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    classify::Filters,
    config::EngineConfig,
    engine::Engine,
    error::{ConfigError, RegionError},
    rect::Corners,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default)]
pub struct Scenario {
    pub config: EngineConfig,
    pub filters: Filters,
    pub regions: Vec<Corners>,
}

impl Scenario {
    pub fn from_json(s: &str) -> Result<Scenario, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Fresh engine with this scenario's filters and regions. Regions that can't be placed are
    /// skipped (and returned), the same way an interactive draw would be declined; an invalid
    /// `config` fails the whole scenario.
    pub fn engine(&self) -> Result<(Engine, Vec<RegionError>), ConfigError> {
        let mut engine = Engine::new(self.config)?;
        engine.set_filters(self.filters);
        let declined = self
            .regions
            .iter()
            .filter_map(|c| engine.add_region(c.a, c.b).err())
            .collect::<Vec<_>>();
        if !declined.is_empty() {
            warn!("{} of {} scenario regions declined", declined.len(), self.regions.len());
        }
        Ok((engine, declined))
    }
}
