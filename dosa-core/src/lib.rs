//! Region-based classification and aggregation of directed geographic flows.
//!
//! Flights (origin → destination edges) are attributed to user-drawn rectangular regions, counted
//! per region pair, and thinned for rendering. See [`Engine`] for the entry point.

// Organized modules
pub mod analysis;
pub mod geometry;

pub use geometry::r2;
pub use geometry::rect;

pub use analysis::classify;
pub use analysis::contains;
pub use analysis::matrix;
pub use analysis::mode;
pub use analysis::subsample;
pub use analysis::weekday;

pub mod config;
pub mod edge;
pub mod engine;
pub mod error;
pub mod graph;
pub mod registry;
pub mod scenario;

// Re-export key types for external use
pub use classify::{Classifier, Filters};
pub use config::EngineConfig;
pub use edge::Edge;
pub use engine::{Engine, LoadTicket, Pass, VisibleEdge};
pub use error::{ConfigError, DatasetError, LogLevelError, RegionError};
pub use graph::{CondensedGraph, WidthRange};
pub use matrix::{AggregateMatrix, Attribution, Node};
pub use mode::ClassificationMode;
pub use r2::R2;
pub use rect::{Corners, Rect};
pub use registry::{Region, Registry, SlotEvent};
pub use scenario::Scenario;
pub use subsample::Subsampler;
pub use weekday::WeekdayMask;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, LogLevelError> {
    match level {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(LogLevelError(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("")), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("debug")), Ok(log::LevelFilter::Debug));
        assert_eq!(parse_log_level(Some("loud")), Err(LogLevelError("loud".to_string())));
    }
}
