use crate::r2::R2;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("All {capacity} region slots are occupied")]
    Full { capacity: usize },

    #[error("Degenerate rectangle {a} → {b}: zero width or height")]
    Degenerate { a: R2<f64>, b: R2<f64> },

    #[error("Rectangle corner is not finite: {0}")]
    NonFinite(R2<f64>),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Region capacity {capacity} exceeds the maximum of {max}")]
    Capacity { capacity: usize, max: usize },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("Load {ticket} was superseded by load {latest}; discarding its edges")]
    Stale { ticket: u64, latest: u64 },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("Invalid log level: {0:?}")]
pub struct LogLevelError(pub String);
