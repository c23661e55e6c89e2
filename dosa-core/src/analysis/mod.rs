pub mod classify;
pub mod contains;
pub mod matrix;
pub mod mode;
pub mod subsample;
pub mod weekday;
