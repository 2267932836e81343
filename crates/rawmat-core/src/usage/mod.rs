//! Unit normalization and per-record usage estimation.

mod estimate;
mod units;

pub use estimate::*;
pub use units::*;
