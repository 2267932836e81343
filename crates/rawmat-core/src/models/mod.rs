//! Data models for registration records and ranking series.

mod record;
mod series;

pub use record::*;
pub use series::*;
