//! Ranking aggregations feeding the chart and summary views.

mod manufacturer;
mod palette;
mod product;

pub use manufacturer::*;
pub use palette::*;
pub use product::*;
