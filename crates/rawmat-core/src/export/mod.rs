//! Report export payloads.

mod csv;

pub use csv::*;
