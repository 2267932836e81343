//! Ranked series models produced by the aggregations.

use serde::{Deserialize, Serialize};

/// One named entry in a ranked series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesEntry {
    /// Manufacturer name
    pub name: String,
    /// Accumulated value in the series' declared unit
    pub value: f64,
}

/// Manufacturer ranking split by dosage form.
///
/// Tablet and capsule records accumulate estimated usage kilograms;
/// other-form records accumulate raw production won because their
/// mass estimate is unreliable. A manufacturer with both kinds of
/// records appears in both lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ManufacturerSeries {
    /// Ranked by estimated usage in kilograms
    pub tablet: Vec<SeriesEntry>,
    /// Ranked by production value in won
    pub other: Vec<SeriesEntry>,
}

impl ManufacturerSeries {
    /// Total estimated usage across the tablet series, in kilograms.
    pub fn tablet_total(&self) -> f64 {
        self.tablet.iter().map(|entry| entry.value).sum()
    }

    /// Total production across the other-form series, in won.
    pub fn other_total(&self) -> f64 {
        self.other.iter().map(|entry| entry.value).sum()
    }
}

/// One product in the production ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductEntry {
    /// Product name, deduplicated across record variants
    pub product_name: String,
    /// Production value in millions of won, the charted unit
    pub production_millions: f64,
    /// Raw production value in won
    pub production_won: f64,
    /// Ingredient carried along for tooltips
    pub ingredient_name: String,
}
