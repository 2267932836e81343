//! Per-record raw-material usage estimation.

use serde::{Deserialize, Serialize};

use super::units;
use crate::models::DrugRecord;

/// Why a usage figure could not be derived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UsageGap {
    /// Insurance price missing or zero
    MissingPrice,
    /// Production value missing or zero
    MissingProduction,
    /// Amount or unit did not convert to kilograms
    UnconvertibleUnit,
}

/// Outcome of estimating one record's raw-material usage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum UsageEstimate {
    /// User-entered figure, bypasses the computation entirely
    Manual(f64),
    /// Derived from production value, price, and per-unit dose mass
    Computed(f64),
    /// Preconditions missing; consumers treat this as zero
    NotComputable(UsageGap),
}

impl UsageEstimate {
    /// Estimated mass in kilograms. Not-computable estimates read as
    /// zero so they vanish from sums and rankings without poisoning
    /// them.
    pub fn kilograms(&self) -> f64 {
        match self {
            UsageEstimate::Manual(kg) | UsageEstimate::Computed(kg) => *kg,
            UsageEstimate::NotComputable(_) => 0.0,
        }
    }

    /// True unless the estimate degraded to the zero sentinel.
    pub fn is_computable(&self) -> bool {
        !matches!(self, UsageEstimate::NotComputable(_))
    }
}

/// Estimate raw-material usage for a single record.
///
/// Precedence order:
///
/// 1. A positive manual usage override wins outright, even when the
///    record could not otherwise be computed.
/// 2. Missing or zero price, then missing or zero production value,
///    short-circuit to a gap. This happens before any production
///    override is consulted, so an override cannot resurrect a record
///    without pricing data.
/// 3. Quantity produced is the manual production override when set
///    and non-zero, otherwise production value divided by unit price.
/// 4. Quantity times the per-unit dose mass gives kilograms; an
///    unconvertible dose unit is the final gap.
pub fn estimate_usage(record: &DrugRecord) -> UsageEstimate {
    if let Some(manual) = record.manual_usage {
        if manual > 0.0 {
            return UsageEstimate::Manual(manual);
        }
    }

    let price = match record.price_insurance {
        Some(price) if price != 0.0 => price,
        _ => return UsageEstimate::NotComputable(UsageGap::MissingPrice),
    };
    let production = match record.production_2023_won {
        Some(won) if won != 0.0 => won,
        _ => return UsageEstimate::NotComputable(UsageGap::MissingProduction),
    };

    let quantity = match record.manual_production {
        Some(quantity) if quantity != 0.0 => quantity,
        _ => production / price,
    };

    match units::normalize_to_kg(&record.amount, &record.unit) {
        Some(kg_per_unit) => UsageEstimate::Computed(quantity * kg_per_unit),
        None => UsageEstimate::NotComputable(UsageGap::UnconvertibleUnit),
    }
}
