//! Manufacturer ranking aggregation.

use std::collections::HashMap;

use crate::models::{DosageForm, DrugRecord, ManufacturerSeries, SeriesEntry};
use crate::usage::estimate_usage;

struct Bucket {
    /// Index of the manufacturer's first record, used as a sort
    /// tie-break so equal values keep input order.
    first_seen: usize,
    tablet_kg: f64,
    other_won: f64,
}

/// Rank manufacturers over a record snapshot.
///
/// Tablet and capsule records accumulate estimated usage kilograms;
/// other-form records accumulate production won, because their mass
/// estimate is unreliable. Each list is filtered to positive totals,
/// sorted descending, and truncated to `limit` independently, so one
/// manufacturer can appear in both.
///
/// Records with an empty manufacturer name are skipped. Records whose
/// usage is not computable contribute zero, keeping the manufacturer
/// visible when its other records carry real figures.
pub fn aggregate_by_manufacturer(records: &[DrugRecord], limit: usize) -> ManufacturerSeries {
    let mut buckets: HashMap<&str, Bucket> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        if record.manufacturer_name.is_empty() {
            continue;
        }
        let bucket = buckets
            .entry(record.manufacturer_name.as_str())
            .or_insert(Bucket { first_seen: index, tablet_kg: 0.0, other_won: 0.0 });
        match record.dosage_form() {
            DosageForm::TabletCapsule => {
                bucket.tablet_kg += estimate_usage(record).kilograms();
            }
            DosageForm::Other => {
                bucket.other_won += record.production_won();
            }
        }
    }

    ManufacturerSeries {
        tablet: ranked(&buckets, limit, |bucket| bucket.tablet_kg),
        other: ranked(&buckets, limit, |bucket| bucket.other_won),
    }
}

fn ranked(
    buckets: &HashMap<&str, Bucket>,
    limit: usize,
    value_of: impl Fn(&Bucket) -> f64,
) -> Vec<SeriesEntry> {
    let mut entries: Vec<(usize, SeriesEntry)> = buckets
        .iter()
        .filter_map(|(name, bucket)| {
            let value = value_of(bucket);
            if value > 0.0 {
                Some((bucket.first_seen, SeriesEntry { name: (*name).to_string(), value }))
            } else {
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.1.value
            .partial_cmp(&a.1.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    entries.into_iter().take(limit).map(|(_, entry)| entry).collect()
}
