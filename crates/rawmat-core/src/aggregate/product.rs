//! Product ranking aggregation.

use std::collections::HashMap;

use crate::models::{DrugRecord, ProductEntry};

struct BestVariant<'a> {
    first_seen: usize,
    record: &'a DrugRecord,
}

/// Rank products by production value over a record snapshot.
///
/// A product name can appear on several records (dose variants,
/// re-registrations). Each name keeps only its highest-production
/// record; ties keep the record seen first. The survivors are filtered
/// to positive production, sorted descending with input order as the
/// tie-break, and truncated to `limit`.
pub fn aggregate_by_product(records: &[DrugRecord], limit: usize) -> Vec<ProductEntry> {
    let mut best: HashMap<&str, BestVariant<'_>> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        best.entry(record.product_name.as_str())
            .and_modify(|current| {
                // Strictly greater, so a tie keeps the first variant.
                if record.production_won() > current.record.production_won() {
                    current.record = record;
                }
            })
            .or_insert(BestVariant { first_seen: index, record });
    }

    let mut ranked: Vec<(usize, &DrugRecord)> = best
        .into_values()
        .filter(|variant| variant.record.production_won() > 0.0)
        .map(|variant| (variant.first_seen, variant.record))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.production_won()
            .partial_cmp(&a.1.production_won())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, record)| {
            let won = record.production_won();
            ProductEntry {
                product_name: record.product_name.clone(),
                production_millions: won / 1_000_000.0,
                production_won: won,
                ingredient_name: record.ingredient_name.clone(),
            }
        })
        .collect()
}

/// Total production across ranked entries, in won.
pub fn production_total(entries: &[ProductEntry]) -> f64 {
    entries.iter().map(|entry| entry.production_won).sum()
}
