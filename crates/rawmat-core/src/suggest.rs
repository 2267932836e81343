//! Autocomplete suggestion ranking.

use strsim::{jaro_winkler, normalized_levenshtein};

/// Maximum suggestions surfaced by an input widget.
pub const MAX_SUGGESTIONS: usize = 10;

/// Rank candidate names against a partial query.
///
/// Candidates are filtered to case-insensitive substring matches,
/// then ordered by fuzzy similarity so near-exact names surface
/// first. Equal scores keep candidate order. An empty or whitespace
/// query yields nothing.
pub fn rank_suggestions(candidates: &[String], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(|name| (fuzzy_score(&needle, &name.to_lowercase()), name))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().take(limit).map(|(_, name)| name.clone()).collect()
}

/// Combined similarity score. Jaro-Winkler weighs shared prefixes,
/// which suits incremental typing; Levenshtein keeps overall shape.
fn fuzzy_score(query: &str, candidate: &str) -> f64 {
    jaro_winkler(query, candidate) * 0.6 + normalized_levenshtein(query, candidate) * 0.4
}
