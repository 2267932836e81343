//! Chart color assignment.

/// Fixed palette for ranked series, assigned cyclically by index.
pub const CHART_PALETTE: [&str; 20] = [
    "#3B82F6", "#8B5CF6", "#06B6D4", "#10B981", "#F59E0B",
    "#EF4444", "#EC4899", "#84CC16", "#F97316", "#6366F1",
    "#14B8A6", "#D946EF", "#22C55E", "#EAB308", "#0EA5E9",
    "#F43F5E", "#A855F7", "#65A30D", "#FB923C", "#4F46E5",
];

/// Colors for `count` series entries, repeating the palette when the
/// series is longer than it.
pub fn series_colors(count: usize) -> Vec<&'static str> {
    (0..count).map(|index| CHART_PALETTE[index % CHART_PALETTE.len()]).collect()
}
