//! Rawmat Core Library
//!
//! Raw-material usage estimation over pharmaceutical registration
//! records. Free-text dose units normalize to kilograms, per-record
//! usage derives from production value and insurance price with
//! manual-override precedence, and aggregations rank manufacturers
//! and products for charts and CSV reports.
//!
//! # Architecture
//!
//! ```text
//! Record store (SQLite) --search--> snapshot of DrugRecord
//!                                        |
//!                     Session (filter, selection, overrides)
//!                                        |
//!                            overrides applied per record
//!                                        |
//!          +-----------------------------+---------------------------+
//!          |                             |                           |
//!          v                             v                           v
//!   Usage estimator              Aggregations                  CSV export
//!   (units to kg, manual         (manufacturer split,          (BOM, quoted
//!   precedence, zero             product ranking,              fields, dated
//!   sentinel)                    chart palette)                filename)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Canonical record schema and ranking series types
//! - [`usage`]: Unit normalization and per-record usage estimation
//! - [`aggregate`]: Manufacturer/product rankings and chart palette
//! - [`format`]: Number, currency, and axis-label display strings
//! - [`export`]: CSV payload and filename conventions
//! - [`session`]: Per-sitting filter, selection, and override state
//! - [`suggest`]: Autocomplete candidate ranking
//! - [`db`]: SQLite record store behind the search contract

pub mod aggregate;
pub mod db;
pub mod export;
pub mod format;
pub mod models;
pub mod session;
pub mod suggest;
pub mod usage;

// Re-export commonly used types
pub use aggregate::{
    aggregate_by_manufacturer, aggregate_by_product, production_total, series_colors,
    CHART_PALETTE,
};
pub use db::{RecordStore, StoreError, StoreResult};
pub use export::{csv_filename, csv_payload, CONVERSION_WARNING, CSV_HEADERS};
pub use format::{format_compact_won, format_currency, format_number};
pub use models::{
    DosageForm, DrugRecord, ManufacturerSeries, ProductEntry, SeriesEntry, OTHER_FORM_MARKER,
};
pub use session::{
    ManualOverride, SearchField, SearchFilter, Session, DEFAULT_SEARCH_LIMIT,
};
pub use suggest::{rank_suggestions, MAX_SUGGESTIONS};
pub use usage::{
    estimate_usage, normalize_to_kg, parse_amount, to_kilograms, UsageEstimate, UsageGap,
};
