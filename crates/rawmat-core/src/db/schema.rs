//! SQLite schema definition.

/// Complete database schema for the record store.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Drug Registration Records
-- ============================================================================

CREATE TABLE IF NOT EXISTS drug_records (
    id INTEGER PRIMARY KEY,
    product_code TEXT NOT NULL,
    product_name TEXT NOT NULL,
    company_name TEXT NOT NULL,
    manufacturer_name TEXT NOT NULL,
    rx_otc TEXT,
    ingredient_name TEXT NOT NULL,
    amount TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT '',
    standard TEXT,
    pack_info TEXT,
    appearance_info TEXT,
    price_insurance REAL,
    production_2023_won REAL,
    permit_date TEXT,
    storage_method TEXT,
    usage_period TEXT,
    atc_code TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Search filters target these two columns; results order by production.
CREATE INDEX IF NOT EXISTS idx_records_ingredient ON drug_records(ingredient_name);
CREATE INDEX IF NOT EXISTS idx_records_manufacturer ON drug_records(manufacturer_name);
CREATE INDEX IF NOT EXISTS idx_records_production ON drug_records(production_2023_won DESC);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_sql() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
    }

    #[test]
    fn test_expected_tables_exist() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'drug_records'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
