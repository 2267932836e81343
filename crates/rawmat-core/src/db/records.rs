//! Record store operations.

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::{RecordStore, StoreResult};
use crate::models::DrugRecord;

const UPSERT_SQL: &str = r#"
    INSERT INTO drug_records (
        id, product_code, product_name, company_name, manufacturer_name,
        rx_otc, ingredient_name, amount, unit, standard, pack_info,
        appearance_info, price_insurance, production_2023_won,
        permit_date, storage_method, usage_period, atc_code, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
              ?15, ?16, ?17, ?18, datetime('now'))
    ON CONFLICT(id) DO UPDATE SET
        product_code = excluded.product_code,
        product_name = excluded.product_name,
        company_name = excluded.company_name,
        manufacturer_name = excluded.manufacturer_name,
        rx_otc = excluded.rx_otc,
        ingredient_name = excluded.ingredient_name,
        amount = excluded.amount,
        unit = excluded.unit,
        standard = excluded.standard,
        pack_info = excluded.pack_info,
        appearance_info = excluded.appearance_info,
        price_insurance = excluded.price_insurance,
        production_2023_won = excluded.production_2023_won,
        permit_date = excluded.permit_date,
        storage_method = excluded.storage_method,
        usage_period = excluded.usage_period,
        atc_code = excluded.atc_code,
        updated_at = datetime('now')
"#;

const SELECT_COLUMNS: &str = "\
    SELECT id, product_code, product_name, company_name, manufacturer_name, \
           rx_otc, ingredient_name, amount, unit, standard, pack_info, \
           appearance_info, price_insurance, production_2023_won, \
           permit_date, storage_method, usage_period, atc_code \
    FROM drug_records";

impl RecordStore {
    /// Insert a record, replacing any existing row with the same id.
    pub fn upsert_record(&self, record: &DrugRecord) -> StoreResult<()> {
        upsert_with(&self.conn, record)
    }

    /// Bulk-load records inside a single transaction.
    pub fn insert_records(&mut self, records: &[DrugRecord]) -> StoreResult<usize> {
        let tx = self.conn.transaction()?;
        for record in records {
            upsert_with(&tx, record)?;
        }
        tx.commit()?;
        info!(count = records.len(), "loaded records");
        Ok(records.len())
    }

    /// Parse a JSON dump (an array of records in any supported source
    /// shape) and load it, returning the record count.
    pub fn import_json(&mut self, json: &str) -> StoreResult<usize> {
        let records: Vec<DrugRecord> = serde_json::from_str(json)?;
        self.insert_records(&records)
    }

    /// Query records with optional substring filters, ordered by
    /// production value descending with unreported values last.
    ///
    /// Filter terms match case-insensitively (ASCII) as literal
    /// substrings; LIKE wildcards in the term are escaped.
    pub fn search(
        &self,
        ingredient: Option<&str>,
        manufacturer: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<DrugRecord>> {
        let ingredient_pattern = ingredient.map(like_pattern);
        let manufacturer_pattern = manufacturer.map(like_pattern);
        let limit = limit as i64;

        let mut sql = String::from(SELECT_COLUMNS);
        let mut conditions: Vec<&str> = Vec::new();
        let mut bindings: Vec<&dyn rusqlite::ToSql> = Vec::new();

        if let Some(pattern) = &ingredient_pattern {
            conditions.push("ingredient_name LIKE ? ESCAPE '\\'");
            bindings.push(pattern);
        }
        if let Some(pattern) = &manufacturer_pattern {
            conditions.push("manufacturer_name LIKE ? ESCAPE '\\'");
            bindings.push(pattern);
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY production_2023_won DESC NULLS LAST LIMIT ?");
        bindings.push(&limit);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(bindings.as_slice(), |row| {
            Ok(DrugRecord {
                id: row.get(0)?,
                product_code: row.get(1)?,
                product_name: row.get(2)?,
                company_name: row.get(3)?,
                manufacturer_name: row.get(4)?,
                rx_otc: row.get(5)?,
                ingredient_name: row.get(6)?,
                amount: row.get(7)?,
                unit: row.get(8)?,
                standard: row.get(9)?,
                pack_info: row.get(10)?,
                appearance_info: row.get(11)?,
                price_insurance: row.get(12)?,
                production_2023_won: row.get(13)?,
                permit_date: row.get(14)?,
                storage_method: row.get(15)?,
                usage_period: row.get(16)?,
                atc_code: row.get(17)?,
                // Overrides are session state, never stored.
                manual_production: None,
                manual_usage: None,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        debug!(rows = records.len(), "record search");
        Ok(records)
    }

    /// Number of stored records.
    pub fn count(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM drug_records", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Distinct ingredient names for the autocomplete feed.
    pub fn ingredient_names(&self) -> StoreResult<Vec<String>> {
        self.text_column("SELECT DISTINCT ingredient_name FROM drug_records ORDER BY ingredient_name")
    }

    /// Distinct manufacturer names, skipping the empty ones some
    /// records carry.
    pub fn manufacturer_names(&self) -> StoreResult<Vec<String>> {
        self.text_column(
            "SELECT DISTINCT manufacturer_name FROM drug_records \
             WHERE manufacturer_name <> '' ORDER BY manufacturer_name",
        )
    }

    fn text_column(&self, sql: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }
}

fn upsert_with(conn: &Connection, record: &DrugRecord) -> StoreResult<()> {
    conn.execute(
        UPSERT_SQL,
        params![
            record.id,
            record.product_code,
            record.product_name,
            record.company_name,
            record.manufacturer_name,
            record.rx_otc,
            record.ingredient_name,
            record.amount,
            record.unit,
            record.standard,
            record.pack_info,
            record.appearance_info,
            record.price_insurance,
            record.production_2023_won,
            record.permit_date,
            record.storage_method,
            record.usage_period,
            record.atc_code,
        ],
    )?;
    Ok(())
}

/// Escape LIKE wildcards and wrap the term for substring matching.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
