//! Drug registration record model.

use serde::{Deserialize, Deserializer, Serialize};

/// Appearance-text marker flagging a non-tablet dosage form.
pub const OTHER_FORM_MARKER: &str = "그외";

/// Dosage-form bucket driving the aggregation split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DosageForm {
    /// Tablets and capsules, safe for mass conversion
    TabletCapsule,
    /// Everything else, aggregated by production value instead
    Other,
}

/// One registration record in canonical shape.
///
/// Source dumps disagree on field names and scalar types across
/// revisions. Aliases and lenient scalar parsing absorb those
/// differences at the deserialization boundary so the rest of the
/// crate sees a single schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugRecord {
    /// Unique record identifier
    pub id: i64,
    /// Registration product code
    #[serde(deserialize_with = "text_or_number")]
    pub product_code: String,
    /// Product name, grouping key for the product ranking
    pub product_name: String,
    /// Selling company
    pub company_name: String,
    /// Actual manufacturer, grouping key for the manufacturer ranking
    pub manufacturer_name: String,
    /// Prescription class (전문/일반)
    #[serde(default)]
    pub rx_otc: Option<String>,
    /// Active ingredient label
    pub ingredient_name: String,
    /// Dose magnitude as free text, parsed at estimation time
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
    /// Free-text dose unit (Korean, Latin, or CJK symbols)
    #[serde(default, deserialize_with = "nullable_text")]
    pub unit: String,
    /// Specification text (규격)
    #[serde(default)]
    pub standard: Option<String>,
    /// Packaging description
    #[serde(default)]
    pub pack_info: Option<String>,
    /// Appearance text; contains "그외" for non-tablet forms
    #[serde(default)]
    pub appearance_info: Option<String>,
    /// Insurance unit price in won
    #[serde(default)]
    pub price_insurance: Option<f64>,
    /// 2023 production value in won
    #[serde(default, alias = "perf_production")]
    pub production_2023_won: Option<f64>,
    /// Permit date
    #[serde(default)]
    pub permit_date: Option<String>,
    /// Storage instructions
    #[serde(default)]
    pub storage_method: Option<String>,
    /// Shelf-life text
    #[serde(default)]
    pub usage_period: Option<String>,
    /// ATC classification code
    #[serde(default)]
    pub atc_code: Option<String>,
    /// Session-scoped quantity-produced override, never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_production: Option<f64>,
    /// Session-scoped usage override, never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_usage: Option<f64>,
}

impl DrugRecord {
    /// Create a record with the identifying fields set and everything
    /// else empty.
    pub fn new(
        id: i64,
        product_name: String,
        manufacturer_name: String,
        ingredient_name: String,
    ) -> Self {
        Self {
            id,
            product_code: String::new(),
            product_name,
            company_name: String::new(),
            manufacturer_name,
            rx_otc: None,
            ingredient_name,
            amount: String::new(),
            unit: String::new(),
            standard: None,
            pack_info: None,
            appearance_info: None,
            price_insurance: None,
            production_2023_won: None,
            permit_date: None,
            storage_method: None,
            usage_period: None,
            atc_code: None,
            manual_production: None,
            manual_usage: None,
        }
    }

    /// Dosage-form bucket for the aggregation split.
    pub fn dosage_form(&self) -> DosageForm {
        match &self.appearance_info {
            Some(info) if info.contains(OTHER_FORM_MARKER) => DosageForm::Other,
            _ => DosageForm::TabletCapsule,
        }
    }

    /// True when the form makes the mass estimate unreliable and the
    /// export should carry a warning.
    pub fn needs_conversion_warning(&self) -> bool {
        self.dosage_form() == DosageForm::Other
    }

    /// Production value in won, treating missing as zero.
    pub fn production_won(&self) -> f64 {
        self.production_2023_won.unwrap_or(0.0)
    }
}

/// Accept a string or a bare number for fields some dumps emit either
/// way.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Accept null for a plain-string field, mapping it to empty.
fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dosage_form_split() {
        let mut record = DrugRecord::new(
            1,
            "타이레놀정500밀리그램".to_string(),
            "한국존슨앤드존슨판매(유)".to_string(),
            "아세트아미노펜".to_string(),
        );
        assert_eq!(record.dosage_form(), DosageForm::TabletCapsule);
        assert!(!record.needs_conversion_warning());

        record.appearance_info = Some("정제".to_string());
        assert_eq!(record.dosage_form(), DosageForm::TabletCapsule);

        record.appearance_info = Some("그외 시럽제".to_string());
        assert_eq!(record.dosage_form(), DosageForm::Other);
        assert!(record.needs_conversion_warning());
    }

    #[test]
    fn test_deserialize_canonical_fields() {
        let json = r#"{
            "id": 42,
            "product_code": "200808876",
            "product_name": "타이레놀정500밀리그램",
            "company_name": "한국존슨앤드존슨판매(유)",
            "manufacturer_name": "한국얀센",
            "ingredient_name": "아세트아미노펜",
            "amount": "500",
            "unit": "밀리그램",
            "price_insurance": 51.0,
            "production_2023_won": 12000000.0
        }"#;

        let record: DrugRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.amount, "500");
        assert_eq!(record.unit, "밀리그램");
        assert_eq!(record.production_2023_won, Some(12000000.0));
        assert_eq!(record.manual_usage, None);
    }

    #[test]
    fn test_deserialize_legacy_dump_shape() {
        // Older dumps use perf_production, numeric codes, and null units.
        let json = r#"{
            "id": 7,
            "product_code": 200808876,
            "product_name": "어떤주사제",
            "company_name": "회사",
            "manufacturer_name": "제조소",
            "ingredient_name": "성분",
            "amount": 2.5,
            "unit": null,
            "perf_production": 300000.0
        }"#;

        let record: DrugRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.product_code, "200808876");
        assert_eq!(record.amount, "2.5");
        assert_eq!(record.unit, "");
        assert_eq!(record.production_2023_won, Some(300000.0));
        assert_eq!(record.price_insurance, None);
    }

    #[test]
    fn test_overrides_skipped_when_absent() {
        let record = DrugRecord::new(
            3,
            "제품".to_string(),
            "제조소".to_string(),
            "성분".to_string(),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("manual_usage"));
        assert!(!json.contains("manual_production"));
    }
}
