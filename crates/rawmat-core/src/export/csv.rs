//! CSV payload generation for the usage report.

use chrono::NaiveDate;

use crate::format::format_number;
use crate::models::DrugRecord;
use crate::usage::estimate_usage;

/// Column labels, Korean to match the spreadsheet audience.
pub const CSV_HEADERS: [&str; 14] = [
    "품목코드",
    "제품명",
    "판매사",
    "생산처",
    "전문/일반",
    "성분명",
    "분량",
    "단위",
    "규격",
    "성상정보",
    "보험약가",
    "생산실적(백만원)",
    "원료사용량(kg)",
    "주의사항",
];

/// Warning cell contents for records whose form makes the mass
/// estimate unreliable.
pub const CONVERSION_WARNING: &str = "원료산정 주의";

const FILENAME_PREFIX: &str = "원료사용량";

/// Build the CSV payload for a set of records.
///
/// A UTF-8 BOM leads the payload so spreadsheet tools detect the
/// encoding; every field is double-quoted with embedded quotes
/// doubled, and rows are joined with bare newlines. Manual overrides
/// must already be applied to the records, export recomputes nothing
/// about them.
pub fn csv_payload(records: &[DrugRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        CSV_HEADERS
            .iter()
            .map(|header| quote(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        lines.push(csv_row(record));
    }
    format!("\u{feff}{}", lines.join("\n"))
}

/// Conventional filename for a payload exported on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("{}_{}.csv", FILENAME_PREFIX, date.format("%Y-%m-%d"))
}

fn csv_row(record: &DrugRecord) -> String {
    let usage = format!("{:.3}", estimate_usage(record).kilograms());
    let production_millions = match record.production_2023_won {
        Some(won) => format_number(won / 1_000_000.0, 1),
        None => "0".to_string(),
    };
    let price = match record.price_insurance {
        Some(price) => price.to_string(),
        None => "0".to_string(),
    };
    let warning = if record.needs_conversion_warning() {
        CONVERSION_WARNING
    } else {
        ""
    };

    let fields = [
        record.product_code.as_str(),
        record.product_name.as_str(),
        record.company_name.as_str(),
        record.manufacturer_name.as_str(),
        record.rx_otc.as_deref().unwrap_or(""),
        record.ingredient_name.as_str(),
        record.amount.as_str(),
        record.unit.as_str(),
        record.standard.as_deref().unwrap_or(""),
        record.appearance_info.as_deref().unwrap_or(""),
        price.as_str(),
        production_millions.as_str(),
        usage.as_str(),
        warning,
    ];

    fields
        .iter()
        .map(|field| quote(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field unconditionally, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
