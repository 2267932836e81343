//! Dose-unit normalization to kilograms.
//!
//! Registration records carry free-text unit labels in Korean, Latin
//! script, or CJK compatibility symbols. Mass units convert exactly.
//! Liter and milliliter convert at water density, which is close
//! enough for the aqueous preparations that carry them. Anything else
//! (%, IU, percent-by-weight) has no defined mass and stays
//! unconvertible.

/// Parse a free-text amount field into a finite float.
///
/// The field is trimmed before parsing; non-finite results are
/// rejected so a literal "NaN" or "inf" in a dump cannot leak into
/// downstream sums.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Convert an amount in the given unit to kilograms.
///
/// Classification is case-insensitive and first match wins. The bare
/// gram branch runs first and rejects any label carrying an `m` or a
/// micro sign, otherwise "mg" and "μg" would land on it. Milligram
/// and microgram match as substrings to absorb compound labels like
/// "mg/mL"; the remaining units only match exactly.
pub fn to_kilograms(amount: f64, unit: &str) -> Option<f64> {
    let unit = unit.trim().to_lowercase();
    if unit.is_empty() {
        return None;
    }

    if (unit == "g" || unit == "그램" || unit == "gram")
        && !unit.contains('m')
        && !unit.contains('μ')
    {
        return Some(amount / 1_000.0);
    }

    if unit.contains("mg")
        || unit.contains("밀리그램")
        || unit.contains("밀리그람")
        || unit == "㎎"
        || unit == "milligram"
    {
        return Some(amount / 1_000_000.0);
    }

    if unit.contains("μg")
        || unit.contains("mcg")
        || unit.contains("마이크로그램")
        || unit.contains("마이크로그람")
        || unit == "㎍"
        || unit == "microgram"
    {
        return Some(amount / 1_000_000_000.0);
    }

    if unit == "kg" || unit == "킬로그램" || unit == "kilogram" {
        return Some(amount);
    }

    // Volume units assume water density.
    if unit == "l" || unit == "리터" || unit == "liter" {
        return Some(amount);
    }

    if unit == "ml" || unit == "밀리리터" || unit == "㎖" || unit == "milliliter" {
        return Some(amount / 1_000.0);
    }

    None
}

/// Parse an amount string and convert it to kilograms in one step.
pub fn normalize_to_kg(raw_amount: &str, unit: &str) -> Option<f64> {
    let amount = parse_amount(raw_amount)?;
    to_kilograms(amount, unit)
}
