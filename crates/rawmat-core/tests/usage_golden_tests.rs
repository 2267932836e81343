//! Golden tests for unit normalization and usage estimation.
//!
//! Each case pins the exact outcome for one input shape the source
//! dumps are known to contain, so refactors of the classifier or the
//! precedence chain cannot silently shift results.

use rawmat_core::models::DrugRecord;
use rawmat_core::usage::{estimate_usage, normalize_to_kg, UsageEstimate, UsageGap};

struct UnitCase {
    id: &'static str,
    amount: &'static str,
    unit: &'static str,
    expected_kg: Option<f64>,
}

fn get_unit_cases() -> Vec<UnitCase> {
    vec![
        UnitCase { id: "mg-latin", amount: "500", unit: "mg", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-upper", amount: "500", unit: "MG", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-padded", amount: "500", unit: " mg ", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-korean", amount: "500", unit: "밀리그램", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-korean-alt", amount: "500", unit: "밀리그람", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-cjk-symbol", amount: "500", unit: "㎎", expected_kg: Some(0.0005) },
        UnitCase { id: "mg-compound", amount: "500", unit: "mg/mL", expected_kg: Some(0.0005) },
        UnitCase { id: "gram-bare", amount: "2", unit: "g", expected_kg: Some(0.002) },
        UnitCase { id: "gram-korean", amount: "2", unit: "그램", expected_kg: Some(0.002) },
        UnitCase { id: "mcg-latin", amount: "50", unit: "mcg", expected_kg: Some(5e-8) },
        UnitCase { id: "mcg-micro-sign", amount: "50", unit: "μg", expected_kg: Some(5e-8) },
        UnitCase { id: "mcg-cjk-symbol", amount: "50", unit: "㎍", expected_kg: Some(5e-8) },
        UnitCase { id: "mcg-korean", amount: "50", unit: "마이크로그램", expected_kg: Some(5e-8) },
        UnitCase { id: "kg-exact", amount: "1.5", unit: "kg", expected_kg: Some(1.5) },
        UnitCase { id: "kg-korean", amount: "1.5", unit: "킬로그램", expected_kg: Some(1.5) },
        UnitCase { id: "liter-water-density", amount: "2", unit: "L", expected_kg: Some(2.0) },
        UnitCase { id: "ml-water-density", amount: "100", unit: "mL", expected_kg: Some(0.1) },
        UnitCase { id: "ml-cjk-symbol", amount: "100", unit: "㎖", expected_kg: Some(0.1) },
        UnitCase { id: "percent-unconvertible", amount: "10", unit: "%", expected_kg: None },
        UnitCase { id: "iu-unconvertible", amount: "1000", unit: "IU", expected_kg: None },
        UnitCase { id: "empty-unit", amount: "500", unit: "", expected_kg: None },
        UnitCase { id: "blank-unit", amount: "500", unit: "   ", expected_kg: None },
        UnitCase { id: "amount-padded", amount: " 500 ", unit: "mg", expected_kg: Some(0.0005) },
        UnitCase { id: "amount-not-numeric", amount: "미기재", unit: "mg", expected_kg: None },
        UnitCase { id: "amount-embedded-unit", amount: "500mg", unit: "mg", expected_kg: None },
    ]
}

#[test]
fn test_unit_golden_cases() {
    for case in get_unit_cases() {
        let actual = normalize_to_kg(case.amount, case.unit);
        assert_eq!(
            actual, case.expected_kg,
            "Case {}: normalize({:?}, {:?}) gave {:?}, expected {:?}",
            case.id, case.amount, case.unit, actual, case.expected_kg
        );
    }
}

#[test]
fn test_million_milligrams_is_one_kilogram() {
    for unit in ["mg", "MG", " mg ", "밀리그램", "㎎"] {
        assert_eq!(
            normalize_to_kg("1000000", unit),
            Some(1.0),
            "unit {:?} should convert a million of itself to 1 kg",
            unit
        );
    }
}

#[test]
fn test_gram_branch_never_captures_milligram() {
    for unit in ["g", "그램"] {
        assert_eq!(normalize_to_kg("1", unit), Some(0.001), "unit {:?}", unit);
    }
    // The exclusion rule must keep "mg" three orders of magnitude away.
    assert_eq!(normalize_to_kg("1", "mg"), Some(0.000001));
}

struct EstimateCase {
    id: &'static str,
    amount: &'static str,
    unit: &'static str,
    price: Option<f64>,
    production: Option<f64>,
    manual_production: Option<f64>,
    manual_usage: Option<f64>,
    expected: UsageEstimate,
}

fn get_estimate_cases() -> Vec<EstimateCase> {
    vec![
        EstimateCase {
            id: "computed-mg",
            amount: "500",
            unit: "mg",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::Computed(5.0),
        },
        EstimateCase {
            id: "computed-gram",
            amount: "2",
            unit: "g",
            price: Some(2000.0),
            production: Some(4000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::Computed(4.0),
        },
        EstimateCase {
            id: "computed-mcg",
            amount: "50",
            unit: "mcg",
            price: Some(300.0),
            production: Some(9000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::Computed(0.0015),
        },
        EstimateCase {
            id: "computed-ml",
            amount: "100",
            unit: "ml",
            price: Some(2500.0),
            production: Some(5000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::Computed(200.0),
        },
        EstimateCase {
            id: "manual-usage-wins",
            amount: "500",
            unit: "mg",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: Some(7.5),
            expected: UsageEstimate::Manual(7.5),
        },
        EstimateCase {
            id: "manual-usage-rescues-gap",
            amount: "10",
            unit: "%",
            price: None,
            production: None,
            manual_production: None,
            manual_usage: Some(3.0),
            expected: UsageEstimate::Manual(3.0),
        },
        EstimateCase {
            id: "manual-usage-zero-ignored",
            amount: "500",
            unit: "mg",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: Some(0.0),
            expected: UsageEstimate::Computed(5.0),
        },
        EstimateCase {
            id: "manual-production-replaces-quantity",
            amount: "500",
            unit: "mg",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: Some(2000.0),
            manual_usage: None,
            expected: UsageEstimate::Computed(1.0),
        },
        EstimateCase {
            id: "missing-price",
            amount: "500",
            unit: "mg",
            price: None,
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::NotComputable(UsageGap::MissingPrice),
        },
        EstimateCase {
            id: "zero-price",
            amount: "500",
            unit: "mg",
            price: Some(0.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::NotComputable(UsageGap::MissingPrice),
        },
        EstimateCase {
            id: "missing-production-despite-override",
            amount: "500",
            unit: "mg",
            price: Some(1200.0),
            production: None,
            manual_production: Some(2000.0),
            manual_usage: None,
            expected: UsageEstimate::NotComputable(UsageGap::MissingProduction),
        },
        EstimateCase {
            id: "percent-unit-gap",
            amount: "10",
            unit: "%",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::NotComputable(UsageGap::UnconvertibleUnit),
        },
        EstimateCase {
            id: "bad-amount-gap",
            amount: "미기재",
            unit: "mg",
            price: Some(1200.0),
            production: Some(12000000.0),
            manual_production: None,
            manual_usage: None,
            expected: UsageEstimate::NotComputable(UsageGap::UnconvertibleUnit),
        },
    ]
}

#[test]
fn test_estimate_golden_cases() {
    for case in get_estimate_cases() {
        let mut record = DrugRecord::new(
            1,
            "제품".to_string(),
            "제조소".to_string(),
            "성분".to_string(),
        );
        record.amount = case.amount.to_string();
        record.unit = case.unit.to_string();
        record.price_insurance = case.price;
        record.production_2023_won = case.production;
        record.manual_production = case.manual_production;
        record.manual_usage = case.manual_usage;

        let actual = estimate_usage(&record);
        assert_eq!(
            actual, case.expected,
            "Case {}: got {:?}, expected {:?}",
            case.id, actual, case.expected
        );
    }
}

/// A 500 mg tablet with 12M won of production at 1,200 won per unit:
/// 10,000 units produced, 0.0005 kg each, 5 kg of raw material.
#[test]
fn test_reference_scenario_end_to_end() {
    let mut record = DrugRecord::new(
        1,
        "타이레놀정500밀리그램".to_string(),
        "한국얀센".to_string(),
        "아세트아미노펜".to_string(),
    );
    record.amount = "500".to_string();
    record.unit = "밀리그램".to_string();
    record.price_insurance = Some(1200.0);
    record.production_2023_won = Some(12000000.0);

    assert_eq!(normalize_to_kg(&record.amount, &record.unit), Some(0.0005));

    let estimate = estimate_usage(&record);
    assert_eq!(estimate, UsageEstimate::Computed(5.0));
    assert_eq!(format!("{:.3}", estimate.kilograms()), "5.000");
    assert_eq!(rawmat_core::format::format_number(estimate.kilograms(), 3), "5");
}
