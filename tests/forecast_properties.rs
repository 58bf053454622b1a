mod common;

use common::{assert_well_formed, engine_on};
use expense_forecast::{records_from_json, HistoricalRecord, Methodology};
use proptest::prelude::*;
use serde_json::json;
use std::ops::{Range, RangeInclusive};

/// How a generated record gets damaged before it reaches the engine.
#[derive(Debug, Clone, Copy)]
enum Corruption {
    None,
    BadDate,
    BadAmount,
}

fn corruption() -> impl Strategy<Value = Corruption> {
    prop_oneof![
        4 => Just(Corruption::None),
        1 => Just(Corruption::BadDate),
        1 => Just(Corruption::BadAmount),
    ]
}

fn category() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), Just(Some("Office")), Just(Some("Travel"))]
}

fn record(
    years: Range<i32>,
    months: RangeInclusive<u32>,
) -> impl Strategy<Value = HistoricalRecord> {
    (years, months, 1u32..=28, -50_000i64..450_000, category(), corruption()).prop_map(
        |(year, month, day, cents, category, corruption)| {
            let mut record =
                HistoricalRecord::new(&format!("{year}-{month:02}-{day:02}"), cents as f64 / 100.0);
            if let Some(name) = category {
                record = record.with_category(name);
            }
            match corruption {
                Corruption::BadDate => record.date = Some("garbage".into()),
                Corruption::BadAmount => record.amount = Some("n/a".into()),
                Corruption::None => {}
            }
            record
        },
    )
}

proptest! {
    #[test]
    fn every_generated_history_yields_a_well_formed_forecast(
        history in prop::collection::vec(record(2020..2025, 1..=12), 0..60),
        months in 1usize..=6,
    ) {
        let result = engine_on(2025, 7, 19).forecast(Some(&history), months);
        assert_well_formed(&result, months);
        if history.len() < 6 {
            prop_assert_eq!(result.methodology, Methodology::BasicLinear);
        }
    }

    #[test]
    fn histories_under_a_year_never_report_seasonality(
        history in prop::collection::vec(record(2024..2025, 1..=11), 0..60),
        months in 1usize..=6,
    ) {
        let result = engine_on(2025, 1, 1).forecast(Some(&history), months);
        prop_assert!(!result.seasonality_detected);
    }
}

#[test]
fn malformed_json_elements_never_break_forecasting() {
    let records = records_from_json(json!([
        { "date": "2024-01-04", "amount": 120 },
        { "paymentDate": "2024-02-04", "amountPaid": "130.10" },
        { "invoiceDate": "2024-03-04", "amountInclGST": "not money" },
        { "date": { "nested": true }, "salary": 4000 },
        17,
        [1, 2, 3],
        null,
        { "date": "2024-04-04", "amount": 1e308 }
    ]))
    .expect("array document");
    let result = engine_on(2024, 5, 1).forecast(Some(&records), 4);
    assert_well_formed(&result, 4);
}

#[test]
fn null_document_is_treated_as_no_history() {
    let records = records_from_json(serde_json::Value::Null);
    let result = engine_on(2024, 5, 1).forecast(records.as_deref(), 3);
    assert_well_formed(&result, 3);
    assert!(result.forecast.iter().all(|p| p.amount == 1000.0));
}

#[test]
fn long_horizons_stay_well_formed() {
    let history: Vec<HistoricalRecord> = (1..=9)
        .map(|m| HistoricalRecord::new(&format!("2024-{m:02}-01"), 900.0 - 100.0 * m as f64))
        .collect();
    let result = engine_on(2024, 10, 1).forecast(Some(&history), 36);
    assert_well_formed(&result, 36);
    assert_eq!(result.forecast.last().map(|p| p.amount), Some(0.0));
}
