#![allow(dead_code)]

use chrono::NaiveDate;
use expense_forecast::{
    time::FixedClock, ForecastConfig, ForecastEngine, ForecastResult, HistoricalRecord,
};

/// Engine with default settings whose clock is pinned to `year-month-day`.
pub fn engine_on(year: i32, month: u32, day: u32) -> ForecastEngine<FixedClock> {
    let today = NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date");
    ForecastEngine::with_clock(ForecastConfig::default(), FixedClock::on(today))
}

/// One record per consecutive month starting at `year-month`, on the 15th.
pub fn monthly_records(
    year: i32,
    month: u32,
    amounts: &[f64],
    category: Option<&str>,
) -> Vec<HistoricalRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(offset, amount)| {
            let index = (month - 1) as usize + offset;
            let date = format!("{}-{:02}-15", year + (index / 12) as i32, index % 12 + 1);
            let record = HistoricalRecord::new(&date, *amount);
            match category {
                Some(name) => record.with_category(name),
                None => record,
            }
        })
        .collect()
}

/// Checks the structural guarantees every forecast must satisfy.
pub fn assert_well_formed(result: &ForecastResult, months: usize) {
    assert_eq!(result.forecast.len(), months, "forecast horizon");
    assert!(result.confidence <= 100, "confidence {}", result.confidence);
    let all_points = result
        .forecast
        .iter()
        .chain(result.category_forecasts.iter().flatten());
    for point in all_points {
        assert!(point.amount.is_finite(), "non-finite amount");
        assert!(point.amount >= 0.0, "negative amount {}", point.amount);
        let cents = point.amount * 100.0;
        assert!(
            !cents.is_finite() || (cents - cents.round()).abs() < 1e-6,
            "more than two decimals: {}",
            point.amount
        );
        assert_eq!(point.month.len(), 7, "month label {}", point.month);
    }
    for series in &result.category_forecasts {
        assert_eq!(series.len(), months, "category horizon");
    }
}
