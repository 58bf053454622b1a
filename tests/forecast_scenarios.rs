mod common;

use common::{assert_well_formed, engine_on, monthly_records};
use expense_forecast::{forecast, ForecastPoint, HistoricalRecord, Methodology};

#[test]
fn steady_growth_extends_past_last_month() {
    let amounts: Vec<f64> = (0..12).map(|i| 1000.0 + 100.0 * i as f64).collect();
    let records = monthly_records(2024, 1, &amounts, Some("Office"));

    let result = engine_on(2025, 1, 5).forecast(Some(&records), 3);

    assert_well_formed(&result, 3);
    assert!(matches!(
        result.methodology,
        Methodology::LinearRegression | Methodology::SeasonalAdjusted
    ));
    assert!(result.forecast.iter().all(|p| p.amount > 2100.0));
    assert_eq!(result.forecast[0].amount, 2200.0);
    assert_eq!(result.forecast[0].month, "2025-02");

    assert_eq!(result.category_forecasts.len(), 1);
    let office = &result.category_forecasts[0];
    assert_eq!(office.len(), 3);
    assert!(office
        .iter()
        .all(|p| p.category.as_deref() == Some("Office")));
    assert_eq!(result.confidence, 100);
}

#[test]
fn three_records_in_two_months_use_default_confidence() {
    let records = vec![
        HistoricalRecord::new("2024-03-02", 100.0),
        HistoricalRecord::new("2024-03-20", 40.0),
        HistoricalRecord::new("2024-04-11", 180.0),
    ];
    let result = engine_on(2024, 5, 1).forecast(Some(&records), 3);
    assert_well_formed(&result, 3);
    assert_eq!(result.methodology, Methodology::BasicLinear);
    assert_eq!(result.confidence, 50);
}

#[test]
fn three_records_in_three_months_are_scored_by_fit() {
    let records = monthly_records(2024, 1, &[100.0, 200.0, 300.0], None);
    let result = engine_on(2024, 4, 1).forecast(Some(&records), 3);
    assert_eq!(result.methodology, Methodology::BasicLinear);
    assert_eq!(result.confidence, 100);
    let amounts: Vec<f64> = result.forecast.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![400.0, 500.0, 600.0]);
}

#[test]
fn missing_history_projects_default_amount() {
    let result = engine_on(2025, 12, 31).forecast(None, 3);
    assert_well_formed(&result, 3);
    assert_eq!(result.methodology, Methodology::BasicLinear);
    assert!(result.forecast.iter().all(|p| p.amount == 1000.0));
    let months: Vec<&str> = result.forecast.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, vec!["2026-01", "2026-02", "2026-03"]);
}

#[test]
fn repeating_year_uses_seasonal_model() {
    let year: Vec<f64> = (1..=12).map(|m| 100.0 * m as f64).collect();
    let amounts: Vec<f64> = year.iter().chain(year.iter()).copied().collect();
    let records = monthly_records(2023, 1, &amounts, Some("Utilities"));

    let result = engine_on(2025, 1, 10).forecast(Some(&records), 4);

    assert_well_formed(&result, 4);
    assert!(result.seasonality_detected);
    assert_eq!(result.methodology, Methodology::SeasonalAdjusted);
    assert!(result.confidence <= 70);
}

#[test]
fn under_a_year_of_history_is_never_seasonal() {
    let amounts = [500.0, 900.0, 500.0, 900.0, 500.0, 900.0, 500.0, 900.0, 500.0, 900.0, 500.0];
    let records = monthly_records(2024, 1, &amounts, None);
    let result = engine_on(2025, 1, 1).forecast(Some(&records), 2);
    assert!(!result.seasonality_detected);
    assert_eq!(result.methodology, Methodology::LinearRegression);
}

#[test]
fn spike_month_does_not_drag_the_projection() {
    let mut amounts = vec![100.0; 8];
    amounts.push(5000.0);
    let records = monthly_records(2024, 1, &amounts, None);
    let result = engine_on(2024, 10, 1).forecast(Some(&records), 3);
    assert!(result.forecast.iter().all(|p| p.amount == 100.0));
}

#[test]
fn two_month_category_is_left_out() {
    let mut records = monthly_records(2024, 1, &[50.0; 8], Some("Office"));
    records.extend(monthly_records(2024, 3, &[75.0, 80.0], Some("Travel")));

    let result = engine_on(2024, 9, 1).forecast(Some(&records), 2);

    assert_eq!(result.category_forecasts.len(), 1);
    assert!(result
        .category_forecasts
        .iter()
        .flatten()
        .all(|p| p.category.as_deref() == Some("Office")));
}

#[test]
fn default_entry_point_uses_wall_clock() {
    let records = monthly_records(2024, 1, &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0], None);
    let result = forecast(Some(&records), 2);
    assert_well_formed(&result, 2);
    assert_eq!(result.methodology, Methodology::LinearRegression);
}

#[test]
fn default_horizon_is_three_months() {
    let result = engine_on(2025, 6, 1).forecast_default_horizon(None);
    assert_eq!(result.forecast.len(), 3);
}

#[test]
fn category_whose_regression_overflows_is_skipped() {
    let mut records = monthly_records(2024, 1, &[1e308; 3], Some("Huge"));
    records.extend(monthly_records(2024, 1, &[-1e308; 3], Some("Refund")));
    records.extend(monthly_records(
        2024,
        1,
        &[100.0, 200.0, 300.0, 400.0, 500.0, 600.0],
        Some("Office"),
    ));

    let result = engine_on(2024, 7, 1).forecast(Some(&records), 2);

    assert_well_formed(&result, 2);
    assert_eq!(result.methodology, Methodology::LinearRegression);
    assert_eq!(
        result.category_forecasts,
        vec![vec![
            ForecastPoint {
                month: "2024-08".into(),
                amount: 700.0,
                category: Some("Office".into()),
            },
            ForecastPoint {
                month: "2024-09".into(),
                amount: 800.0,
                category: Some("Office".into()),
            },
        ]]
    );
}
