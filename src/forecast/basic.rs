use chrono::NaiveDate;
use tracing::debug;

use crate::{
    config::ForecastConfig,
    records::HistoricalRecord,
    stats::{linear_regression, mean, LinearRegression},
};

use super::{
    aggregate::{aggregate_monthly_data, indexed_points},
    confidence::calculate_confidence,
    generators::{last_index, project_linear},
    model::{ForecastResult, Methodology},
};

/// Always-available projection for sparse history or a failed advanced run.
///
/// Fits a trend when at least two months exist, otherwise projects the mean
/// month (or `config.fallback_amount` with no usable history) as a flat line.
pub fn basic_forecast(
    records: Option<&[HistoricalRecord]>,
    months: usize,
    config: &ForecastConfig,
    today: NaiveDate,
) -> ForecastResult {
    let monthly = aggregate_monthly_data(records.unwrap_or_default());
    let points = indexed_points(&monthly);

    let regression = linear_regression(&points).unwrap_or_else(|err| {
        let totals: Vec<f64> = points.iter().map(|(_, total)| *total).collect();
        let level = mean(&totals).unwrap_or(config.fallback_amount);
        debug!(level, "basic forecast using flat projection: {}", err);
        LinearRegression::flat(level)
    });

    ForecastResult {
        forecast: project_linear(&regression, last_index(&points), months, today, None),
        category_forecasts: Vec::new(),
        confidence: calculate_confidence(&points, &regression, config),
        seasonality_detected: false,
        methodology: Methodology::BasicLinear,
    }
}
