use tracing::debug;

use crate::{
    config::ForecastConfig,
    stats::{r_squared, LinearRegression, Point},
};

use super::generators::CategoryForecast;

/// R² of `regression` over `points`, as a 0..=100 percentage.
///
/// Short or degenerate series score `config.default_confidence`.
pub fn calculate_confidence(
    points: &[Point],
    regression: &LinearRegression,
    config: &ForecastConfig,
) -> u8 {
    if points.len() < config.min_confidence_points {
        return config.default_confidence;
    }
    match r_squared(points, regression) {
        Ok(r2) => to_percentage(r2 * 100.0),
        Err(err) => {
            debug!("confidence defaulted: {}", err);
            config.default_confidence
        }
    }
}

/// Blends the total-series confidence with the mean category confidence.
pub fn calculate_overall_confidence(
    total_confidence: u8,
    category_forecasts: &[CategoryForecast],
    config: &ForecastConfig,
) -> u8 {
    if category_forecasts.is_empty() {
        return total_confidence;
    }
    let category_average = category_forecasts
        .iter()
        .map(|forecast| f64::from(forecast.confidence))
        .sum::<f64>()
        / category_forecasts.len() as f64;
    to_percentage(
        f64::from(total_confidence) * config.total_confidence_weight
            + category_average * config.category_confidence_weight,
    )
}

fn to_percentage(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}
