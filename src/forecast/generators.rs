//! Total and per-category projections.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::{
    config::{ForecastConfig, SEASONAL_PERIOD},
    errors::Result,
    stats::{linear_regression, LinearRegression, Point},
};

use super::{
    aggregate::{indexed_points, CategorizedMonthlyAggregate},
    confidence::calculate_confidence,
    model::{ForecastPoint, Methodology},
};

/// Projection of the aggregate monthly series.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalForecast {
    pub points: Vec<ForecastPoint>,
    pub confidence: u8,
    pub methodology: Methodology,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForecast {
    pub category: String,
    pub forecast: Vec<ForecastPoint>,
    pub confidence: u8,
}

/// Uses the seasonal model when `seasonal` holds and a full year of points
/// exists; otherwise a plain linear trend.
pub fn generate_total_forecast(
    points: &[Point],
    months: usize,
    seasonal: bool,
    config: &ForecastConfig,
    today: NaiveDate,
) -> Result<TotalForecast> {
    if seasonal && points.len() >= SEASONAL_PERIOD {
        return Ok(TotalForecast {
            points: seasonal_forecast(points, months, today)?,
            confidence: config.seasonal_confidence,
            methodology: Methodology::SeasonalAdjusted,
        });
    }

    let regression = linear_regression(points)?;
    Ok(TotalForecast {
        points: project_linear(&regression, last_index(points), months, today, None),
        confidence: calculate_confidence(points, &regression, config),
        methodology: Methodology::LinearRegression,
    })
}

/// Linear trend scaled by per-month seasonal factors.
///
/// Factors are measured on the first twelve points of the series but applied by
/// the calendar month of each target date.
pub fn seasonal_forecast(
    points: &[Point],
    months: usize,
    today: NaiveDate,
) -> Result<Vec<ForecastPoint>> {
    let regression = linear_regression(points)?;
    let factors = seasonal_factors(points, &regression);
    let last = last_index(points);
    let current_month = today.month0() as usize;

    Ok((1..=months)
        .map(|ahead| {
            let trend = regression.predict(last + ahead as f64);
            let factor = factors[(current_month + ahead) % SEASONAL_PERIOD];
            ForecastPoint::projected(today, ahead, trend * factor, None)
        })
        .collect())
}

/// Ratio of actual to trend for the first twelve points, padded with 1.0.
pub fn seasonal_factors(points: &[Point], regression: &LinearRegression) -> [f64; SEASONAL_PERIOD] {
    let mut factors = [1.0; SEASONAL_PERIOD];
    for (slot, (x, actual)) in factors.iter_mut().zip(points) {
        let trend = regression.predict(*x);
        if trend > 0.0 {
            *slot = actual / trend;
        }
    }
    factors
}

/// Independent linear projections for every category with enough months.
///
/// A category whose regression fails is logged and left out.
pub fn generate_category_forecasts(
    categorized: &CategorizedMonthlyAggregate,
    months: usize,
    config: &ForecastConfig,
    today: NaiveDate,
) -> Vec<CategoryForecast> {
    let mut forecasts = Vec::new();
    for (category, monthly) in categorized {
        if monthly.len() < config.min_category_points {
            debug!(category = %category, months = monthly.len(), "category too sparse to forecast");
            continue;
        }
        let points = indexed_points(monthly);
        match linear_regression(&points) {
            Ok(regression) => forecasts.push(CategoryForecast {
                category: category.clone(),
                forecast: project_linear(
                    &regression,
                    last_index(&points),
                    months,
                    today,
                    Some(category),
                ),
                confidence: calculate_confidence(&points, &regression, config),
            }),
            Err(err) => warn!("skipping category `{}` forecast: {}", category, err),
        }
    }
    forecasts
}

pub(crate) fn project_linear(
    regression: &LinearRegression,
    last_index: f64,
    months: usize,
    today: NaiveDate,
    category: Option<&str>,
) -> Vec<ForecastPoint> {
    (1..=months)
        .map(|ahead| {
            let raw = regression.predict(last_index + ahead as f64);
            ForecastPoint::projected(today, ahead, raw, category)
        })
        .collect()
}

pub(crate) fn last_index(points: &[Point]) -> f64 {
    points.len().saturating_sub(1) as f64
}
