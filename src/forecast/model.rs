use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{month_key, months_ahead};

/// Which model produced a [`ForecastResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Methodology {
    SeasonalAdjusted,
    LinearRegression,
    BasicLinear,
}

/// One projected month. `category` is only set on per-category series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ForecastPoint {
    /// Point for the month `ahead` months after `today`, with `raw` floored at
    /// zero and rounded to cents.
    pub fn projected(today: NaiveDate, ahead: usize, raw: f64, category: Option<&str>) -> Self {
        let ahead = u32::try_from(ahead).unwrap_or(u32::MAX);
        Self {
            month: month_key(months_ahead(today, ahead)),
            amount: round_amount(raw),
            category: category.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub forecast: Vec<ForecastPoint>,
    pub category_forecasts: Vec<Vec<ForecastPoint>>,
    /// Heuristic 0..=100 score derived from goodness of fit.
    pub confidence: u8,
    pub seasonality_detected: bool,
    pub methodology: Methodology,
}

/// Floors at zero and rounds to two decimals. Non-finite values collapse to zero.
pub fn round_amount(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let floored = value.max(0.0);
    // Beyond 2^52 every f64 is already a whole number.
    if floored >= WHOLE_NUMBER_THRESHOLD {
        return floored;
    }
    (floored * 100.0).round() / 100.0
}

const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0;
