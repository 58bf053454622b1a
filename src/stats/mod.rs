//! Descriptive statistics and least-squares helpers used by the forecasting stages.
//!
//! Quantiles follow the "simple statistics" convention: for `n` sorted values
//! and probability `p`, the rank is `n * p`; fractional ranks round up to the
//! next element, whole ranks average the two neighbours when `n` is even.

use serde::{Deserialize, Serialize};

use crate::errors::{ForecastError, Result};

/// An `(x, y)` observation, where `x` is the chronological month index.
pub type Point = (f64, f64);

/// Straight-line fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    /// A horizontal line at `level`.
    pub fn flat(level: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: level,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ForecastError::InsufficientData {
            needed: 1,
            actual: 0,
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance.
pub fn variance(values: &[f64]) -> Result<f64> {
    let mu = mean(values)?;
    let squared = values.iter().map(|value| (value - mu).powi(2)).sum::<f64>();
    Ok(squared / values.len() as f64)
}

/// Quantile of an already ascending slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    let n = sorted.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData {
            needed: 1,
            actual: 0,
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(ForecastError::DegenerateInput(format!(
            "quantile probability {p} outside [0, 1]"
        )));
    }
    if p == 0.0 {
        return Ok(sorted[0]);
    }
    if p == 1.0 {
        return Ok(sorted[n - 1]);
    }

    let rank = n as f64 * p;
    if rank.fract() != 0.0 {
        return Ok(sorted[rank.ceil() as usize - 1]);
    }
    let idx = rank as usize;
    if n % 2 == 0 {
        Ok((sorted[idx - 1] + sorted[idx]) / 2.0)
    } else {
        Ok(sorted[idx])
    }
}

pub fn quantile(values: &[f64], p: f64) -> Result<f64> {
    quantile_sorted(&sorted_copy(values), p)
}

pub fn median(values: &[f64]) -> Result<f64> {
    quantile(values, 0.5)
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Ordinary least-squares fit over `points`.
pub fn linear_regression(points: &[Point]) -> Result<LinearRegression> {
    if points.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            actual: points.len(),
        });
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        sxx += (x - mean_x).powi(2);
        sxy += (x - mean_x) * (y - mean_y);
    }

    if sxx == 0.0 {
        return Err(ForecastError::DegenerateInput(
            "all observations share the same x value".into(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(ForecastError::NonFinite("linear regression"));
    }
    Ok(LinearRegression { slope, intercept })
}

/// Coefficient of determination of `regression` against the observed points.
pub fn r_squared(points: &[Point], regression: &LinearRegression) -> Result<f64> {
    if points.len() < 2 {
        return Ok(1.0);
    }

    let n = points.len() as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let total = points
        .iter()
        .map(|(_, y)| (y - mean_y).powi(2))
        .sum::<f64>();
    let residual = points
        .iter()
        .map(|(x, y)| (y - regression.predict(*x)).powi(2))
        .sum::<f64>();

    if total == 0.0 {
        return Err(ForecastError::DegenerateInput(
            "observed values have no variance".into(),
        ));
    }

    let r2 = 1.0 - residual / total;
    if !r2.is_finite() {
        return Err(ForecastError::NonFinite("r-squared"));
    }
    Ok(r2)
}
