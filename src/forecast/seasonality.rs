use tracing::debug;

use crate::{
    config::SEASONAL_PERIOD,
    errors::{ForecastError, Result},
    stats::{mean, variance},
};

use super::aggregate::MonthlyAggregate;

/// Whether the lag-12 autocorrelation of the monthly totals exceeds `threshold`.
///
/// Fewer than twelve months, or a series without variation, is never seasonal.
pub fn detect_seasonality(monthly: &MonthlyAggregate, threshold: f64) -> bool {
    if monthly.len() < SEASONAL_PERIOD {
        return false;
    }
    let values: Vec<f64> = monthly.values().copied().collect();
    match autocorrelation(&values, SEASONAL_PERIOD) {
        Ok(score) => {
            debug!(score, threshold, "lag-{} autocorrelation", SEASONAL_PERIOD);
            score > threshold
        }
        Err(err) => {
            debug!("seasonality undetermined: {}", err);
            false
        }
    }
}

/// Autocorrelation of `values` at `lag`, normalised by the population variance.
pub fn autocorrelation(values: &[f64], lag: usize) -> Result<f64> {
    if values.len() <= lag {
        return Err(ForecastError::InsufficientData {
            needed: lag + 1,
            actual: values.len(),
        });
    }
    let mu = mean(values)?;
    let var = variance(values)?;
    if var == 0.0 {
        return Err(ForecastError::DegenerateInput("series has no variance".into()));
    }

    let pairs = values.len() - lag;
    let covariance = (0..pairs)
        .map(|i| (values[i] - mu) * (values[i + lag] - mu))
        .sum::<f64>();
    Ok(covariance / (pairs as f64 * var))
}
