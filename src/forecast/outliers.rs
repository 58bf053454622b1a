use tracing::debug;

use crate::{
    config::ForecastConfig,
    errors::Result,
    stats::{quantile_sorted, sorted_copy},
};

use super::aggregate::MonthlyAggregate;

/// Replaces months outside the Tukey fences with the median of all months.
///
/// The lower fence never drops below zero. Outliers are substituted, not
/// clipped, so the fence value itself never shows up as a recurring month.
pub fn remove_outliers(monthly: &MonthlyAggregate, config: &ForecastConfig) -> Result<MonthlyAggregate> {
    if monthly.len() < config.outlier_min_months {
        return Ok(monthly.clone());
    }

    let values: Vec<f64> = monthly.values().copied().collect();
    let sorted = sorted_copy(&values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let iqr = q3 - q1;
    let upper = q3 + config.outlier_iqr_multiplier * iqr;
    let lower = (q1 - config.outlier_iqr_multiplier * iqr).max(0.0);

    let mut replaced = 0usize;
    let cleaned: MonthlyAggregate = monthly
        .iter()
        .map(|(month, total)| {
            if (lower..=upper).contains(total) {
                (month.clone(), *total)
            } else {
                replaced += 1;
                (month.clone(), median)
            }
        })
        .collect();

    if replaced > 0 {
        debug!(replaced, lower, upper, median, "replaced outlier months with median");
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(values: &[f64]) -> MonthlyAggregate {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("2024-{:02}", i + 1), *v))
            .collect()
    }

    #[test]
    fn short_series_is_untouched() {
        let data = monthly(&[1.0, 1000.0, 5.0]);
        assert_eq!(remove_outliers(&data, &ForecastConfig::default()).unwrap(), data);
    }

    #[test]
    fn extreme_month_becomes_median() {
        let data = monthly(&[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 5000.0]);
        let cleaned = remove_outliers(&data, &ForecastConfig::default()).unwrap();
        assert_eq!(cleaned["2024-08"], 100.0);
        assert!(cleaned.values().all(|v| *v == 100.0));
    }

    #[test]
    fn substitution_uses_median_not_fence() {
        // sorted: 10 20 30 40 50 60 70 80 90 1000
        // q1 = 30, q3 = 80, iqr = 50, upper fence = 155, median = 55
        let data = monthly(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 1000.0]);
        let cleaned = remove_outliers(&data, &ForecastConfig::default()).unwrap();
        assert_eq!(cleaned["2024-10"], 55.0);
        assert_eq!(cleaned["2024-01"], 10.0);
    }

    #[test]
    fn lower_fence_is_floored_at_zero() {
        let data = monthly(&[0.0, 0.0, 400.0, 410.0, 420.0, 430.0]);
        let cleaned = remove_outliers(&data, &ForecastConfig::default()).unwrap();
        assert_eq!(cleaned, data);
    }
}
