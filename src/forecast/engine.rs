use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    config::ForecastConfig,
    errors::Result,
    records::HistoricalRecord,
    time::{Clock, SystemClock},
};

use super::{
    aggregate::{aggregate_by_category_and_month, aggregate_monthly_data, indexed_points},
    basic::basic_forecast,
    confidence::calculate_overall_confidence,
    generators::{generate_category_forecasts, generate_total_forecast},
    model::ForecastResult,
    outliers::remove_outliers,
    seasonality::detect_seasonality,
};

/// Entry point that routes between the advanced pipeline and the basic forecaster.
///
/// [`ForecastEngine::forecast`] never fails: any error in the advanced pipeline
/// is logged and answered with [`basic_forecast`] over the same input.
#[derive(Debug, Clone)]
pub struct ForecastEngine<C: Clock = SystemClock> {
    config: ForecastConfig,
    clock: C,
}

impl ForecastEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(ForecastConfig::default())
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for ForecastEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ForecastEngine<C> {
    pub fn with_clock(config: ForecastConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast over `config.default_horizon_months`.
    pub fn forecast_default_horizon(&self, records: Option<&[HistoricalRecord]>) -> ForecastResult {
        self.forecast(records, self.config.default_horizon_months)
    }

    pub fn forecast(&self, records: Option<&[HistoricalRecord]>, months: usize) -> ForecastResult {
        let today = self.clock.today();
        let history = match records {
            Some(history) if history.len() >= self.config.min_records_for_advanced => history,
            _ => {
                debug!(
                    records = records.map_or(0, <[HistoricalRecord]>::len),
                    "history too short for advanced forecasting"
                );
                return basic_forecast(records, months, &self.config, today);
            }
        };

        match self.advanced_forecast(history, months, today) {
            Ok(result) => result,
            Err(err) => {
                warn!("advanced forecast failed, using basic forecast: {}", err);
                basic_forecast(records, months, &self.config, today)
            }
        }
    }

    pub fn basic_forecast(
        &self,
        records: Option<&[HistoricalRecord]>,
        months: usize,
    ) -> ForecastResult {
        basic_forecast(records, months, &self.config, self.clock.today())
    }

    fn advanced_forecast(
        &self,
        history: &[HistoricalRecord],
        months: usize,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        let monthly = aggregate_monthly_data(history);
        let cleaned = remove_outliers(&monthly, &self.config)?;
        let seasonal = detect_seasonality(&cleaned, self.config.seasonality_threshold);
        let points = indexed_points(&cleaned);
        let total = generate_total_forecast(&points, months, seasonal, &self.config, today)?;

        let categorized = aggregate_by_category_and_month(history);
        let categories = generate_category_forecasts(&categorized, months, &self.config, today);
        let confidence =
            calculate_overall_confidence(total.confidence, &categories, &self.config);

        debug!(
            months = points.len(),
            seasonal,
            categories = categories.len(),
            confidence,
            "advanced forecast complete"
        );

        Ok(ForecastResult {
            forecast: total.points,
            category_forecasts: categories
                .into_iter()
                .map(|category| category.forecast)
                .collect(),
            confidence,
            seasonality_detected: seasonal,
            methodology: total.methodology,
        })
    }
}

/// Forecasts `months` ahead with default settings and the wall clock.
pub fn forecast(records: Option<&[HistoricalRecord]>, months: usize) -> ForecastResult {
    ForecastEngine::new().forecast(records, months)
}
