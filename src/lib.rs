#![doc(test(attr(deny(warnings))))]

//! Expense Forecast projects future monthly spend from historical expense and
//! income records using trend regression, outlier cleaning, and annual
//! seasonality detection, degrading to a simple projection when history is thin.

pub mod config;
pub mod errors;
pub mod forecast;
pub mod records;
pub mod stats;
pub mod time;
pub mod utils;

pub use config::{ConfigManager, ForecastConfig};
pub use errors::{ForecastError, Result};
pub use forecast::{forecast, ForecastEngine, ForecastPoint, ForecastResult, Methodology};
pub use records::{records_from_json, HistoricalRecord};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Forecast tracing initialized.");
    });
}
