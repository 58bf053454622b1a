use std::result::Result as StdResult;

use thiserror::Error;

/// Failures raised inside the forecasting pipeline and its configuration layer.
///
/// Pipeline variants never reach callers of [`crate::forecast`]; they drive the
/// fallback to the basic forecaster instead.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Insufficient data: need at least {needed} point(s), got {actual}")]
    InsufficientData { needed: usize, actual: usize },
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
    #[error("Non-finite value produced by {0}")]
    NonFinite(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, ForecastError>;

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Storage(err.to_string())
    }
}
