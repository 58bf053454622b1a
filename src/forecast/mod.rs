//! The forecasting pipeline: aggregation, outlier cleaning, seasonality
//! detection, regression projection, and confidence scoring.

pub mod aggregate;
pub mod basic;
pub mod confidence;
pub mod engine;
pub mod generators;
pub mod model;
pub mod outliers;
pub mod seasonality;

pub use aggregate::{
    aggregate_by_category_and_month, aggregate_monthly_data, indexed_points,
    CategorizedMonthlyAggregate, MonthlyAggregate,
};
pub use basic::basic_forecast;
pub use confidence::{calculate_confidence, calculate_overall_confidence};
pub use engine::{forecast, ForecastEngine};
pub use generators::{
    generate_category_forecasts, generate_total_forecast, seasonal_forecast, CategoryForecast,
    TotalForecast,
};
pub use model::{round_amount, ForecastPoint, ForecastResult, Methodology};
pub use outliers::remove_outliers;
pub use seasonality::{autocorrelation, detect_seasonality};
