use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{ForecastError, Result};

const DEFAULT_DIR_NAME: &str = ".expense_forecast";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "EXPENSE_FORECAST_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Length of the seasonal cycle in months. Seasonal factors are looked up by
/// calendar month, so this is not tunable.
pub const SEASONAL_PERIOD: usize = 12;

/// Tuning constants for the forecasting pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Horizon used when the caller does not pick one.
    pub default_horizon_months: usize,
    /// Histories shorter than this go straight to the basic forecaster.
    pub min_records_for_advanced: usize,
    /// Flat projection used when there is no usable history at all.
    pub fallback_amount: f64,
    pub default_confidence: u8,
    pub seasonal_confidence: u8,
    /// Lag-12 autocorrelation above which a series counts as seasonal.
    pub seasonality_threshold: f64,
    pub outlier_min_months: usize,
    pub outlier_iqr_multiplier: f64,
    pub min_category_points: usize,
    pub min_confidence_points: usize,
    pub total_confidence_weight: f64,
    pub category_confidence_weight: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon_months: 3,
            min_records_for_advanced: 6,
            fallback_amount: 1000.0,
            default_confidence: 50,
            seasonal_confidence: 70,
            seasonality_threshold: 0.4,
            outlier_min_months: 4,
            outlier_iqr_multiplier: 1.5,
            min_category_points: 3,
            min_confidence_points: 3,
            total_confidence_weight: 0.7,
            category_confidence_weight: 0.3,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_amount.is_finite() || self.fallback_amount < 0.0 {
            return Err(invalid("fallback_amount must be a non-negative number"));
        }
        if self.default_confidence > 100 || self.seasonal_confidence > 100 {
            return Err(invalid("confidence values must lie within 0..=100"));
        }
        if !(-1.0..=1.0).contains(&self.seasonality_threshold) {
            return Err(invalid("seasonality_threshold must lie within [-1, 1]"));
        }
        if !self.outlier_iqr_multiplier.is_finite() || self.outlier_iqr_multiplier < 0.0 {
            return Err(invalid("outlier_iqr_multiplier must be a non-negative number"));
        }
        for (name, weight) in [
            ("total_confidence_weight", self.total_confidence_weight),
            ("category_confidence_weight", self.category_confidence_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(invalid(&format!("{name} must lie within [0, 1]")));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ForecastError {
    ForecastError::InvalidConfig(message.to_string())
}

/// Returns the application directory, defaulting to `~/.expense_forecast`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and stores [`ForecastConfig`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for `config.json` inside [`app_data_dir`].
    pub fn from_default_location() -> Self {
        Self::new(app_data_dir().join(CONFIG_FILE))
    }

    /// Missing files load as [`ForecastConfig::default`].
    pub fn load(&self) -> Result<ForecastConfig> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            ForecastConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ForecastConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
