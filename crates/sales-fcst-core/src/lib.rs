//! Core forecasting engine for monthly sales totals.
//!
//! This crate turns a time-ordered series of monthly aggregates into a
//! short-horizon forecast using a linear trend plus cyclic month-of-year
//! features.

pub mod calendar;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod projection;
pub mod regression;
pub mod scaling;

// Re-exports for convenience
pub use calendar::YearMonth;
pub use error::{ErrorKind, ForecastError, Result};
pub use features::{build_features, FeatureVector, FEATURE_NAMES, N_FEATURES};
pub use forecast::{
    forecast_sales, validate_horizon, ForecastOptions, ForecastPoint, HistoricalPoint,
    HistoricalRecord, SalesForecast, MAX_HORIZON, MIN_HISTORY, MIN_HORIZON, MODEL_TYPE,
};
pub use metrics::{mape, mse, round2, FitMetrics};
pub use projection::project;
pub use regression::{fit_ols, LinearModel};
pub use scaling::StandardScaler;
