//! Monthly sales forecasting engine.
//!
//! A forecast request runs four stages in order:
//!
//! 1. [`build_features`](crate::features::build_features) turns each month into
//!    a trend index plus a sin/cos month-of-year encoding.
//! 2. [`StandardScaler`] standardizes the features.
//! 3. [`fit_ols`] fits a linear regression and [`FitMetrics`] reports the
//!    in-sample fit.
//! 4. [`project`] walks forward month by month to produce predictions.
//!
//! Every intermediate object is created for the request and dropped with it.

use crate::calendar::YearMonth;
use crate::error::{ForecastError, Result};
use crate::features::{build_features, N_FEATURES};
use crate::metrics::FitMetrics;
use crate::projection::project;
use crate::regression::fit_ols;
use crate::scaling::StandardScaler;
use chrono::NaiveDate;
use serde::Serialize;

/// Smallest accepted horizon, in months.
pub const MIN_HORIZON: usize = 1;

/// Largest accepted horizon, in months.
pub const MAX_HORIZON: usize = 12;

/// Minimum number of historical months required to fit the model.
pub const MIN_HISTORY: usize = 6;

/// Label reported in [`FitMetrics::model_type`].
pub const MODEL_TYPE: &str = "Linear Regression";

/// One month of aggregated sales, as supplied by the data-access layer.
///
/// Points must be sorted by (year, month) without duplicates. Gaps are not
/// filled: each point simply takes the next time index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalPoint {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    pub total_sales: f64,
}

/// A predicted month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    /// Prediction rounded to 2 decimals
    pub predicted_sales: f64,
    /// First day of the month
    pub date: NaiveDate,
}

/// A historical month echoed back with display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRecord {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_sales: f64,
    /// First day of the month
    pub date: NaiveDate,
}

/// Complete answer to a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesForecast {
    /// One entry per requested month, in chronological order
    pub predictions: Vec<ForecastPoint>,
    /// The input series with month names and dates added
    pub historical_data: Vec<HistoricalRecord>,
    /// Training-set fit diagnostics
    pub model_info: FitMetrics,
}

/// Forecast options.
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Number of months to forecast, accepted range 1-12
    pub horizon: i64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self { horizon: 1 }
    }
}

/// Check that `horizon` lies in `MIN_HORIZON..=MAX_HORIZON`.
pub fn validate_horizon(horizon: i64) -> Result<usize> {
    usize::try_from(horizon)
        .ok()
        .filter(|h| (MIN_HORIZON..=MAX_HORIZON).contains(h))
        .ok_or(ForecastError::InvalidHorizon {
            horizon,
            min: MIN_HORIZON,
            max: MAX_HORIZON,
        })
}

/// Forecast future monthly sales from a historical series.
///
/// Fails with [`ForecastError::InvalidHorizon`] before looking at the data,
/// with [`ForecastError::InsufficientData`] when fewer than [`MIN_HISTORY`]
/// months are given, and with a computation error if any stage fails. No
/// partial result is ever returned.
///
/// # Example
/// ```
/// use sales_fcst_core::{forecast_sales, ForecastOptions, HistoricalPoint};
///
/// let history: Vec<HistoricalPoint> = [100.0, 110.0, 105.0, 120.0, 130.0, 125.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &total_sales)| HistoricalPoint { year: 2023, month: i as u32 + 1, total_sales })
///     .collect();
///
/// let result = forecast_sales(&history, &ForecastOptions { horizon: 2 }).unwrap();
/// assert_eq!(result.predictions.len(), 2);
/// assert_eq!((result.predictions[0].year, result.predictions[0].month), (2023, 7));
/// ```
pub fn forecast_sales(
    history: &[HistoricalPoint],
    options: &ForecastOptions,
) -> Result<SalesForecast> {
    let horizon = validate_horizon(options.horizon)?;

    if history.len() < MIN_HISTORY {
        return Err(ForecastError::InsufficientData {
            needed: MIN_HISTORY,
            got: history.len(),
        });
    }

    let historical_data = render_history(history)?;

    // Features and scaling
    let features = build_features(history)?;
    let (scaler, scaled) = StandardScaler::fit_transform(&features)?;

    // Fit
    let target: Vec<f64> = history.iter().map(|p| p.total_sales).collect();
    let mut active = [true; N_FEATURES];
    for (j, flag) in active.iter_mut().enumerate() {
        *flag = !scaler.is_constant(j);
    }
    let model = fit_ols(&scaled, &target, active)?;
    tracing::debug!(
        intercept = model.intercept,
        coefficients = ?model.coefficients,
        "fitted sales regression"
    );

    let fitted = model.predict_all(&scaled);
    let model_info = FitMetrics::compute(MODEL_TYPE, &target, &fitted)?;

    // Project
    let last = history
        .last()
        .ok_or_else(|| ForecastError::InternalError("history is empty".to_string()))?;
    let last = YearMonth::new(last.year, last.month)?;
    let predictions = project(&model, &scaler, history.len(), last, horizon)?;

    tracing::info!(
        horizon,
        training_points = model_info.training_data_points,
        mse = model_info.mse,
        mape = model_info.mape,
        "sales forecast complete"
    );

    Ok(SalesForecast {
        predictions,
        historical_data,
        model_info,
    })
}

/// Validate the input rows and add month names and dates for display.
fn render_history(history: &[HistoricalPoint]) -> Result<Vec<HistoricalRecord>> {
    history
        .iter()
        .map(|p| {
            if !p.total_sales.is_finite() {
                return Err(ForecastError::InvalidInput(format!(
                    "total_sales for {}-{:02} is not a finite number",
                    p.year, p.month
                )));
            }
            let ym = YearMonth::new(p.year, p.month)?;
            Ok(HistoricalRecord {
                year: p.year,
                month: p.month,
                month_name: ym.month_name()?.to_string(),
                total_sales: p.total_sales,
                date: ym.first_day()?,
            })
        })
        .collect()
}
