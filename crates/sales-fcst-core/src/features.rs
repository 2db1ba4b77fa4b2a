//! Time and cyclic month features for the regression.
//!
//! Each monthly observation is described by three predictors:
//!
//! | Feature | Definition |
//! |---------|------------|
//! | `time_index` | 1-based position in the ordered series (trend) |
//! | `month_sin` | sin(2π · month / 12) |
//! | `month_cos` | cos(2π · month / 12) |
//!
//! The sin/cos pair places the month on the unit circle, so December and
//! January end up next to each other instead of eleven units apart.

use crate::error::{ForecastError, Result};
use crate::forecast::HistoricalPoint;
use std::f64::consts::PI;

/// Number of predictors per observation.
pub const N_FEATURES: usize = 3;

/// Column names, in the order used by [`FeatureVector::to_array`].
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["time_index", "month_sin", "month_cos"];

/// Predictors for a single month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Position in the series, continuing past the end of history when forecasting
    pub time_index: usize,
    /// Sine component of the month-of-year angle
    pub month_sin: f64,
    /// Cosine component of the month-of-year angle
    pub month_cos: f64,
}

impl FeatureVector {
    /// Build the features for the month at `time_index`.
    pub fn new(time_index: usize, month: u32) -> Self {
        let angle = 2.0 * PI * month as f64 / 12.0;
        Self {
            time_index,
            month_sin: angle.sin(),
            month_cos: angle.cos(),
        }
    }

    /// Features as a row of the design matrix.
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [self.time_index as f64, self.month_sin, self.month_cos]
    }
}

/// Build one feature vector per historical point, in series order.
///
/// `time_index` counts positions, not calendar months, so a series starting
/// in October still begins at 1.
pub fn build_features(points: &[HistoricalPoint]) -> Result<Vec<FeatureVector>> {
    if points.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    Ok(points
        .iter()
        .enumerate()
        .map(|(i, p)| FeatureVector::new(i + 1, p.month))
        .collect())
}
