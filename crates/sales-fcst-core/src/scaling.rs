//! Per-feature standardization.
//!
//! The scaler is fitted once on the historical design matrix and then applied
//! unchanged to every future row, so the model sees future features on the
//! same scale it was trained on.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureVector, N_FEATURES};
use statrs::statistics::Statistics;

/// Mean and scale of each feature column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    /// Column means
    pub mean: [f64; N_FEATURES],
    /// Column population standard deviations (1.0 for constant columns)
    pub scale: [f64; N_FEATURES],
    constant: [bool; N_FEATURES],
}

impl StandardScaler {
    /// Fit the scaler on historical feature vectors.
    ///
    /// Uses the population standard deviation. A column whose spread is zero
    /// (up to rounding noise) keeps scale 1.0, so it is only centered.
    pub fn fit(features: &[FeatureVector]) -> Result<Self> {
        if features.is_empty() {
            return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
        }

        let mut mean = [0.0; N_FEATURES];
        let mut scale = [1.0; N_FEATURES];
        let mut constant = [false; N_FEATURES];

        for j in 0..N_FEATURES {
            let column: Vec<f64> = features.iter().map(|f| f.to_array()[j]).collect();
            let m = column.clone().mean();
            let sd = column.population_std_dev();

            if !m.is_finite() {
                return Err(ForecastError::ComputationError(format!(
                    "feature column {} has a non-finite mean",
                    j
                )));
            }

            mean[j] = m;
            if sd.is_finite() && sd > 10.0 * f64::EPSILON * m.abs().max(1.0) {
                scale[j] = sd;
            } else {
                constant[j] = true;
            }
        }

        Ok(Self {
            mean,
            scale,
            constant,
        })
    }

    /// Fit on `features` and return the scaled rows alongside the scaler.
    pub fn fit_transform(features: &[FeatureVector]) -> Result<(Self, Vec<[f64; N_FEATURES]>)> {
        let scaler = Self::fit(features)?;
        let scaled = features.iter().map(|f| scaler.transform(f)).collect();
        Ok((scaler, scaled))
    }

    /// Standardize one feature vector with the fitted parameters.
    pub fn transform(&self, features: &FeatureVector) -> [f64; N_FEATURES] {
        let raw = features.to_array();
        let mut out = [0.0; N_FEATURES];
        for j in 0..N_FEATURES {
            out[j] = (raw[j] - self.mean[j]) / self.scale[j];
        }
        out
    }

    /// Whether column `j` had no spread in the training data.
    pub fn is_constant(&self, j: usize) -> bool {
        self.constant.get(j).copied().unwrap_or(false)
    }
}
