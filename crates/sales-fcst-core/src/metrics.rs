//! In-sample fit diagnostics.
//!
//! Both metrics are computed by re-predicting the training rows. They describe
//! how well the line fits the history it was estimated on and say nothing
//! about out-of-sample accuracy.

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Calculates Mean Squared Error between actual and fitted values.
///
/// # Formula
/// MSE = (1/n) * Σ(actual_i - fitted_i)²
pub fn mse(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    validate_inputs(actual, fitted)?;
    let sum: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Calculates Mean Absolute Percentage Error, as a percentage.
///
/// Every observation counts. The denominator is clamped to
/// `max(|actual_i|, f64::EPSILON)`, so a zero actual produces a very large
/// but finite term instead of a division by zero.
///
/// # Formula
/// MAPE = (100/n) * Σ|actual_i - fitted_i| / max(|actual_i|, ε)
///
/// # Example
/// ```
/// use sales_fcst_core::metrics::mape;
/// let actual = vec![100.0, 200.0, 300.0];
/// let fitted = vec![110.0, 180.0, 330.0];
/// let error = mape(&actual, &fitted).unwrap();
/// assert!((error - 10.0).abs() < 1e-9);
/// ```
pub fn mape(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    validate_inputs(actual, fitted)?;
    let sum: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).abs() / a.abs().max(f64::EPSILON))
        .sum();
    Ok(sum / actual.len() as f64 * 100.0)
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Training-set fit quality reported with every forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitMetrics {
    /// Label of the regression technique
    #[serde(rename = "type")]
    pub model_type: String,
    /// Number of historical months used for the fit
    pub training_data_points: usize,
    /// In-sample MSE, rounded to 2 decimals
    pub mse: f64,
    /// In-sample MAPE in percent, rounded to 2 decimals
    pub mape: f64,
}

impl FitMetrics {
    /// Compute rounded in-sample metrics for a fit.
    pub fn compute(model_type: &str, actual: &[f64], fitted: &[f64]) -> Result<Self> {
        let mse = mse(actual, fitted)?;
        let mape = mape(actual, fitted)?;
        if !mse.is_finite() || !mape.is_finite() {
            return Err(ForecastError::ComputationError(
                "fit metrics are not finite".to_string(),
            ));
        }

        Ok(Self {
            model_type: model_type.to_string(),
            training_data_points: actual.len(),
            mse: round2(mse),
            mape: round2(mape),
        })
    }
}

fn validate_inputs(actual: &[f64], fitted: &[f64]) -> Result<()> {
    if actual.len() != fitted.len() {
        return Err(ForecastError::InvalidInput(format!(
            "Actual and fitted arrays must have the same length: {} vs {}",
            actual.len(),
            fitted.len()
        )));
    }
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mse() {
        let actual = vec![1.0, 2.0, 3.0];
        let fitted = vec![1.0, 2.0, 4.0];
        let result = mse(&actual, &fitted).unwrap();
        assert_relative_eq!(result, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mape() {
        let actual = vec![100.0, 200.0, 300.0];
        let fitted = vec![110.0, 180.0, 330.0];
        // Errors: 10%, 10%, 10% -> MAPE = 10%
        let result = mape(&actual, &fitted).unwrap();
        assert_relative_eq!(result, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mape_with_zero_actual_stays_finite() {
        let actual = vec![0.0, 100.0];
        let fitted = vec![1e-20, 100.0];
        let result = mape(&actual, &fitted).unwrap();
        assert!(result.is_finite());
        // 1e-20 / EPSILON contributes, the second term is zero
        assert_relative_eq!(result, 1e-20 / f64::EPSILON / 2.0 * 100.0, max_relative = 1e-9);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-2.5551), -2.56);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_fit_metrics_are_rounded() {
        let actual = vec![100.0, 110.0, 105.0];
        let fitted = vec![101.0, 108.0, 106.0];
        let m = FitMetrics::compute("Linear Regression", &actual, &fitted).unwrap();
        assert_eq!(m.training_data_points, 3);
        // (1 + 4 + 1) / 3 = 2.0
        assert_eq!(m.mse, 2.0);
        assert_eq!(m.mape, round2(m.mape));
        assert_eq!(m.model_type, "Linear Regression");
    }

    #[test]
    fn test_fit_metrics_serialize_type_key() {
        let m = FitMetrics {
            model_type: "Linear Regression".into(),
            training_data_points: 6,
            mse: 1.5,
            mape: 2.25,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "Linear Regression");
        assert_eq!(json["training_data_points"], 6);
        assert!(json.get("model_type").is_none());
    }

    #[test]
    fn test_validate_inputs_length_mismatch() {
        assert!(matches!(
            mse(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_inputs_empty() {
        assert!(matches!(
            mape(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));
    }
}
