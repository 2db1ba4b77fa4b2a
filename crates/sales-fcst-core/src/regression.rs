//! Ordinary least squares fit of sales on the scaled features.

use crate::error::{ForecastError, Result};
use crate::features::{FEATURE_NAMES, N_FEATURES};
use anofox_regression::prelude::*;

/// Relative cutoff below which a singular value counts as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// A fitted linear model: `y = intercept + Σ coefficients[j] * x[j]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: [f64; N_FEATURES],
}

impl LinearModel {
    /// Predict a single (already scaled) row.
    pub fn predict(&self, x: &[f64; N_FEATURES]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }

    /// Predict every row of a design matrix.
    pub fn predict_all(&self, x: &[[f64; N_FEATURES]]) -> Vec<f64> {
        x.iter().map(|row| self.predict(row)).collect()
    }
}

/// Fit OLS with intercept using anofox-regression.
///
/// `active[j] == false` drops column `j` from the design; its coefficient is
/// reported as 0. Constant columns must be dropped this way because, once
/// centered, they are all zero and carry no information.
///
/// Columns that are collinear without being constant are resolved with the
/// minimum-norm least-squares solution, so the fit never fails on a
/// rank-deficient design.
pub fn fit_ols(
    x: &[[f64; N_FEATURES]],
    y: &[f64],
    active: [bool; N_FEATURES],
) -> Result<LinearModel> {
    let n = y.len();
    if x.len() != n {
        return Err(ForecastError::InvalidInput(format!(
            "design matrix has {} rows but target has {}",
            x.len(),
            n
        )));
    }
    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    let columns: Vec<usize> = (0..N_FEATURES).filter(|&j| active[j]).collect();
    let k = columns.len();

    // Nothing varies: the least-squares fit is the mean
    if k == 0 {
        let intercept = y.iter().sum::<f64>() / n as f64;
        return Ok(LinearModel {
            intercept,
            coefficients: [0.0; N_FEATURES],
        });
    }

    if n <= k {
        return Err(ForecastError::InsufficientData {
            needed: k + 1,
            got: n,
        });
    }

    // Build design matrix using faer: n_obs rows × k columns
    let x_mat = faer::Mat::from_fn(n, k, |i, j| x[i][columns[j]]);
    let y_col = faer::Col::from_fn(n, |i| y[i]);

    let fitted = OlsRegressor::builder()
        .with_intercept(true)
        .build()
        .fit(&x_mat, &y_col)
        .map_err(|e| ForecastError::ComputationError(format!("OLS fit failed: {:?}", e)))?;

    let coeffs_col = fitted.coefficients();
    let mut slots: Vec<f64> = (0..k).map(|slot| coeffs_col[slot]).collect();
    let mut intercept = fitted.intercept().unwrap_or(0.0);

    // Aliased columns come back as NaN. Collinear but non-constant columns
    // (e.g. a history with only two calendar months) land here.
    if slots.iter().any(|c| !c.is_finite()) {
        tracing::debug!(columns = k, "design is rank deficient, using minimum-norm solve");
        let (b0, b) = min_norm_lstsq(&x_mat, &y_col)?;
        intercept = b0;
        slots = b;
    }

    let mut coefficients = [0.0; N_FEATURES];
    for (slot, &j) in columns.iter().enumerate() {
        coefficients[j] = slots[slot];
    }

    if !intercept.is_finite() {
        return Err(ForecastError::ComputationError(
            "OLS produced a non-finite intercept".to_string(),
        ));
    }
    if let Some(j) = coefficients.iter().position(|c| !c.is_finite()) {
        return Err(ForecastError::ComputationError(format!(
            "OLS produced a non-finite coefficient for {}",
            FEATURE_NAMES[j]
        )));
    }

    Ok(LinearModel {
        intercept,
        coefficients,
    })
}

/// Minimum-norm least squares with intercept.
///
/// Centers the design and target, then solves `β = V S⁺ Uᵀ y` from a thin
/// SVD. Singular values below `RANK_TOLERANCE · s_max` are treated as zero,
/// so aliased columns share the weight instead of blowing up.
fn min_norm_lstsq(x: &faer::Mat<f64>, y: &faer::Col<f64>) -> Result<(f64, Vec<f64>)> {
    let n = x.nrows();
    let k = x.ncols();

    let x_mean: Vec<f64> = (0..k)
        .map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64)
        .collect();
    let y_mean = (0..n).map(|i| y[i]).sum::<f64>() / n as f64;

    let xc = faer::Mat::from_fn(n, k, |i, j| x[(i, j)] - x_mean[j]);
    let yc = faer::Col::from_fn(n, |i| y[i] - y_mean);

    let svd = xc
        .thin_svd()
        .map_err(|e| ForecastError::ComputationError(format!("SVD failed: {:?}", e)))?;
    let u = svd.U();
    let s = svd.S().column_vector();
    let v = svd.V();

    let s_max = (0..s.nrows()).fold(0.0_f64, |acc, i| acc.max(s[i]));
    let threshold = RANK_TOLERANCE * s_max;

    let uty = u.transpose() * &yc;
    let s_inv_uty = faer::Col::from_fn(s.nrows(), |i| {
        if s[i] > threshold {
            uty[i] / s[i]
        } else {
            0.0
        }
    });
    let beta = v * &s_inv_uty;

    let coefficients: Vec<f64> = (0..k).map(|j| beta[j]).collect();
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(x_mean.iter())
            .map(|(b, m)| b * m)
            .sum::<f64>();

    Ok((intercept, coefficients))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_linear_relationship() {
        // y = 10 + 2*a - 3*b + 0.5*c plus a little deterministic noise
        let x: Vec<[f64; 3]> = (0..24)
            .map(|i| {
                let t = i as f64;
                [t - 11.5, (t * 0.7).sin(), (t * 1.3).cos()]
            })
            .collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let noise = ((i * 7 + 3) % 5) as f64 * 1e-4 - 2e-4;
                10.0 + 2.0 * r[0] - 3.0 * r[1] + 0.5 * r[2] + noise
            })
            .collect();

        let model = fit_ols(&x, &y, [true; 3]).unwrap();
        assert_relative_eq!(model.intercept, 10.0, epsilon = 1e-2);
        assert_relative_eq!(model.coefficients[0], 2.0, epsilon = 1e-2);
        assert_relative_eq!(model.coefficients[1], -3.0, epsilon = 1e-2);
        assert_relative_eq!(model.coefficients[2], 0.5, epsilon = 1e-2);
    }

    #[test]
    fn test_inactive_column_gets_zero_coefficient() {
        let x: Vec<[f64; 3]> = (0..8).map(|i| [i as f64 - 3.5, 0.0, 0.0]).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, r)| 4.0 + 1.5 * r[0] + if i % 2 == 0 { 1e-3 } else { -1e-3 })
            .collect();

        let model = fit_ols(&x, &y, [true, false, false]).unwrap();
        assert_relative_eq!(model.intercept, 4.0, epsilon = 1e-2);
        assert_relative_eq!(model.coefficients[0], 1.5, epsilon = 1e-2);
        assert_eq!(model.coefficients[1], 0.0);
        assert_eq!(model.coefficients[2], 0.0);
    }

    #[test]
    fn test_collinear_columns_use_minimum_norm_solution() {
        // Column 1 is exactly twice column 0: y = 1 + 3*a + 0.5*c has
        // infinitely many solutions, the shortest puts (0.6, 1.2) on (a, 2a)
        let x: Vec<[f64; 3]> = (0..8)
            .map(|i| {
                let a = i as f64 - 3.5;
                [a, 2.0 * a, (i as f64 * 1.3).cos()]
            })
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 1.0 + 3.0 * r[0] + 0.5 * r[2]).collect();

        let model = fit_ols(&x, &y, [true; 3]).unwrap();
        assert_relative_eq!(model.coefficients[0], 0.6, epsilon = 1e-8);
        assert_relative_eq!(model.coefficients[1], 1.2, epsilon = 1e-8);
        assert_relative_eq!(model.coefficients[2], 0.5, epsilon = 1e-8);
        assert_relative_eq!(model.intercept, 1.0, epsilon = 1e-8);

        let fitted = model.predict_all(&x);
        for (f, t) in fitted.iter().zip(y.iter()) {
            assert_relative_eq!(*f, *t, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_min_norm_lstsq_full_rank_matches_exact_solution() {
        let x = faer::Mat::from_fn(5, 2, |i, j| {
            if j == 0 {
                i as f64
            } else {
                (i * i) as f64
            }
        });
        let y = faer::Col::from_fn(5, |i| 2.0 + 0.5 * i as f64 - 0.25 * (i * i) as f64);

        let (intercept, beta) = min_norm_lstsq(&x, &y).unwrap();
        assert_relative_eq!(intercept, 2.0, epsilon = 1e-9);
        assert_relative_eq!(beta[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(beta[1], -0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_no_active_columns_fits_mean() {
        let x = vec![[0.0; 3]; 4];
        let y = vec![1.0, 2.0, 3.0, 6.0];
        let model = fit_ols(&x, &y, [false; 3]).unwrap();
        assert_relative_eq!(model.intercept, 3.0);
        assert_relative_eq!(model.predict(&[5.0, 5.0, 5.0]), 3.0);
    }

    #[test]
    fn test_predict_is_affine() {
        let model = LinearModel {
            intercept: 1.0,
            coefficients: [2.0, 3.0, 4.0],
        };
        assert_relative_eq!(model.predict(&[1.0, 1.0, 1.0]), 10.0);
        assert_eq!(model.predict_all(&[[0.0; 3], [1.0, 0.0, 0.0]]), vec![1.0, 3.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let x = vec![[0.0; 3]; 3];
        assert!(matches!(
            fit_ols(&x, &[1.0, 2.0], [true; 3]),
            Err(ForecastError::InvalidInput(_))
        ));
    }
}
