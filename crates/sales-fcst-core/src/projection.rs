//! Month-by-month projection of a fitted model into the future.

use crate::calendar::YearMonth;
use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use crate::forecast::ForecastPoint;
use crate::metrics::round2;
use crate::regression::LinearModel;
use crate::scaling::StandardScaler;

/// Project `horizon` months past `last`.
///
/// Step `i` (1-based) lands on the i-th month after `last` and uses
/// `time_index = history_len + i`, continuing the training trend sequence.
/// Features depend only on the calendar position, never on earlier
/// predictions, and are scaled with the scaler fitted on history.
pub fn project(
    model: &LinearModel,
    scaler: &StandardScaler,
    history_len: usize,
    last: YearMonth,
    horizon: usize,
) -> Result<Vec<ForecastPoint>> {
    let mut points = Vec::with_capacity(horizon);
    let mut current = last;

    for step in 1..=horizon {
        current = current.succ();

        let features = FeatureVector::new(history_len + step, current.month);
        let scaled = scaler.transform(&features);
        let predicted = model.predict(&scaled);

        if !predicted.is_finite() {
            return Err(ForecastError::ComputationError(format!(
                "prediction for {} is not finite",
                current
            )));
        }

        points.push(ForecastPoint {
            year: current.year,
            month: current.month,
            month_name: current.month_name()?.to_string(),
            predicted_sales: round2(predicted),
            date: current.first_day()?,
        });
    }

    Ok(points)
}
