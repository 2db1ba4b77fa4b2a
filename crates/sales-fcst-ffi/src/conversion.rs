//! Conversion of C inputs into engine types.

use crate::types::SalesRow;
use sales_fcst_core::{ForecastError, HistoricalPoint, Result};

/// Convert one C row into a historical point.
pub fn row_to_point(row: &SalesRow) -> Result<HistoricalPoint> {
    let month = u32::try_from(row.month).map_err(|_| {
        ForecastError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            row.month
        ))
    })?;

    Ok(HistoricalPoint {
        year: row.year,
        month,
        total_sales: row.total_sales,
    })
}

/// Build the historical series from a raw row array.
///
/// # Safety
/// `rows` must point to `n_rows` valid `SalesRow`s, or may be null when
/// `n_rows` is 0.
pub unsafe fn build_history(rows: *const SalesRow, n_rows: usize) -> Result<Vec<HistoricalPoint>> {
    if n_rows == 0 || rows.is_null() {
        return Ok(Vec::new());
    }

    std::slice::from_raw_parts(rows, n_rows)
        .iter()
        .map(row_to_point)
        .collect()
}
