//! FFI boundary layer for the monthly sales forecasting engine.
//!
//! This crate provides C-compatible functions that a host service (HTTP
//! routing, database access) calls with the monthly aggregates it queried.

pub mod allocation;
pub mod conversion;
pub mod error_handling;
pub mod logging;
pub mod types;

use libc::{c_char, c_int, size_t};
use sales_fcst_core::{forecast_sales, validate_horizon, ForecastOptions, SalesForecast};

use allocation::{alloc_and_copy_array, free_and_null, string_to_c_string};
use conversion::build_history;
use error_handling::{check_null_pointers, ffi_try, init_error, set_error};

pub use types::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Copy a string to a fixed-size char buffer.
fn copy_string_to_buffer(s: &str, buffer: &mut [c_char]) {
    let bytes = s.as_bytes();
    let len = bytes.len().min(buffer.len() - 1);
    for (i, &b) in bytes[..len].iter().enumerate() {
        buffer[i] = b as c_char;
    }
    buffer[len] = 0;
}

/// Validate inputs and run the engine.
///
/// The horizon is checked before the rows are even read.
unsafe fn run_forecast(
    operation: &str,
    rows: *const SalesRow,
    n_rows: size_t,
    horizon: c_int,
    out_error: *mut SalesFcstError,
) -> Option<SalesForecast> {
    ffi_try(operation, out_error, || {
        let horizon = i64::from(horizon);
        validate_horizon(horizon)?;
        let history = build_history(rows, n_rows)?;
        forecast_sales(&history, &ForecastOptions { horizon })
    })
}

// ============================================================================
// Logging
// ============================================================================

/// Install the library's log subscriber, configured from `SALES_FCST_LOG`.
///
/// Returns true if the subscriber is active. Calling it again is a no-op.
#[no_mangle]
pub extern "C" fn sales_fcst_init_logging() -> bool {
    logging::init_logging()
}

// ============================================================================
// Forecasting
// ============================================================================

/// Forecast `horizon` months of sales from `n_rows` monthly aggregates.
///
/// Rows must be ordered by (year, month). On success the result arrays are
/// allocated and must be released with `sales_fcst_free_forecast_result`.
///
/// # Safety
/// `rows` must point to `n_rows` valid rows (it may be null when `n_rows` is
/// 0). `out_result` must be valid; `out_error` must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_forecast(
    rows: *const SalesRow,
    n_rows: size_t,
    horizon: c_int,
    out_result: *mut ForecastResult,
    out_error: *mut SalesFcstError,
) -> bool {
    init_error(out_error);

    if check_null_pointers(out_error, &[out_result as *const core::ffi::c_void]) {
        return false;
    }
    if n_rows > 0 && check_null_pointers(out_error, &[rows as *const core::ffi::c_void]) {
        return false;
    }

    let forecast = match run_forecast("sales_fcst_forecast", rows, n_rows, horizon, out_error) {
        Some(f) => f,
        None => return false,
    };

    let years: Vec<c_int> = forecast.predictions.iter().map(|p| p.year).collect();
    let months: Vec<c_int> = forecast
        .predictions
        .iter()
        .map(|p| p.month as c_int)
        .collect();
    let sales: Vec<f64> = forecast
        .predictions
        .iter()
        .map(|p| p.predicted_sales)
        .collect();

    let r = &mut *out_result;
    *r = ForecastResult::default();

    if !alloc_and_copy_array(&years, &mut r.years, out_error)
        || !alloc_and_copy_array(&months, &mut r.months, out_error)
        || !alloc_and_copy_array(&sales, &mut r.predicted_sales, out_error)
    {
        sales_fcst_free_forecast_result(r);
        return false;
    }

    r.n_forecasts = forecast.predictions.len();
    copy_string_to_buffer(&forecast.model_info.model_type, &mut r.model_type);
    r.training_data_points = forecast.model_info.training_data_points;
    r.mse = forecast.model_info.mse;
    r.mape = forecast.model_info.mape;

    true
}

/// Forecast and return the full JSON document.
///
/// The document has the keys `predictions`, `historical_data` and
/// `model_info`. The string must be released with `sales_fcst_free_string`.
///
/// # Safety
/// `rows` must point to `n_rows` valid rows (it may be null when `n_rows` is
/// 0). `out_json` must be valid; `out_error` must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_forecast_json(
    rows: *const SalesRow,
    n_rows: size_t,
    horizon: c_int,
    out_json: *mut *mut c_char,
    out_error: *mut SalesFcstError,
) -> bool {
    init_error(out_error);

    if check_null_pointers(out_error, &[out_json as *const core::ffi::c_void]) {
        return false;
    }
    *out_json = std::ptr::null_mut();

    if n_rows > 0 && check_null_pointers(out_error, &[rows as *const core::ffi::c_void]) {
        return false;
    }

    let forecast = match run_forecast("sales_fcst_forecast_json", rows, n_rows, horizon, out_error)
    {
        Some(f) => f,
        None => return false,
    };

    let document = match serde_json::to_string(&forecast) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize forecast");
            set_error(out_error, ErrorCode::ComputationError, &e.to_string());
            return false;
        }
    };

    let ptr = string_to_c_string(&document);
    if ptr.is_null() {
        set_error(out_error, ErrorCode::AllocationError, "Memory allocation failed");
        return false;
    }
    *out_json = ptr;
    true
}

/// Liveness document: `{"status": "ML service is alive", "version": ...}`.
///
/// The string must be released with `sales_fcst_free_string`. Returns null
/// on allocation failure.
#[no_mangle]
pub extern "C" fn sales_fcst_status_json() -> *mut c_char {
    let status = serde_json::json!({
        "status": "ML service is alive",
        "version": env!("CARGO_PKG_VERSION"),
    });
    unsafe { string_to_c_string(&status.to_string()) }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a ForecastResult.
///
/// # Safety
/// The result pointer must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_free_forecast_result(result: *mut ForecastResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;

    free_and_null(&mut r.years);
    free_and_null(&mut r.months);
    free_and_null(&mut r.predicted_sales);
    r.n_forecasts = 0;
}

/// Free a string returned by this library.
///
/// # Safety
/// The pointer must be null or a string returned by this library.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_free_string(s: *mut c_char) {
    let mut s = s;
    free_and_null(&mut s);
}
