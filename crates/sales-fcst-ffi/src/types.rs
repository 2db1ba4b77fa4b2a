//! C-compatible type definitions for FFI boundary.
//!
//! These types are shared with the host service that owns the HTTP and
//! database plumbing.

use libc::{c_char, c_double, c_int, size_t};
use sales_fcst_core::{ErrorKind, ForecastError};

/// Error codes for FFI boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    NullPointer = 1,
    ValidationError = 2,
    InsufficientData = 3,
    ComputationError = 4,
    AllocationError = 5,
    PanicCaught = 6,
}

impl From<&ForecastError> for ErrorCode {
    fn from(err: &ForecastError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ErrorCode::ValidationError,
            ErrorKind::InsufficientData => ErrorCode::InsufficientData,
            ErrorKind::Computation => ErrorCode::ComputationError,
        }
    }
}

/// Error structure with message buffer for FFI.
#[repr(C)]
pub struct SalesFcstError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl SalesFcstError {
    /// Create a success error (no error).
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    /// Set an error with code and message.
    pub fn set_error(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0; // Null terminator
    }

    /// The message as a Rust string (lossy).
    pub fn message(&self) -> String {
        let bytes: Vec<u8> = self
            .message
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Default for SalesFcstError {
    fn default() -> Self {
        Self::success()
    }
}

/// One month of aggregated sales as delivered by the host's query.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesRow {
    pub year: c_int,
    /// Calendar month, 1-12
    pub month: c_int,
    pub total_sales: c_double,
}

/// Forecast result structure.
///
/// Arrays are allocated with `malloc` and released by
/// `sales_fcst_free_forecast_result`.
#[repr(C)]
pub struct ForecastResult {
    /// Year of each forecast month
    pub years: *mut c_int,
    /// Calendar month of each forecast month
    pub months: *mut c_int,
    /// Predicted sales, rounded to 2 decimals
    pub predicted_sales: *mut c_double,
    /// Number of forecast points
    pub n_forecasts: size_t,
    /// Regression technique label
    pub model_type: [c_char; 32],
    /// Number of historical months used for the fit
    pub training_data_points: size_t,
    /// In-sample Mean Squared Error
    pub mse: c_double,
    /// In-sample Mean Absolute Percentage Error (percent)
    pub mape: c_double,
}

impl Default for ForecastResult {
    fn default() -> Self {
        Self {
            years: std::ptr::null_mut(),
            months: std::ptr::null_mut(),
            predicted_sales: std::ptr::null_mut(),
            n_forecasts: 0,
            model_type: [0; 32],
            training_data_points: 0,
            mse: f64::NAN,
            mape: f64::NAN,
        }
    }
}
