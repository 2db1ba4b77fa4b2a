//! Standardized error handling utilities for FFI functions.
//!
//! Every exported function reports failures through a `SalesFcstError`
//! out-parameter. Failures are logged here, once, at the outermost boundary.

use crate::types::{ErrorCode, SalesFcstError};
use sales_fcst_core::ForecastError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Initialize error output to success state.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn init_error(out_error: *mut SalesFcstError) {
    if !out_error.is_null() {
        *out_error = SalesFcstError::success();
    }
}

/// Set an error on the output error pointer.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn set_error(out_error: *mut SalesFcstError, code: ErrorCode, message: &str) {
    if !out_error.is_null() {
        (*out_error).set_error(code, message);
    }
}

/// Check if any of the given pointers are null, and set an error if so.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn check_null_pointers(
    out_error: *mut SalesFcstError,
    ptrs: &[*const core::ffi::c_void],
) -> bool {
    for ptr in ptrs {
        if ptr.is_null() {
            tracing::error!("null pointer argument");
            set_error(out_error, ErrorCode::NullPointer, "Null pointer argument");
            return true;
        }
    }
    false
}

/// Execute an FFI operation with standardized error handling.
///
/// This function handles:
/// - Initializing the error output to success
/// - Catching panics
/// - Logging the failure and mapping it to an error code
///
/// # Safety
/// The error pointer must be valid if non-null.
///
/// # Returns
/// `Some(value)` on success, `None` on error
pub unsafe fn ffi_try<F, T>(operation: &str, out_error: *mut SalesFcstError, f: F) -> Option<T>
where
    F: FnOnce() -> Result<T, ForecastError>,
{
    init_error(out_error);

    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            let code = ErrorCode::from(&e);
            tracing::error!(operation, ?code, error = %e, "request failed");
            set_error(out_error, code, &e.to_string());
            None
        }
        Err(_) => {
            tracing::error!(operation, "panic caught at FFI boundary");
            set_error(out_error, ErrorCode::PanicCaught, "Panic in Rust code");
            None
        }
    }
}
