//! Memory allocation utilities for FFI functions.
//!
//! Everything handed to C is allocated with `malloc` so the host can release
//! it through the matching `sales_fcst_free_*` function.

use crate::types::{ErrorCode, SalesFcstError};
use core::ffi::c_char;
use libc::{free, malloc};
use std::ptr;

/// Copy a Rust slice to a newly allocated C array.
///
/// # Safety
/// Returns null on allocation failure or if slice is empty.
pub unsafe fn slice_to_c_array<T: Copy>(slice: &[T]) -> *mut T {
    if slice.is_empty() {
        return ptr::null_mut();
    }

    let ptr = malloc(std::mem::size_of_val(slice)) as *mut T;
    if !ptr.is_null() {
        ptr::copy_nonoverlapping(slice.as_ptr(), ptr, slice.len());
    }
    ptr
}

/// Allocate and copy an array, setting error on failure.
///
/// # Safety
/// out_ptr must be a valid pointer and out_error valid or null.
/// Returns true on success, false on allocation failure.
pub unsafe fn alloc_and_copy_array<T: Copy>(
    items: &[T],
    out_ptr: *mut *mut T,
    out_error: *mut SalesFcstError,
) -> bool {
    if items.is_empty() {
        *out_ptr = ptr::null_mut();
        return true;
    }

    let ptr = slice_to_c_array(items);
    if ptr.is_null() {
        if !out_error.is_null() {
            (*out_error).set_error(ErrorCode::AllocationError, "Memory allocation failed");
        }
        return false;
    }

    *out_ptr = ptr;
    true
}

/// Copy a string into a newly allocated, null-terminated C string.
///
/// # Safety
/// Returns null on allocation failure.
pub unsafe fn string_to_c_string(s: &str) -> *mut c_char {
    let bytes = s.as_bytes();
    let ptr = malloc(bytes.len() + 1) as *mut c_char;
    if ptr.is_null() {
        return ptr;
    }
    ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, ptr, bytes.len());
    *ptr.add(bytes.len()) = 0;
    ptr
}

/// Free a malloc'd array and null the pointer.
///
/// # Safety
/// `*slot` must be null or a pointer obtained from this module.
pub unsafe fn free_and_null<T>(slot: &mut *mut T) {
    if !slot.is_null() {
        free(*slot as *mut libc::c_void);
        *slot = ptr::null_mut();
    }
}
