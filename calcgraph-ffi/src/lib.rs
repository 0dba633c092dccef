//! C interface to the expression engine, for user interfaces that are not
//! written in Rust.
//!
//! Every pointer returned by this library must be given back to the matching
//! `*_free` function.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use calcgraph_core::{sample_function, Domain};

#[repr(C)]
pub struct FloatResult {
    val: f64,
    success: bool,
}

impl FloatResult {
    fn failure() -> Self {
        FloatResult {
            val: f64::NAN,
            success: false,
        }
    }
}

/// The points of a graph. `ys` holds NaN where the function is not defined.
#[repr(C)]
pub struct SampleBuffer {
    xs: *mut f64,
    ys: *mut f64,
    len: usize,
}

unsafe fn read_expr<'a>(expr: *const c_char) -> Option<&'a str> {
    if expr.is_null() {
        return None;
    }
    CStr::from_ptr(expr).to_str().ok()
}

fn into_raw_slice(v: Vec<f64>) -> *mut f64 {
    Box::into_raw(v.into_boxed_slice()) as *mut f64
}

/// Evaluates an expression. `x` is only bound when `has_x` is true.
///
/// # Safety
///
/// `expr` must be NULL or point to a NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn calcgraph_eval(expr: *const c_char, x: f64, has_x: bool) -> FloatResult {
    let expr = match read_expr(expr) {
        Some(val) => val,
        None => return FloatResult::failure(),
    };

    let result = if has_x {
        calcgraph_core::evaluate_text_at(expr, x)
    } else {
        calcgraph_core::evaluate_text(expr)
    };
    match result {
        Ok(val) => FloatResult { val, success: true },
        Err(err) => {
            tracing::debug!(expression = expr, error = %err, "evaluation failed");
            FloatResult::failure()
        }
    }
}

/// Returns the postfix form of an expression, or NULL if it is malformed.
///
/// # Safety
///
/// `expr` must be NULL or point to a NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn calcgraph_postfix(expr: *const c_char) -> *mut c_char {
    let expr = match read_expr(expr) {
        Some(val) => val,
        None => return ptr::null_mut(),
    };

    // the postfix text only has characters of the grammar, so no NUL
    calcgraph_core::to_postfix_text(expr)
        .ok()
        .and_then(|s| CString::new(s).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

/// # Safety
///
/// `s` must be NULL or a string returned by `calcgraph_postfix`.
#[no_mangle]
pub unsafe extern "C" fn calcgraph_string_free(s: *mut c_char) {
    if !s.is_null() {
        // let the compiler drop the string
        let _ = CString::from_raw(s);
    }
}

/// Samples an expression of `x` at `count` points from `start` to `end`.
/// Returns NULL if the expression is malformed.
///
/// # Safety
///
/// `expr` must be NULL or point to a NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn calcgraph_sample(
    expr: *const c_char,
    start: f64,
    end: f64,
    count: usize,
) -> *mut SampleBuffer {
    let expr = match read_expr(expr) {
        Some(val) => val,
        None => return ptr::null_mut(),
    };

    let series = match sample_function(expr, Domain::new(start, end), count) {
        Ok(val) => val,
        Err(err) => {
            tracing::debug!(expression = expr, error = %err, "sampling failed");
            return ptr::null_mut();
        }
    };

    let buffer = SampleBuffer {
        xs: into_raw_slice(series.xs().collect()),
        ys: into_raw_slice(series.ys().collect()),
        len: series.len(),
    };
    Box::into_raw(Box::new(buffer))
}

/// # Safety
///
/// `buffer` must be NULL or a value returned by `calcgraph_sample`.
#[no_mangle]
pub unsafe extern "C" fn calcgraph_sample_free(buffer: *mut SampleBuffer) {
    if buffer.is_null() {
        return;
    }

    let buffer = Box::from_raw(buffer);
    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buffer.xs, buffer.len)));
    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buffer.ys, buffer.len)));
}
