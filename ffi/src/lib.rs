//! C-ABI wrapper around the `supplier-core` payload codec.
//!
//! # Overview
//! Lets an editing UI written in any language with a C FFI detect a stored
//! body's format, load it as key/value entries, and encode edited entries for
//! submission, without linking serde or quick-xml itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Results are heap-allocated envelopes with an `FfiErrorCode` and a
//!   human-readable message; the caller frees them with the matching
//!   `codec_free_*` function.
//! - Input strings are borrowed for the duration of the call only.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use supplier_core::{codec, detect, WireFormat};

use types::*;

// ---------------------------------------------------------------------------
// Detection and loading
// ---------------------------------------------------------------------------

/// Classify a stored body. Null or non-UTF-8 input is `Unknown`.
#[unsafe(no_mangle)]
pub extern "C" fn codec_detect_format(body: *const c_char) -> FfiDetected {
    catch_unwind(|| match unsafe { read_str(body) } {
        Ok(body) => detect(&body).into(),
        Err(_) => FfiDetected::Unknown,
    })
    .unwrap_or(FfiDetected::Unknown)
}

/// Detect and decode a stored body for editing.
///
/// An unrecognized body loads as an empty list in `fallback`. The caller must
/// free the result with `codec_free_load_result`.
#[unsafe(no_mangle)]
pub extern "C" fn codec_load_for_editing(body: *const c_char, fallback: FfiWireFormat) -> *mut FfiLoadResult {
    catch_unwind(|| {
        let body = match unsafe { read_str(body) } {
            Ok(b) => b,
            Err(code) => return FfiLoadResult::error(code, "body must be a non-null UTF-8 string"),
        };
        match codec::load_for_editing(&body, Some(WireFormat::from(fallback))) {
            Ok((format, list)) => FfiLoadResult::ok(format, list),
            Err(e) => FfiLoadResult::error(FfiErrorCode::from(&e), &e.to_string()),
        }
    })
    .unwrap_or_else(|_| FfiLoadResult::error(FfiErrorCode::Panic, "panic in codec_load_for_editing"))
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Encode `entries_len` entries in `format`.
///
/// For SOAP one entry must be keyed `SOAPRootName`. The caller must free the
/// result with `codec_free_submit_result`.
#[unsafe(no_mangle)]
pub extern "C" fn codec_prepare_for_submit(
    format: FfiWireFormat,
    entries: *const FfiEntryInput,
    entries_len: u32,
) -> *mut FfiSubmitResult {
    catch_unwind(|| {
        let list = match unsafe { list_from_inputs(entries, entries_len) } {
            Ok(list) => list,
            Err(code) => return FfiSubmitResult::error(code, "entries contain a null or non-UTF-8 string"),
        };
        match codec::prepare_for_submit(format.into(), &list) {
            Ok(body) => FfiSubmitResult::ok(&body),
            Err(e) => FfiSubmitResult::error(FfiErrorCode::from(&e), &e.to_string()),
        }
    })
    .unwrap_or_else(|_| FfiSubmitResult::error(FfiErrorCode::Panic, "panic in codec_prepare_for_submit"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiLoadResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn codec_free_load_result(result: *mut FfiLoadResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.entries.is_null() {
            let entries = unsafe { from_raw_slice(result.entries, result.entries_len) };
            for entry in entries.iter() {
                unsafe { entry.free_fields() };
            }
        }
    });
}

/// Free an `FfiSubmitResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn codec_free_submit_result(result: *mut FfiSubmitResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        for s in [result.error_message, result.body] {
            if !s.is_null() {
                drop(unsafe { CString::from_raw(s) });
            }
        }
    });
}
