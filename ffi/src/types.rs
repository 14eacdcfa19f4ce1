//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! for strings, pointer + length for sequences, explicit discriminants for
//! enums. Arrays handed to C are boxed slices, so they are released with the
//! same length they were created with. Conversions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use supplier_core::{CodecError, Detected, Entry, EntryValue, KeyValueList, WireFormat};

/// Wire format as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiWireFormat {
    Json = 0,
    Xml = 1,
    Soap = 2,
}

impl From<WireFormat> for FfiWireFormat {
    fn from(f: WireFormat) -> Self {
        match f {
            WireFormat::Json => FfiWireFormat::Json,
            WireFormat::Xml => FfiWireFormat::Xml,
            WireFormat::Soap => FfiWireFormat::Soap,
        }
    }
}

impl From<FfiWireFormat> for WireFormat {
    fn from(f: FfiWireFormat) -> Self {
        match f {
            FfiWireFormat::Json => WireFormat::Json,
            FfiWireFormat::Xml => WireFormat::Xml,
            FfiWireFormat::Soap => WireFormat::Soap,
        }
    }
}

/// Detection outcome as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDetected {
    Json = 0,
    Xml = 1,
    Soap = 2,
    Unknown = 3,
}

impl From<Detected> for FfiDetected {
    fn from(d: Detected) -> Self {
        match d {
            Detected::Json => FfiDetected::Json,
            Detected::Xml => FfiDetected::Xml,
            Detected::Soap => FfiDetected::Soap,
            Detected::Unknown => FfiDetected::Unknown,
        }
    }
}

/// Error codes carried by every result.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// The stored body is JSON/XML/SOAP but does not decode.
    MalformedBody = 1,
    /// SOAP submit without a usable `SOAPRootName` entry.
    MissingSoapRoot = 2,
    /// A key cannot be an XML element name.
    InvalidName = 3,
    InvalidUtf8 = 4,
    NullArg = 5,
    Panic = 6,
    /// A sequence is longer than a `u32` length field can describe.
    TooLarge = 7,
}

impl From<&CodecError> for FfiErrorCode {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::MissingSoapRoot | CodecError::DuplicateSoapRoot => FfiErrorCode::MissingSoapRoot,
            CodecError::InvalidElementName(_) => FfiErrorCode::InvalidName,
            _ => FfiErrorCode::MalformedBody,
        }
    }
}

/// One decoded entry. `values` holds a single string unless `is_list`.
#[repr(C)]
pub struct FfiEntry {
    pub id: *mut c_char,
    pub key: *mut c_char,
    pub values: *mut *mut c_char,
    pub values_len: u32,
    pub is_list: bool,
}

/// One entry supplied by the caller for submission. The FFI layer reads but
/// never frees these fields.
#[repr(C)]
pub struct FfiEntryInput {
    pub key: *const c_char,
    pub values: *const *const c_char,
    pub values_len: u32,
    pub is_list: bool,
}

/// Result of `codec_load_for_editing`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `entries`
/// holds `entries_len` items (null when empty). On failure `entries` is null.
#[repr(C)]
pub struct FfiLoadResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub format: FfiWireFormat,
    pub entries: *mut FfiEntry,
    pub entries_len: u32,
}

/// Result of `codec_prepare_for_submit`. `body` is null on failure.
#[repr(C)]
pub struct FfiSubmitResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub body: *mut c_char,
}

/// Copy `s` into a C string owned by the caller. Interior NULs are dropped.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', "")).unwrap_or_default().into_raw()
}

/// Length of a sequence as the `u32` carried in C structs.
pub(crate) fn c_len(len: usize) -> Result<u32, FfiErrorCode> {
    u32::try_from(len).map_err(|_| FfiErrorCode::TooLarge)
}

/// Hand a vector to C as pointer + length. Empty vectors become null.
pub(crate) fn into_raw_slice<T>(items: Vec<T>) -> Result<(*mut T, u32), FfiErrorCode> {
    let len = c_len(items.len())?;
    if len == 0 {
        return Ok((std::ptr::null_mut(), 0));
    }
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    Ok((ptr, len))
}

/// Every length `FfiLoadResult::ok` will hand out must fit before anything
/// is allocated, so a failure never leaves half-built entries behind.
fn check_lengths(list: &KeyValueList) -> Result<(), FfiErrorCode> {
    c_len(list.len())?;
    for entry in list {
        if let EntryValue::List(items) = &entry.value {
            c_len(items.len())?;
        }
    }
    Ok(())
}

/// Reclaim a slice produced by `into_raw_slice`.
///
/// # Safety
/// `ptr` and `len` must come from one `into_raw_slice` call, not yet freed.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Box<[T]> {
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)) }
}

impl FfiEntry {
    fn from_core(entry: Entry) -> Result<Self, FfiErrorCode> {
        let (strings, is_list) = match entry.value {
            EntryValue::Text(s) => (vec![s], false),
            EntryValue::List(items) => (items, true),
        };
        let raw: Vec<*mut c_char> = strings.iter().map(|s| to_c_string(s)).collect();
        let (values, values_len) = into_raw_slice(raw)?;
        Ok(FfiEntry {
            id: to_c_string(&entry.id.to_string()),
            key: to_c_string(&entry.key),
            values,
            values_len,
            is_list,
        })
    }

    /// Free every string this entry owns.
    ///
    /// # Safety
    /// The entry must have been built by `from_core` and not freed before.
    pub(crate) unsafe fn free_fields(&self) {
        for s in [self.id, self.key] {
            if !s.is_null() {
                drop(unsafe { CString::from_raw(s) });
            }
        }
        if !self.values.is_null() {
            for &v in unsafe { from_raw_slice(self.values, self.values_len) }.iter() {
                if !v.is_null() {
                    drop(unsafe { CString::from_raw(v) });
                }
            }
        }
    }
}

/// Read caller-supplied entries into a core list.
///
/// # Safety
/// `entries` must point to `len` valid `FfiEntryInput` values whose string
/// pointers are null or NUL-terminated.
pub(crate) unsafe fn list_from_inputs(entries: *const FfiEntryInput, len: u32) -> Result<KeyValueList, FfiErrorCode> {
    if len == 0 {
        return Ok(KeyValueList::new());
    }
    if entries.is_null() {
        return Err(FfiErrorCode::NullArg);
    }
    let inputs = unsafe { std::slice::from_raw_parts(entries, len as usize) };
    let mut list = KeyValueList::new();
    for input in inputs {
        let key = unsafe { read_str(input.key) }?;
        let mut values = Vec::with_capacity(input.values_len as usize);
        if input.values_len > 0 {
            if input.values.is_null() {
                return Err(FfiErrorCode::NullArg);
            }
            for &v in unsafe { std::slice::from_raw_parts(input.values, input.values_len as usize) } {
                values.push(unsafe { read_str(v) }?);
            }
        }
        let value = if input.is_list {
            EntryValue::List(values)
        } else {
            EntryValue::Text(values.into_iter().next().unwrap_or_default())
        };
        list.push(key, value);
    }
    Ok(list)
}

/// # Safety
/// `s` must be null or a NUL-terminated string.
pub(crate) unsafe fn read_str(s: *const c_char) -> Result<String, FfiErrorCode> {
    if s.is_null() {
        return Err(FfiErrorCode::NullArg);
    }
    unsafe { CStr::from_ptr(s) }
        .to_str()
        .map(str::to_string)
        .map_err(|_| FfiErrorCode::InvalidUtf8)
}

impl FfiLoadResult {
    pub(crate) fn ok(format: WireFormat, list: KeyValueList) -> *mut Self {
        if let Err(code) = check_lengths(&list) {
            return Self::error(code, "too many entries or values for a u32 length");
        }
        let built = list
            .into_iter()
            .map(FfiEntry::from_core)
            .collect::<Result<Vec<_>, _>>()
            .and_then(into_raw_slice);
        let (entries, entries_len) = match built {
            Ok(slice) => slice,
            Err(code) => return Self::error(code, "too many entries or values for a u32 length"),
        };
        Box::into_raw(Box::new(FfiLoadResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            format: format.into(),
            entries,
            entries_len,
        }))
    }

    pub(crate) fn error(code: FfiErrorCode, message: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiLoadResult {
            error_code: code,
            error_message: to_c_string(message),
            format: FfiWireFormat::Json,
            entries: std::ptr::null_mut(),
            entries_len: 0,
        }))
    }
}

impl FfiSubmitResult {
    pub(crate) fn ok(body: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiSubmitResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            body: to_c_string(body),
        }))
    }

    pub(crate) fn error(code: FfiErrorCode, message: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiSubmitResult {
            error_code: code,
            error_message: to_c_string(message),
            body: std::ptr::null_mut(),
        }))
    }
}
