//! Load and submit entry points used by the supplier form.
//!
//! # Design
//! The form only ever holds a flat `KeyValueList` and a selected format.
//! On load the stored string is classified and decoded; on submit the list
//! is encoded in the format the operator picked, which may differ from the
//! one the body was stored in.

use crate::body::RequestBody;
use crate::entries::KeyValueList;
use crate::error::CodecError;
use crate::format::{detect, WireFormat};

/// Decode `raw` as `format` into the flat editor form.
pub fn decode(format: WireFormat, raw: &str) -> Result<KeyValueList, CodecError> {
    RequestBody::decode(format, raw).map(RequestBody::into_list)
}

/// Encode the flat editor form as `format`.
pub fn encode(format: WireFormat, list: &KeyValueList) -> Result<String, CodecError> {
    RequestBody::from_list(format, list.clone())?.encode()
}

/// Detect the format of a stored body and decode it for editing.
///
/// An unrecognized body (the empty string included) starts the editor empty,
/// in `fallback` or JSON when none is given. Malformed XML or SOAP under a
/// recognized format is an error; no partial list is returned.
pub fn load_for_editing(
    stored: &str,
    fallback: Option<WireFormat>,
) -> Result<(WireFormat, KeyValueList), CodecError> {
    let detected = detect(stored);
    tracing::debug!(?detected, bytes = stored.len(), "loading stored body");

    let Some(format) = detected.format() else {
        if !stored.trim().is_empty() {
            tracing::warn!("stored body is in no known format, starting empty");
        }
        return Ok((fallback.unwrap_or_default(), KeyValueList::new()));
    };
    let list = decode(format, stored)?;
    Ok((format, list))
}

/// Encode the edited list for submission in the operator's chosen format.
///
/// For SOAP the `SOAPRootName` entry is taken out of the list and names the
/// element inside the envelope body; without it nothing is produced.
pub fn prepare_for_submit(format: WireFormat, list: &KeyValueList) -> Result<String, CodecError> {
    tracing::debug!(%format, entries = list.len(), "encoding body for submit");
    encode(format, list)
}

/// Like `load_for_editing`, returning the typed body instead of the flat
/// form. `None` when the stored body is in no known format.
pub fn load_typed(stored: &str) -> Result<Option<RequestBody>, CodecError> {
    detect(stored)
        .format()
        .map(|format| RequestBody::decode(format, stored))
        .transpose()
}
