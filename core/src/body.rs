//! Typed request body: what the operator configured, per format.
//!
//! # Design
//! SOAP needs one value the other formats do not, the name of the element
//! inside `soap:Body`. `RequestBody::Soap` carries it as a field. The flat
//! editor form, where the name rides along as a reserved `SOAPRootName`
//! entry, exists only at the UI boundary: `from_list` and `into_list`
//! convert between the two.

use crate::entries::{Entry, KeyValueList};
use crate::error::CodecError;
use crate::format::WireFormat;
use crate::{json, soap, xml};

/// Reserved key holding the SOAP operation element in the flat list form.
pub const SOAP_ROOT_KEY: &str = "SOAPRootName";

/// Fields of a SOAP body plus the element they are nested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBody {
    pub root_name: String,
    pub fields: KeyValueList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(KeyValueList),
    Xml(KeyValueList),
    Soap(SoapBody),
}

impl RequestBody {
    pub fn format(&self) -> WireFormat {
        match self {
            RequestBody::Json(_) => WireFormat::Json,
            RequestBody::Xml(_) => WireFormat::Xml,
            RequestBody::Soap(_) => WireFormat::Soap,
        }
    }

    /// Payload fields, without the SOAP root name.
    pub fn fields(&self) -> &KeyValueList {
        match self {
            RequestBody::Json(fields) | RequestBody::Xml(fields) => fields,
            RequestBody::Soap(body) => &body.fields,
        }
    }

    /// Build from the flat editor form.
    ///
    /// For SOAP the `SOAPRootName` entry is removed from the list and becomes
    /// the root name. It must be present exactly once and non-empty. For JSON
    /// and XML the list is taken as is.
    pub fn from_list(format: WireFormat, mut list: KeyValueList) -> Result<Self, CodecError> {
        match format {
            WireFormat::Json => Ok(RequestBody::Json(list)),
            WireFormat::Xml => Ok(RequestBody::Xml(list)),
            WireFormat::Soap => {
                let mut markers = list.take_key(SOAP_ROOT_KEY);
                if markers.len() > 1 {
                    return Err(CodecError::DuplicateSoapRoot);
                }
                let root_name = markers
                    .pop()
                    .map(|entry| entry.value.to_text())
                    .filter(|name| !name.trim().is_empty())
                    .ok_or(CodecError::MissingSoapRoot)?;
                Ok(RequestBody::Soap(SoapBody {
                    root_name: root_name.trim().to_string(),
                    fields: list,
                }))
            }
        }
    }

    /// Flatten into the editor form. SOAP bodies gain a leading
    /// `SOAPRootName` entry.
    pub fn into_list(self) -> KeyValueList {
        match self {
            RequestBody::Json(fields) | RequestBody::Xml(fields) => fields,
            RequestBody::Soap(SoapBody { root_name, mut fields }) => {
                fields.insert_front(Entry::new(SOAP_ROOT_KEY, root_name));
                fields
            }
        }
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        match self {
            RequestBody::Json(fields) => json::encode(fields),
            RequestBody::Xml(fields) => xml::encode(fields),
            RequestBody::Soap(body) => soap::encode(&body.root_name, &body.fields),
        }
    }

    pub fn decode(format: WireFormat, raw: &str) -> Result<Self, CodecError> {
        match format {
            WireFormat::Json => json::decode(raw).map(RequestBody::Json),
            WireFormat::Xml => xml::decode(raw).map(RequestBody::Xml),
            WireFormat::Soap => {
                let (root_name, fields) = soap::decode(raw)?;
                Ok(RequestBody::Soap(SoapBody { root_name, fields }))
            }
        }
    }
}
