//! Error types for the payload codec and the administration API client.
//!
//! # Design
//! `CodecError` covers everything that can go wrong turning a body string
//! into entries or back. None of its variants are fatal: the editing UI shows
//! the message and keeps the list as it was. `ApiError` is the client-side
//! error and wraps `CodecError` because building a create/update request runs
//! the encoder.

use thiserror::Error;

/// Errors raised while detecting, decoding or encoding a request body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The stored body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    Json(String),

    /// The stored body is not well-formed XML.
    #[error("invalid XML body: {message}")]
    Xml { message: String },

    /// The document root is not a SOAP `Envelope`.
    #[error("document root is not a SOAP Envelope")]
    NotSoapEnvelope,

    /// The envelope has no `Body` element.
    #[error("SOAP envelope has no Body element")]
    MissingSoapBody,

    /// The SOAP body must contain exactly one element.
    #[error("SOAP Body must contain exactly one element, found {found}")]
    SoapBodyRoot { found: usize },

    /// Encoding as SOAP without the reserved root-name entry.
    #[error("missing 'SOAPRootName': add an entry naming the element inside the SOAP body")]
    MissingSoapRoot,

    /// More than one reserved root-name entry in the list.
    #[error("'SOAPRootName' must appear only once")]
    DuplicateSoapRoot,

    /// A key (or the SOAP root name) cannot be used as an XML element name.
    #[error("'{0}' is not a valid XML element name")]
    InvalidElementName(String),

    /// Text that does not name a wire format.
    #[error("unknown wire format: {0}")]
    UnknownFormat(String),
}

impl CodecError {
    pub(crate) fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }
}

/// A single rule broken by a supplier or product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All rules broken by one form, reported together.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid input: {}", summarize(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by `SupplierClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the record does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The supplier or product input failed validation before any request was built.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
