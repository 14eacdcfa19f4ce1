//! Supplier configuration core: request-body codec and administration API client.
//!
//! # Overview
//! A supplier is a third-party HTTP endpoint whose request body is stored as
//! a single string in JSON, XML or SOAP. The editing form works on an ordered
//! key/value list instead. This crate converts between the two:
//! `codec::load_for_editing` classifies and decodes a stored body, and
//! `codec::prepare_for_submit` encodes the edited list in the chosen format.
//!
//! # Design
//! - Everything is synchronous and pure; no call keeps state or does I/O.
//! - `RequestBody` is the typed form, with the SOAP operation name as a real
//!   field. The flat list with a reserved `SOAPRootName` entry only exists at
//!   the form boundary.
//! - Products reuse the same key/value list for their standard response and
//!   link suppliers by id; `ProductDraft` prices the selection.
//! - `SupplierClient` follows the host-does-IO pattern: `build_*` produces an
//!   `HttpRequest`, the caller executes it, `parse_*` reads the response.

pub mod body;
pub mod client;
pub mod codec;
pub mod draft;
pub mod entries;
pub mod error;
pub mod format;
pub mod http;
pub mod json;
pub mod soap;
pub mod types;
pub mod xml;

pub use body::{RequestBody, SoapBody, SOAP_ROOT_KEY};
pub use client::SupplierClient;
pub use codec::{load_for_editing, prepare_for_submit};
pub use draft::{ProductDraft, SupplierDraft};
pub use entries::{Entry, EntryValue, KeyValueList};
pub use error::{ApiError, CodecError, FieldError, ValidationError};
pub use format::{detect, Detected, WireFormat};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Product, ProductInput, ProductPage, Supplier, SupplierInput, SupplierMethod, SupplierPage};
