//! SOAP 1.1 bodies.
//!
//! # Design
//! The payload is serialized exactly like an XML body, only under the
//! operation element instead of `XmlInputConsulta` and without namespace
//! attributes, and the resulting document (declaration included) is placed
//! verbatim inside a fixed envelope. Decoding accepts envelopes in either
//! the SOAP 1.1 or 1.2 namespace.

use crate::entries::KeyValueList;
use crate::error::CodecError;
use crate::format::is_soap_namespace;
use crate::xml::{self, tree, writer, XSD_NS, XSI_NS};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Wrap `fields` under `root_name` inside a SOAP envelope.
///
/// `fields` must not contain the reserved root-name entry; see
/// `RequestBody::from_list` for the flat-list convention.
pub fn encode(root_name: &str, fields: &KeyValueList) -> Result<String, CodecError> {
    if root_name.trim().is_empty() {
        return Err(CodecError::MissingSoapRoot);
    }
    let fragment = writer::write_document(root_name, &[], &fields.to_map())?;
    let envelope = format!(
        r#"
<soap:Envelope xmlns:soap="{SOAP_ENVELOPE_NS}" xmlns:xsd="{XSD_NS}" xmlns:xsi="{XSI_NS}">
  <soap:Header/>
  <soap:Body>
    {fragment}
  </soap:Body>
</soap:Envelope>
"#
    );
    let out = envelope.trim().to_string();
    tracing::trace!(bytes = out.len(), root = root_name, "encoded SOAP body");
    Ok(out)
}

/// Decode an envelope into its operation element name and fields.
pub fn decode(raw: &str) -> Result<(String, KeyValueList), CodecError> {
    let envelope = tree::parse(raw.trim())?;
    if envelope.local_name() != "Envelope" || !envelope.namespace.as_deref().is_some_and(is_soap_namespace) {
        return Err(CodecError::NotSoapEnvelope);
    }
    let body = envelope
        .child_ns("Body", envelope.namespace.as_deref())
        .ok_or(CodecError::MissingSoapBody)?;
    let [operation] = body.children.as_slice() else {
        return Err(CodecError::SoapBodyRoot {
            found: body.children.len(),
        });
    };
    Ok((operation.tag.clone(), xml::fields_of(operation)))
}
