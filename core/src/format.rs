//! Wire formats and best-effort detection of a stored body's format.
//!
//! Detection tries JSON first, then XML, then looks for a SOAP envelope
//! inside the XML. The order is part of the contract: stored bodies were
//! classified this way when they were saved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::xml::tree;

const SOAP_NAMESPACES: [&str; 2] = [
    "http://schemas.xmlsoap.org/soap/envelope/",
    "http://www.w3.org/2003/05/soap-envelope",
];

/// Encoding of a supplier request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WireFormat {
    #[default]
    Json,
    Xml,
    Soap,
}

impl WireFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            WireFormat::Json => "JSON",
            WireFormat::Xml => "XML",
            WireFormat::Soap => "SOAP",
        }
    }

    /// `Content-Type` header value for a body in this format.
    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
            WireFormat::Soap => "text/xml; charset=utf-8",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(WireFormat::Json),
            "XML" => Ok(WireFormat::Xml),
            "SOAP" => Ok(WireFormat::Soap),
            _ => Err(CodecError::UnknownFormat(s.to_string())),
        }
    }
}

/// Outcome of `detect`. `Unknown` is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detected {
    Json,
    Xml,
    Soap,
    Unknown,
}

impl Detected {
    pub fn format(self) -> Option<WireFormat> {
        match self {
            Detected::Json => Some(WireFormat::Json),
            Detected::Xml => Some(WireFormat::Xml),
            Detected::Soap => Some(WireFormat::Soap),
            Detected::Unknown => None,
        }
    }
}

pub(crate) fn is_soap_namespace(uri: &str) -> bool {
    SOAP_NAMESPACES.contains(&uri)
}

/// Classify `raw` by syntax.
///
/// Any JSON value, scalars included, is `Json`. Markup that fails to parse is
/// `Unknown` rather than `Xml`.
pub fn detect(raw: &str) -> Detected {
    if serde_json::from_str::<serde_json::Value>(raw).is_ok() {
        return Detected::Json;
    }

    let trimmed = raw.trim();
    if !(trimmed.starts_with('<') && trimmed.ends_with('>')) {
        return Detected::Unknown;
    }

    match tree::parse(trimmed) {
        Ok(root)
            if root.local_name() == "Envelope"
                && root.namespace.as_deref().is_some_and(is_soap_namespace) =>
        {
            Detected::Soap
        }
        Ok(_) => Detected::Xml,
        Err(e) => {
            tracing::debug!(error = %e, "markup-shaped body failed to parse");
            Detected::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"a":"1"}"#, Detected::Json)]
    #[case("  {\"a\": [\"1\", \"2\"]}\n", Detected::Json)]
    #[case("42", Detected::Json)]
    #[case("true", Detected::Json)]
    #[case(r#""5""#, Detected::Json)]
    #[case("[]", Detected::Json)]
    #[case("<Foo><a>1</a></Foo>", Detected::Xml)]
    #[case("\n  <Foo/>  \n", Detected::Xml)]
    #[case(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><X/></soap:Body></soap:Envelope>"#,
        Detected::Soap
    )]
    #[case(
        r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"><s:Body/></s:Envelope>"#,
        Detected::Soap
    )]
    #[case(r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope/"/>"#, Detected::Soap)]
    #[case(r#"<soap:Envelope xmlns:soap="urn:not-soap"/>"#, Detected::Xml)]
    #[case("<Envelope/>", Detected::Xml)]
    #[case("<Foo><a>1</b></Foo>", Detected::Unknown)]
    #[case("<Foo>", Detected::Unknown)]
    #[case("not a payload", Detected::Unknown)]
    #[case("", Detected::Unknown)]
    #[case("   ", Detected::Unknown)]
    fn detects(#[case] raw: &str, #[case] expected: Detected) {
        assert_eq!(detect(raw), expected);
    }

    #[test]
    fn wire_format_parses_case_insensitively() {
        assert_eq!("soap".parse::<WireFormat>().unwrap(), WireFormat::Soap);
        assert_eq!(" Xml ".parse::<WireFormat>().unwrap(), WireFormat::Xml);
        assert!(matches!("yaml".parse::<WireFormat>(), Err(CodecError::UnknownFormat(_))));
    }

    #[test]
    fn wire_format_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&WireFormat::Soap).unwrap(), r#""SOAP""#);
        let f: WireFormat = serde_json::from_str(r#""XML""#).unwrap();
        assert_eq!(f, WireFormat::Xml);
    }

    #[test]
    fn unknown_has_no_format() {
        assert_eq!(Detected::Unknown.format(), None);
        assert_eq!(Detected::Soap.format(), Some(WireFormat::Soap));
    }
}
