//! Plain XML bodies, rooted at `XmlInputConsulta`.
//!
//! The root carries the XML Schema namespace declarations that supplier
//! endpoints expect. Each field is a direct child element of the root.

pub mod tree;
pub mod writer;

use indexmap::IndexMap;

use crate::entries::{EntryValue, KeyValueList};
use crate::error::CodecError;
use tree::Element;

/// Root element of every XML body.
pub const XML_ROOT: &str = "XmlInputConsulta";

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Encode `list` as an `XmlInputConsulta` document.
pub fn encode(list: &KeyValueList) -> Result<String, CodecError> {
    let out = writer::write_document(XML_ROOT, &[("xmlns:xsd", XSD_NS), ("xmlns:xsi", XSI_NS)], &list.to_map())?;
    tracing::trace!(bytes = out.len(), "encoded XML body");
    Ok(out)
}

/// Decode an XML body: one entry per distinct child tag of the root.
pub fn decode(raw: &str) -> Result<KeyValueList, CodecError> {
    let root = tree::parse(raw.trim())?;
    Ok(fields_of(&root))
}

/// Entries for the direct children of `parent`.
///
/// Repeated tags fold into one `List` entry at the position of their first
/// occurrence; a tag seen once becomes `Text`.
pub(crate) fn fields_of(parent: &Element) -> KeyValueList {
    let mut grouped: IndexMap<&str, Vec<String>> = IndexMap::new();
    for child in &parent.children {
        grouped
            .entry(child.tag.as_str())
            .or_default()
            .push(child.text_or_empty().to_string());
    }
    grouped
        .into_iter()
        .map(|(tag, mut texts)| {
            let value = if texts.len() == 1 {
                EntryValue::Text(texts.remove(0))
            } else {
                EntryValue::List(texts)
            };
            (tag, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_namespaced_root() {
        let list: KeyValueList = [("placa", "ABC1234")].into_iter().collect();
        assert_eq!(
            encode(&list).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8"?><XmlInputConsulta xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><placa>ABC1234</placa></XmlInputConsulta>"#
        );
    }

    #[test]
    fn empty_list_still_declares_namespaces() {
        assert_eq!(
            encode(&KeyValueList::new()).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8"?><XmlInputConsulta xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"/>"#
        );
    }

    #[test]
    fn decode_skips_root_attributes() {
        let raw = r#"<?xml version="1.0" encoding="UTF-8"?><XmlInputConsulta xmlns:xsd="x" xmlns:xsi="y"><placa>ABC1234</placa></XmlInputConsulta>"#;
        let list = decode(raw).unwrap();
        assert_eq!(list.pairs(), vec![("placa".to_string(), EntryValue::from("ABC1234"))]);
    }

    #[test]
    fn decode_accepts_any_root_name() {
        let list = decode("<Foo><a>1</a><b/></Foo>").unwrap();
        assert_eq!(
            list.pairs(),
            vec![("a".to_string(), EntryValue::from("1")), ("b".to_string(), EntryValue::from(""))]
        );
    }

    #[test]
    fn repeated_tags_fold_into_a_list() {
        let list = decode("<R><k>x</k><other>o</other><k>y</k></R>").unwrap();
        assert_eq!(
            list.pairs(),
            vec![
                ("k".to_string(), EntryValue::List(vec!["x".into(), "y".into()])),
                ("other".to_string(), EntryValue::from("o")),
            ]
        );
    }

    #[test]
    fn round_trip_keeps_order() {
        let list: KeyValueList = [("z", "1"), ("a", "2"), ("m", "3 < 4 & \"q\"")].into_iter().collect();
        let back = decode(&encode(&list).unwrap()).unwrap();
        assert_eq!(back.pairs(), list.pairs());
    }

    #[test]
    fn malformed_document_fails() {
        let err = decode("<XmlInputConsulta><a>1</XmlInputConsulta>").unwrap_err();
        assert!(matches!(err, CodecError::Xml { .. }));
    }
}
