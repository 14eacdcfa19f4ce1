//! Builder-style serialization of a flat field map.
//!
//! Output is compact: declaration, root, one element per field, no
//! indentation. Text is escaped for `&`, `<` and `>` only, so quotes survive
//! unchanged in element content.

use indexmap::IndexMap;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::entries::EntryValue;
use crate::error::CodecError;

/// Serialize `fields` as a standalone document rooted at `root`.
///
/// `root_attributes` are written on the root start tag in the given order.
/// A root with nothing to render is self-closing.
pub fn write_document(
    root: &str,
    root_attributes: &[(&str, &str)],
    fields: &IndexMap<String, EntryValue>,
) -> Result<String, CodecError> {
    check_name(root)?;
    for key in fields.keys() {
        check_name(key)?;
    }

    let mut writer = Writer::new(Vec::new());
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new(root);
    for &attr in root_attributes {
        start.push_attribute(attr);
    }

    let renders_nothing = fields.values().all(|v| matches!(v, EntryValue::List(items) if items.is_empty()));
    if renders_nothing {
        write(&mut writer, Event::Empty(start))?;
    } else {
        write(&mut writer, Event::Start(start))?;
        for (key, value) in fields {
            match value {
                EntryValue::Text(text) => write_field(&mut writer, key, text)?,
                EntryValue::List(items) => {
                    for item in items {
                        write_field(&mut writer, key, item)?;
                    }
                }
            }
        }
        write(&mut writer, Event::End(BytesEnd::new(root)))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| CodecError::xml(format!("output is not UTF-8: {e}")))
}

fn write_field(writer: &mut Writer<Vec<u8>>, key: &str, text: &str) -> Result<(), CodecError> {
    if text.is_empty() {
        return write(writer, Event::Empty(BytesStart::new(key)));
    }
    write(writer, Event::Start(BytesStart::new(key)))?;
    write(writer, Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    write(writer, Event::End(BytesEnd::new(key)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), CodecError> {
    writer
        .write_event(event)
        .map_err(|e| CodecError::xml(format!("write error: {e}")))
}

/// Prefixes every encoded document declares or that XML binds implicitly.
/// Both the `XmlInputConsulta` root and the SOAP envelope declare `xsd` and
/// `xsi`.
pub const BOUND_PREFIXES: [&str; 3] = ["xsd", "xsi", "xml"];

/// Reject names that would produce malformed markup, including names whose
/// prefix nothing in the written document binds.
pub fn check_name(name: &str) -> Result<(), CodecError> {
    if is_element_name(name) {
        Ok(())
    } else {
        Err(CodecError::InvalidElementName(name.to_string()))
    }
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        && match name.split_once(':') {
            None => true,
            Some((prefix, local)) => !local.is_empty() && !local.contains(':') && BOUND_PREFIXES.contains(&prefix),
        }
}
