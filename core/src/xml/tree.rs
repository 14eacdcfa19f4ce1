//! Minimal XML element tree.
//!
//! Parses a whole document into `Element` values with `quick-xml`. Only what
//! the codec needs is kept: qualified tag, resolved namespace, attributes,
//! child elements and the concatenated text. Whitespace-only text is dropped
//! from elements that have children, so indentation between tags never
//! reaches a value. On a leaf it is the value and is kept. An XML
//! declaration is accepted anywhere, since SOAP bodies embed the declaration
//! of their inner fragment.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::CodecError;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A parsed element. Attributes (including `xmlns` declarations) are kept
/// apart from children and never mistaken for fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    /// Tag without its namespace prefix.
    pub fn local_name(&self) -> &str {
        split_name(&self.tag).1
    }

    pub fn prefix(&self) -> Option<&str> {
        split_name(&self.tag).0
    }

    /// First child with the given local name and namespace.
    pub fn child_ns(&self, local_name: &str, namespace: Option<&str>) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.local_name() == local_name && c.namespace.as_deref() == namespace)
    }

    /// Text content, or the empty string for elements without text.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// An element under construction plus the namespace bindings it declares.
struct Frame {
    element: Element,
    bindings: Vec<(Option<String>, String)>,
}

/// Parse `input` into its root element.
///
/// Fails on malformed markup, mismatched or unclosed tags, more than one root,
/// non-whitespace text outside the root, and documents with no element.
pub fn parse(input: &str) -> Result<Element, CodecError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let frame = open_element(e, &stack, root.is_some())?;
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                let frame = open_element(e, &stack, root.is_some())?;
                close_element(frame.element, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| CodecError::xml("closing tag without an open element"))?;
                close_element(frame.element, &mut stack, &mut root);
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| CodecError::xml(format!("bad text at position {}: {e}", reader.buffer_position())))?;
                if stack.is_empty() && text.trim().is_empty() {
                    continue;
                }
                append_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CodecError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(CodecError::xml(format!("unclosed element <{}>", open.element.tag)));
    }
    root.ok_or_else(|| CodecError::xml("document has no root element"))
}

fn open_element(e: &BytesStart<'_>, stack: &[Frame], has_root: bool) -> Result<Frame, CodecError> {
    let tag = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| CodecError::xml(format!("tag is not UTF-8: {e}")))?
        .to_string();
    if stack.is_empty() && has_root {
        return Err(CodecError::xml(format!("second root element <{tag}>")));
    }

    let mut attributes = IndexMap::new();
    let mut bindings = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| CodecError::xml(format!("bad attribute on <{tag}>: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| CodecError::xml(format!("attribute name is not UTF-8: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| CodecError::xml(format!("bad attribute value on <{tag}>: {e}")))?
            .into_owned();
        if key == "xmlns" {
            bindings.push((None, value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            bindings.push((Some(prefix.to_string()), value.clone()));
        }
        attributes.insert(key, value);
    }

    let prefix = split_name(&tag).0;
    let namespace = resolve(prefix, &bindings, stack);
    if let (Some(p), None) = (prefix, &namespace) {
        return Err(CodecError::xml(format!("unbound namespace prefix '{p}' on <{tag}>")));
    }

    Ok(Frame {
        element: Element {
            tag,
            namespace,
            attributes,
            children: Vec::new(),
            text: None,
        },
        bindings,
    })
}

/// Look `prefix` up in the element's own declarations, then outward.
fn resolve(prefix: Option<&str>, own: &[(Option<String>, String)], stack: &[Frame]) -> Option<String> {
    if prefix == Some("xml") {
        return Some(XML_NS.to_string());
    }
    let scopes = std::iter::once(own).chain(stack.iter().rev().map(|f| f.bindings.as_slice()));
    for scope in scopes {
        if let Some((_, uri)) = scope.iter().find(|(p, _)| p.as_deref() == prefix) {
            // xmlns="" undeclares the default namespace
            return (!uri.is_empty()).then(|| uri.clone());
        }
    }
    None
}

fn close_element(mut element: Element, stack: &mut [Frame], root: &mut Option<Element>) {
    if !element.children.is_empty() && element.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        element.text = None;
    }
    match stack.last_mut() {
        Some(parent) => parent.element.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<(), CodecError> {
    let top = stack
        .last_mut()
        .ok_or_else(|| CodecError::xml("text outside the root element"))?;
    top.element.text.get_or_insert_with(String::new).push_str(text);
    Ok(())
}
