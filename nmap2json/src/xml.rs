use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors that can occur while parsing XML into an [`Element`] tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Input could not be tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Tag, attribute, or text bytes were not valid UTF-8.
    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode an escaped entity.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read the input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in the document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// A parsed XML element: name, attributes, children, accumulated text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Trimmed text content, or `None` when empty.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Parse XML bytes into an [`Element`] tree.
pub fn parse(xml: &[u8]) -> Result<Element, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                open.push(element_from_start(&start, &reader)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start, &reader)?;
                attach(element, &mut open, &mut root)?;
            }
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| {
                    XmlError::Malformed("closing tag without matching open tag".to_string())
                })?;
                attach(element, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(std::str::from_utf8(cdata.as_ref())?);
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return Err(XmlError::Malformed(
            "unclosed element at end of document".to_string(),
        ));
    }
    root.ok_or_else(|| XmlError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`Element`] tree.
pub fn parse_file(path: &Path) -> Result<Element, XmlError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn element_from_start(
    start: &quick_xml::events::BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<Element, XmlError> {
    let mut element = Element {
        name: std::str::from_utf8(start.name().as_ref())?.to_string(),
        ..Element::default()
    };

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
        element.attrs.insert(key, value);
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::{parse, XmlError};

    #[test]
    fn parses_attributes_children_and_text() {
        let root = parse(br#"<run id="1"><host addr="10.0.0.1"><name>gw</name></host></run>"#)
            .expect("parse");
        assert_eq!(root.name, "run");
        assert_eq!(root.attr("id"), Some("1"));

        let host = root.child("host").expect("host child");
        assert_eq!(host.attr("addr"), Some("10.0.0.1"));
        assert_eq!(host.child("name").and_then(|n| n.text()), Some("gw"));
    }

    #[test]
    fn accumulates_cdata_as_text() {
        let root = parse(b"<script><![CDATA[line one]]></script>").expect("parse");
        assert_eq!(root.text(), Some("line one"));
    }

    #[test]
    fn collects_repeated_children_in_order() {
        let root = parse(b"<ports><port id=\"22\"/><port id=\"80\"/></ports>").expect("parse");
        let ids: Vec<&str> = root
            .children_named("port")
            .filter_map(|port| port.attr("id"))
            .collect();
        assert_eq!(ids, ["22", "80"]);
    }

    #[test]
    fn rejects_unbalanced_documents() {
        let err = parse(b"<run><host></run>").expect_err("unbalanced must fail");
        assert!(matches!(err, XmlError::Malformed(_) | XmlError::Xml(_)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse(b"").expect_err("empty must fail");
        assert!(matches!(err, XmlError::Malformed(_)));
    }
}
