//! SOAP envelope parsing and normalization.
//!
//! Uses quick-xml which is safe against XXE by default (doesn't expand
//! entities). The raw event stream is folded into a [`Subtree`], then the
//! Envelope/Header/Body skeleton is located by local name so that any
//! namespace prefix (`soap:`, `soapenv:`, `env:`, none) normalizes to the
//! same shape.

use crate::error::SoapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// SOAP 1.1 envelope namespace URI.
pub const SOAP_11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A parsed XML subtree: either text content or ordered child elements.
///
/// Child keys keep the qualified name as written in the document; document
/// order is preserved because operation resolution depends on it.
/// Attributes are not retained.
#[derive(Debug, Clone, PartialEq)]
pub enum Subtree {
    Text(String),
    Elements(Vec<(String, Subtree)>),
}

impl Subtree {
    /// Text content, if this subtree is a leaf.
    pub fn text(&self) -> Option<&str> {
        match self {
            Subtree::Text(t) => Some(t),
            Subtree::Elements(_) => None,
        }
    }

    /// Child entries in document order. Leaves have no children.
    pub fn children(&self) -> &[(String, Subtree)] {
        match self {
            Subtree::Text(_) => &[],
            Subtree::Elements(children) => children,
        }
    }

    /// First child stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Subtree> {
        self.children()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// First child whose key matches `local` after prefix stripping,
    /// preferring an exact match.
    pub fn get_local(&self, local: &str) -> Option<&Subtree> {
        self.get(local).or_else(|| {
            self.children()
                .iter()
                .find(|(k, _)| local_name(k) == local)
                .map(|(_, v)| v)
        })
    }

    /// Text content of the child named `local`, prefix-tolerant.
    pub fn child_text(&self, local: &str) -> Option<&str> {
        self.get_local(local).and_then(|v| v.text())
    }
}

/// A request envelope reduced to its dispatchable parts.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEnvelope {
    /// Header subtree, absent when the envelope carries none.
    pub header: Option<Subtree>,
    /// Body subtree. Its child keys are the operation candidates.
    pub body: Subtree,
}

/// Strip any namespace prefix from a qualified name.
///
/// Splits on the first `:` and takes the remainder; names without a prefix
/// pass through unchanged.
pub fn local_name(qualified: &str) -> &str {
    match qualified.split_once(':') {
        Some((_, rest)) => rest,
        None => qualified,
    }
}

/// Parse raw bytes into a normalized SOAP envelope.
pub fn parse_envelope(data: &[u8]) -> Result<NormalizedEnvelope, SoapError> {
    let (root_name, root) = parse_xml_tree(data)?;
    normalize_envelope(&root_name, root)
}

/// Parse raw bytes into the document's root element name and subtree.
pub fn parse_xml_tree(data: &[u8]) -> Result<(String, Subtree), SoapError> {
    let xml = std::str::from_utf8(data)
        .map_err(|e| SoapError::MalformedXml(format!("Invalid UTF-8: {e}")))?;

    check_doctype(xml)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Stack of open elements; an End event folds the top frame into its
    // parent, or into `root` when the stack empties.
    struct Frame {
        name: String,
        children: Vec<(String, Subtree)>,
        text: String,
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Subtree)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(SoapError::MalformedXml(
                        "multiple root elements".to_string(),
                    ));
                }
                stack.push(Frame {
                    name: qualified_name(e.name().as_ref()),
                    children: Vec::new(),
                    text: String::new(),
                });
            }

            Ok(Event::Empty(ref e)) => {
                let name = qualified_name(e.name().as_ref());
                match stack.last_mut() {
                    Some(parent) => {
                        parent.children.push((name, Subtree::Text(String::new())))
                    }
                    None => {
                        if root.is_some() {
                            return Err(SoapError::MalformedXml(
                                "multiple root elements".to_string(),
                            ));
                        }
                        root = Some((name, Subtree::Text(String::new())));
                    }
                }
            }

            Ok(Event::Text(ref e)) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| SoapError::MalformedXml(err.to_string()))?;
                    frame.text.push_str(&text);
                }
            }

            Ok(Event::CData(ref e)) => {
                if let Some(frame) = stack.last_mut() {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|err| SoapError::MalformedXml(err.to_string()))?;
                    frame.text.push_str(text);
                }
            }

            Ok(Event::End(_)) => {
                let frame = match stack.pop() {
                    Some(frame) => frame,
                    None => {
                        return Err(SoapError::MalformedXml(
                            "unexpected closing tag".to_string(),
                        ))
                    }
                };
                let subtree = if frame.children.is_empty() {
                    Subtree::Text(frame.text)
                } else {
                    Subtree::Elements(frame.children)
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push((frame.name, subtree)),
                    None => root = Some((frame.name, subtree)),
                }
            }

            Ok(Event::Eof) => break,

            Err(e) => {
                return Err(SoapError::MalformedXml(format!("XML parse error: {e}")));
            }

            // Declarations, comments and processing instructions carry no
            // dispatchable content.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SoapError::MalformedXml("unclosed element".to_string()));
    }

    root.ok_or_else(|| SoapError::MalformedXml("no root element".to_string()))
}

/// Locate Envelope/Header/Body by local name in an already-parsed tree.
pub fn normalize_envelope(
    root_name: &str,
    root: Subtree,
) -> Result<NormalizedEnvelope, SoapError> {
    if local_name(root_name) != "Envelope" {
        return Err(SoapError::NoEnvelope);
    }

    let children = match root {
        Subtree::Elements(children) => children,
        Subtree::Text(_) => return Err(SoapError::NoBody),
    };

    let mut header = None;
    let mut body = None;
    for (key, subtree) in children {
        match local_name(&key) {
            "Header" if header.is_none() => header = Some(subtree),
            "Body" if body.is_none() => body = Some(subtree),
            _ => {}
        }
    }

    let body = body.ok_or(SoapError::NoBody)?;
    Ok(NormalizedEnvelope { header, body })
}

/// Reject DOCTYPE and entity declarations before parsing.
fn check_doctype(xml: &str) -> Result<(), SoapError> {
    if xml.contains("<!DOCTYPE") || xml.contains("<!doctype") {
        return Err(SoapError::MalformedXml(
            "DOCTYPE declarations are not allowed".to_string(),
        ));
    }
    if xml.contains("<!ENTITY") || xml.contains("<!entity") {
        return Err(SoapError::MalformedXml(
            "Entity declarations are not allowed".to_string(),
        ));
    }
    Ok(())
}

fn qualified_name(raw: &[u8]) -> String {
    std::str::from_utf8(raw).unwrap_or_default().to_string()
}
