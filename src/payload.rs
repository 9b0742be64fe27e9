//! XML document exchanged by the settings conversion endpoint.
//!
//! A converted response carries two ordered children under the root:
//!
//! ```xml
//! <response><cc-view-path>/views/dev</cc-view-path><rel-path>eprom/tools</rel-path></response>
//! ```
//!
//! A failed conversion carries a single `error` child with the message.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

pub const ROOT_ELEMENT: &str = "response";
pub const ERROR_ELEMENT: &str = "error";
pub const VIEW_PATH_ELEMENT: &str = "cc-view-path";
pub const REL_PATH_ELEMENT: &str = "rel-path";

/// Decoded conversion response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResponse {
    Converted { view_path: String, rel_path: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// No body, or a body that is not an XML document
    #[error("server response is null")]
    Null,
    /// Well-formed XML that does not have the expected children
    #[error("malformed server response: {0}")]
    Malformed(String),
}

/// Encode a response document
pub fn encode(response: &ConversionResponse) -> String {
    let children = match response {
        ConversionResponse::Converted {
            view_path,
            rel_path,
        } => format!(
            "{}{}",
            element(VIEW_PATH_ELEMENT, view_path),
            element(REL_PATH_ELEMENT, rel_path)
        ),
        ConversionResponse::Error { message } => element(ERROR_ELEMENT, message),
    };

    document(&children)
}

/// Response document with no children, sent when the request carried
/// nothing to convert.
pub fn empty_document() -> String {
    document("")
}

fn document(children: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><{root}>{children}</{root}>",
        root = ROOT_ELEMENT
    )
}

fn element(name: &str, text: &str) -> String {
    format!("<{name}>{}</{name}>", escape(text))
}

/// Child element of the root with its accumulated text content
#[derive(Debug, Default)]
struct Child {
    name: String,
    text: String,
}

/// Decode a response body.
///
/// Children of the root are read by position: the first element child is
/// either `error` or the converted view path, its next element sibling is the
/// relative path. Whitespace between the children is ignored; any other text
/// directly under the root makes the response malformed.
pub fn decode(body: Option<&str>) -> Result<ConversionResponse, PayloadError> {
    let body = match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Err(PayloadError::Null),
    };

    let mut children = read_root_children(body)?.into_iter();

    let first = children
        .next()
        .ok_or_else(|| PayloadError::Malformed("root element has no children".to_string()))?;

    if first.name == ERROR_ELEMENT {
        return Ok(ConversionResponse::Error {
            message: first.text,
        });
    }

    let second = children.next().ok_or_else(|| {
        PayloadError::Malformed(format!(
            "expected two children under the root, found only '{}'",
            first.name
        ))
    })?;

    Ok(ConversionResponse::Converted {
        view_path: first.text,
        rel_path: second.text,
    })
}

/// Collect at most the first two element children of the document root
fn read_root_children(body: &str) -> Result<Vec<Child>, PayloadError> {
    let mut reader = Reader::from_str(body);
    let mut children: Vec<Child> = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            tracing::debug!("Unparseable response body: {}", e);
            PayloadError::Null
        })?;

        match event {
            Event::Start(start) => {
                if depth == 0 {
                    if seen_root {
                        return Err(PayloadError::Null);
                    }
                    seen_root = true;
                } else if depth == 1 {
                    children.push(Child {
                        name: element_name(start.name().as_ref()),
                        text: String::new(),
                    });
                }
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    if seen_root {
                        return Err(PayloadError::Null);
                    }
                    seen_root = true;
                } else if depth == 1 {
                    children.push(Child {
                        name: element_name(empty.name().as_ref()),
                        text: String::new(),
                    });
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) if depth >= 2 => {
                let text = text.unescape().map_err(|_| PayloadError::Null)?;
                if let Some(child) = children.last_mut() {
                    child.text.push_str(&text);
                }
            }
            Event::CData(cdata) if depth >= 2 => {
                if let Some(child) = children.last_mut() {
                    child.text.push_str(&String::from_utf8_lossy(&cdata));
                }
            }
            Event::Text(text) if depth == 1 => {
                if !String::from_utf8_lossy(&text).trim().is_empty() {
                    return Err(PayloadError::Malformed(
                        "text content directly under the root".to_string(),
                    ));
                }
            }
            Event::CData(cdata) if depth == 1 && !cdata.is_empty() => {
                return Err(PayloadError::Malformed(
                    "text content directly under the root".to_string(),
                ));
            }
            Event::Text(text) if depth == 0 => {
                // stray text outside the root makes the document unparseable
                if !String::from_utf8_lossy(&text).trim().is_empty() {
                    return Err(PayloadError::Null);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root || depth != 0 {
        return Err(PayloadError::Null);
    }

    children.truncate(2);
    Ok(children)
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
