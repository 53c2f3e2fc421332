//! MODS XML -> nested key/value tree.
//!
//! Follows the usual XML-to-dictionary convention: attributes are stored under
//! `@name`, character data of an element that also has attributes or children
//! under `#text`, repeated child elements collapse into a [`Node::List`], and
//! an element with nothing in it becomes [`Node::Empty`]. Names are matched on
//! their local part, so `mods:titleInfo` and `titleInfo` are the same key.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ExtractError, Result};

pub const TEXT_KEY: &str = "#text";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Empty,
    Text(String),
    Element(Element),
    List(Vec<Node>),
}

/// Ordered entries of one element: attributes, child elements and `#text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    entries: Vec<(String, Node)>,
}

impl Element {
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.get(&format!("@{}", name)) {
            Some(Node::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self.get(TEXT_KEY) {
            Some(Node::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Child elements in document order (attributes and `#text` excluded).
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.starts_with('@') && k != TEXT_KEY)
            .map(|(k, node)| (k.as_str(), node))
    }

    fn insert(&mut self, key: String, node: Node) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Node::List(items))) => items.push(node),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::Empty);
                *existing = Node::List(vec![first, node]);
            }
            None => self.entries.push((key, node)),
        }
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Child lookup; anything that is not an element has no children.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_element().and_then(|e| e.get(key))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.attr(name))
    }

    /// Whitespace-normalized text of this value.
    ///
    /// An element contributes its `#text`, or failing that the text of its
    /// first non-empty child; a list contributes its non-empty entries joined
    /// with `|`.
    pub fn text_content(&self) -> String {
        match self {
            Node::Empty => String::new(),
            Node::Text(text) => collapse_whitespace(text),
            Node::Element(element) => match element.text() {
                Some(text) => collapse_whitespace(text),
                None => element
                    .children()
                    .map(|(_, child)| child.text_content())
                    .find(|text| !text.is_empty())
                    .unwrap_or_default(),
            },
            Node::List(items) => items
                .iter()
                .map(Node::text_content)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    /// Every non-empty text value below this node, attributes excluded.
    pub fn descendant_texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            Node::Empty => {}
            Node::Text(text) => {
                let text = collapse_whitespace(text);
                if !text.is_empty() {
                    out.push(text);
                }
            }
            Node::Element(element) => {
                if let Some(text) = element.text() {
                    out.push(collapse_whitespace(text));
                }
                for (_, child) in element.children() {
                    child.collect_texts(out);
                }
            }
            Node::List(items) => {
                for item in items {
                    item.collect_texts(out);
                }
            }
        }
    }
}

/// Treat "absent", "one" and "many" uniformly as a sequence.
pub fn as_list(node: Option<&Node>) -> Vec<&Node> {
    match node {
        None => Vec::new(),
        Some(Node::List(items)) => items.iter().collect(),
        Some(node) => vec![node],
    }
}

/// Join the lines of a value with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One open element while walking the event stream.
struct Frame {
    name: String,
    element: Element,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Frame> {
        let name = String::from_utf8_lossy(start.name().local_name().as_ref()).into_owned();
        let mut element = Element::default();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ExtractError::parse(position, e))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| ExtractError::parse(position, e))?
                .trim()
                .to_string();
            element.insert(format!("@{}", key), Node::Text(value));
        }

        Ok(Frame {
            name,
            element,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let text = self.text.trim();
        let mut element = self.element;
        let node = if element.entries.is_empty() {
            if text.is_empty() {
                Node::Empty
            } else {
                Node::Text(text.to_string())
            }
        } else {
            if !text.is_empty() {
                element.insert(TEXT_KEY.to_string(), Node::Text(text.to_string()));
            }
            Node::Element(element)
        };
        (self.name, node)
    }
}

/// Parse a whole document, returning the root element's local name and value.
pub fn parse(xml: &str) -> Result<(String, Node)> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::parse(position, e))?;

        match event {
            Event::Start(ref e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ExtractError::parse(position, "more than one root element"));
                }
                stack.push(Frame::open(e, position)?);
            }
            Event::Empty(ref e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ExtractError::parse(position, "more than one root element"));
                }
                let frame = Frame::open(e, position)?;
                attach(&mut stack, &mut root, frame.close());
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ExtractError::parse(position, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, frame.close());
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|e| ExtractError::parse(position, e))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ExtractError::parse(
                            position,
                            "text outside of the root element",
                        ))
                    }
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ExtractError::parse(
            reader.buffer_position() as u64,
            format!("unclosed element <{}>", open.name),
        ));
    }

    root.ok_or_else(|| ExtractError::parse(0, "document has no root element"))
}

fn attach(stack: &mut [Frame], root: &mut Option<(String, Node)>, (name, node): (String, Node)) {
    match stack.last_mut() {
        Some(parent) => parent.element.insert(name, node),
        None => *root = Some((name, node)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_child_is_string() {
        let (name, root) = parse("<mods><genre>text</genre></mods>").unwrap();
        assert_eq!(name, "mods");
        assert_eq!(root.get("genre"), Some(&Node::Text("text".to_string())));
    }

    #[test]
    fn test_attributes_and_text() {
        let (_, root) =
            parse(r#"<mods><form authority="marcform">print</form></mods>"#).unwrap();
        let form = root.get("form").unwrap();
        assert_eq!(form.attr("authority"), Some("marcform"));
        assert_eq!(form.as_element().unwrap().text(), Some("print"));
        assert_eq!(form.text_content(), "print");
    }

    #[test]
    fn test_repeated_children_become_list() {
        let (_, root) = parse("<mods><name/><name>a</name><name>b</name></mods>").unwrap();
        let names = as_list(root.get("name"));
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], &Node::Empty);
        assert_eq!(root.get("name").unwrap().text_content(), "a|b");
    }

    #[test]
    fn test_singleton_and_absent_as_list() {
        let (_, root) = parse("<mods><name>a</name></mods>").unwrap();
        assert_eq!(as_list(root.get("name")).len(), 1);
        assert!(as_list(root.get("subject")).is_empty());
    }

    #[test]
    fn test_namespace_prefixes_are_dropped() {
        let xml = r#"<mods:mods xmlns:mods="http://www.loc.gov/mods/v3" xmlns:xlink="http://www.w3.org/1999/xlink">
  <mods:titleInfo><mods:title>Prefixed</mods:title></mods:titleInfo>
</mods:mods>"#;
        let (name, root) = parse(xml).unwrap();
        assert_eq!(name, "mods");
        let element = root.as_element().unwrap();
        assert!(element.attr("mods").is_none());
        assert!(element.attr("xlink").is_none());
        assert_eq!(
            root.get("titleInfo").unwrap().get("title"),
            Some(&Node::Text("Prefixed".to_string()))
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        let (_, root) =
            parse("<mods><note>Fish &amp; chips</note><genre><![CDATA[a < b]]></genre></mods>")
                .unwrap();
        assert_eq!(root.get("note").unwrap().text_content(), "Fish & chips");
        assert_eq!(root.get("genre").unwrap().text_content(), "a < b");
    }

    #[test]
    fn test_descendant_texts_skip_attributes() {
        let xml = r#"<mods><h authority="tgn"><country>Canada</country><province/><city>Halifax</city></h></mods>"#;
        let (_, root) = parse(xml).unwrap();
        assert_eq!(
            root.get("h").unwrap().descendant_texts(),
            vec!["Canada".to_string(), "Halifax".to_string()]
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  one\n   two\tthree "), "one two three");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            parse("<mods><title>x</mods>"),
            Err(ExtractError::Parse { .. })
        ));
        assert!(matches!(parse("<mods>"), Err(ExtractError::Parse { .. })));
        assert!(matches!(parse(""), Err(ExtractError::Parse { .. })));
        assert!(matches!(
            parse("<mods/><mods/>"),
            Err(ExtractError::Parse { .. })
        ));
    }
}
