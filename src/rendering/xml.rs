//! A small owned XML tree, built up while walking a Document and then
//! written out in one go.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Element {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Element {
        self.set_attribute(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Element {
        let text = text.into();
        if !text.is_empty() {
            self.children
                .push(Node::Text(text));
        }
        self
    }

    pub fn with_child(mut self, child: Element) -> Element {
        self.push(child);
        self
    }

    /// Set an attribute, replacing any earlier value under the same name.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(k, _)| k == key)
        {
            Some((_, existing)) => *existing = value,
            None => self
                .attributes
                .push((key.to_string(), value)),
        }
    }

    pub fn push(&mut self, child: Element) {
        self.children
            .push(Node::Element(child));
    }

    pub fn push_comment(&mut self, text: &str) {
        self.children
            .push(Node::Comment(text.to_string()));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// The most recently added child, if it is an element.
    pub fn last_child_mut(&mut self) -> Option<&mut Element> {
        match self
            .children
            .last_mut()
        {
            Some(Node::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text directly inside this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First descendant with the given name, depth first.
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in self.children() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut result = Vec::new();
        self.collect(name, &mut result);
        result
    }

    fn collect<'a>(&'a self, name: &str, result: &mut Vec<&'a Element>) {
        for child in self.children() {
            if child.name == name {
                result.push(child);
            }
            child.collect(name, result);
        }
    }
}

/// Serialize a tree, with an XML declaration and two space indentation.
pub fn serialize(root: &Element) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element
        .children
        .is_empty()
    {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::Comment(text) => {
                let text = comment_safe(text);
                writer.write_event(Event::Comment(BytesText::from_escaped(text)))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}

// "--" may not appear inside a comment, nor may one end with "-"
fn comment_safe(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '-' && result.ends_with('-') {
            result.push(' ');
        }
        result.push(c);
    }
    if result.ends_with('-') {
        result.push(' ');
    }
    result
}
