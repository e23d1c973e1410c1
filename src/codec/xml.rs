//! XML reading into variable trees and indented XML writing.

use std::borrow::Cow;

use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attributes;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::codec::path::{Projection, Slot};
use crate::codec::serialize::scalar_text;

/// Key holding an element's own text when it also has children or attributes.
pub const TEXT_KEY: &str = "_";

/// Failures while reading an XML document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    #[error("Non-whitespace before first tag. Line: {line} Column: {column} Char: {found}")]
    TextBeforeRoot { line: usize, column: usize, found: char },

    #[error("Text data outside of root node. Line: {line} Column: {column} Char: {found}")]
    TextAfterRoot { line: usize, column: usize, found: char },

    #[error("Unexpected element <{0}> after the root element")]
    MultipleRoots(String),

    #[error("Unclosed root tag <{0}>")]
    UnclosedRoot(String),

    #[error("Document has no root element")]
    NoRoot,
}

#[derive(Debug)]
struct Element {
    name: String,
    fields: Map<String, Value>,
    text: String,
    cdata: bool,
}

impl Element {
    fn open(name: &[u8], attributes: Attributes<'_>) -> Result<Self, XmlError> {
        let mut fields = Map::new();
        for attr in attributes {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?.into_owned();
            add_to_parent(&mut fields, key, Value::String(value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(name).into_owned(),
            fields,
            text: String::new(),
            cdata: false,
        })
    }

    fn finish(self) -> (String, Value) {
        let has_text = self.cdata || !self.text.trim().is_empty();
        let value = if self.fields.is_empty() {
            Value::String(if has_text { self.text } else { String::new() })
        } else {
            let mut fields = self.fields;
            if has_text {
                fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Repeated keys collect into an array in document order.
fn add_to_parent(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// 0-based line and 1-based column of the byte at `offset`.
fn locate(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count();
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

/// Offset and value of the first non-whitespace character in `raw`.
fn first_non_whitespace(raw: &[u8]) -> Option<(usize, char)> {
    let raw = String::from_utf8_lossy(raw);
    raw.char_indices().find(|(_, c)| !c.is_whitespace())
}

/// Read an XML document into a tree.
///
/// The root element itself is dropped and its content returned. Child
/// elements become keys, repeated children become arrays, attributes are
/// merged in as plain keys, and a text-only element becomes its string.
pub fn read_tree(input: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(XmlError::MultipleRoots(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
                }
                stack.push(Element::open(e.name().as_ref(), e.attributes())?);
            }
            Event::Empty(e) => {
                if root.is_some() {
                    return Err(XmlError::MultipleRoots(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
                }
                let element = Element::open(e.name().as_ref(), e.attributes())?;
                close(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // End names are checked by the reader
                if let Some(element) = stack.pop() {
                    close(element, &mut stack, &mut root);
                }
            }
            Event::Text(e) => match stack.last_mut() {
                Some(top) => top.text.push_str(&e.unescape().map_err(quick_xml::Error::from)?),
                None => {
                    if let Some((offset, found)) = first_non_whitespace(&e) {
                        let (line, column) = locate(input, position + offset);
                        return Err(if root.is_some() {
                            XmlError::TextAfterRoot { line, column, found }
                        } else {
                            XmlError::TextBeforeRoot { line, column, found }
                        });
                    }
                }
            },
            Event::CData(e) => {
                let text = e.into_inner();
                match stack.last_mut() {
                    Some(top) => {
                        top.text.push_str(&String::from_utf8_lossy(&text));
                        top.cdata = true;
                    }
                    None => {
                        let (line, column) = locate(input, position);
                        return Err(if root.is_some() {
                            XmlError::TextAfterRoot { line, column, found: '<' }
                        } else {
                            XmlError::TextBeforeRoot { line, column, found: '<' }
                        });
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, DOCTYPE
            _ => {}
        }
    }

    if let Some(open) = stack.first() {
        return Err(XmlError::UnclosedRoot(open.name.clone()));
    }
    root.ok_or(XmlError::NoRoot)
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Value>) {
    let (name, value) = element.finish();
    match stack.last_mut() {
        Some(parent) => add_to_parent(&mut parent.fields, name, value),
        None => *root = Some(value),
    }
}

/// Line-oriented XML builder with two-space indentation.
#[derive(Debug, Default)]
pub struct XmlWriter {
    lines: Vec<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw line (declaration, DOCTYPE) at the current depth.
    pub fn raw(&mut self, depth: usize, content: impl AsRef<str>) {
        self.lines.push(format!("{}{}", "  ".repeat(depth), content.as_ref()));
    }

    pub fn open(&mut self, depth: usize, name: &str) {
        self.raw(depth, format!("<{}>", element_name(name)));
    }

    pub fn close(&mut self, depth: usize, name: &str) {
        self.raw(depth, format!("</{}>", element_name(name)));
    }

    pub fn empty(&mut self, depth: usize, name: &str) {
        self.raw(depth, format!("<{}/>", element_name(name)));
    }

    /// `<name>text</name>` on one line, text escaped.
    pub fn text(&mut self, depth: usize, name: &str, text: &str) {
        let name = element_name(name);
        self.raw(depth, format!("<{name}>{}</{name}>", escape_text(text)));
    }

    /// A CDATA section on its own line.
    pub fn cdata(&mut self, depth: usize, text: &str) {
        self.raw(depth, format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>")));
    }

    /// Render a whole projection under `name`.
    pub fn projection(&mut self, depth: usize, name: &str, projection: &Projection) {
        if projection.is_empty() {
            self.empty(depth, name);
            return;
        }
        self.open(depth, name);
        for (key, slot) in projection.entries() {
            match slot {
                Slot::Missing => self.empty(depth + 1, key),
                Slot::Value(value) => self.value(depth + 1, key, value),
                Slot::Branch(child) => self.projection(depth + 1, key, child),
            }
        }
        self.close(depth, name);
    }

    /// Render a tree value. Arrays repeat `name` once per item.
    pub fn value(&mut self, depth: usize, name: &str, value: &Value) {
        match value {
            Value::Null => self.empty(depth, name),
            Value::Object(map) if map.is_empty() => self.empty(depth, name),
            Value::Object(map) => {
                self.open(depth, name);
                for (key, child) in map {
                    self.value(depth + 1, key, child);
                }
                self.close(depth, name);
            }
            Value::Array(items) => {
                for item in items {
                    self.value(depth, name, item);
                }
            }
            scalar => self.text(depth, name, &scalar_text(scalar)),
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Make a field name usable as an element name.
///
/// Characters not allowed in XML names become `_`, and a name that cannot
/// start an element (digit, `-`, `.`, or empty) gets a leading `_`.
pub fn element_name(name: &str) -> Cow<'_, str> {
    let valid_start = |c: char| c.is_alphabetic() || c == '_' || c == ':';
    let valid_rest = |c: char| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.');
    let starts_well = name.chars().next().is_some_and(valid_start);
    if starts_well && name.chars().all(valid_rest) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 1);
    if !starts_well {
        out.push('_');
    }
    out.extend(name.chars().map(|c| if valid_rest(c) { c } else { '_' }));
    Cow::Owned(out)
}

fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#xD;"))
    } else {
        escaped
    }
}
