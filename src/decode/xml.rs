//! XML to JSON conversion
//!
//! Walks quick-xml's event stream and builds the tree directly:
//!
//! - the document becomes `{root_name: value}`
//! - an element with neither attributes nor children becomes its trimmed
//!   text, or `null` when there is none
//! - attributes become `"@name"` keys, ahead of the children
//! - repeated sibling tags are collected into an array
//! - text next to attributes or children is stored under `"#text"`
//!
//! Every value is a string; nothing is coerced to numbers or booleans.
//!
//! quick-xml is a lenient tokenizer, so the well-formedness rules it leaves
//! out are enforced here: names must match the XML `Name` production, the
//! XML declaration may only open the document, only XML `Char`s may appear,
//! comments may not contain `--`, `]]>` may not appear in text, and
//! namespace prefixes must be bound.
//!
//! Entities declared in an internal DOCTYPE subset are expanded when their
//! replacement text is plain character data. A declaration whose value
//! contains markup or further references is rejected, and a reference to an
//! external entity is an unknown entity.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Prefix put in front of attribute names
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key holding an element's text when it also has attributes or children
pub const TEXT_KEY: &str = "#text";

const ENTITY_DECL: &str = "<!ENTITY";

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    prefixes: Vec<String>,
    attributes: JsonObject,
    children: JsonObject,
    text: String,
}

impl OpenElement {
    fn open(start: &BytesStart<'_>, entities: &Entities, stack: &[OpenElement]) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();
        check_name(&name)?;

        let mut prefixes = Vec::new();
        let mut attributes = JsonObject::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::xml(format!("in <{name}>: {e}")))?;
            let key = utf8(attr.key.as_ref())?;
            check_name(key)?;
            if attr.value.contains(&b'<') {
                return Err(Error::xml(format!("'<' in value of attribute {key} on <{name}>")));
            }

            let value = attr
                .unescape_value_with(|entity| entities.resolve(entity))
                .map_err(|e| Error::xml(format!("in <{name}>: {e}")))?;
            check_chars(&value)?;

            if let Some(prefix) = key.strip_prefix("xmlns:") {
                prefixes.push(prefix.to_string());
            }
            attributes.insert(
                format!("{ATTRIBUTE_PREFIX}{key}"),
                JsonValue::String(value.into_owned()),
            );
        }

        let element = Self {
            name,
            prefixes,
            attributes,
            children: JsonObject::new(),
            text: String::new(),
        };

        element.check_prefix(&element.name, stack)?;
        for key in element.attributes.keys() {
            let key = &key[ATTRIBUTE_PREFIX.len()..];
            if key != "xmlns" && !key.starts_with("xmlns:") {
                element.check_prefix(key, stack)?;
            }
        }
        Ok(element)
    }

    /// Qualified names need a prefix declared here or on an ancestor
    fn check_prefix(&self, qname: &str, stack: &[OpenElement]) -> Result<()> {
        let Some((prefix, local)) = qname.split_once(':') else {
            return Ok(());
        };
        if prefix.is_empty() || local.is_empty() || local.contains(':') {
            return Err(Error::xml(format!("malformed qualified name {qname}")));
        }

        let bound = prefix == "xml"
            || self.prefixes.iter().any(|p| p == prefix)
            || stack
                .iter()
                .any(|open| open.prefixes.iter().any(|p| p == prefix));
        if bound {
            Ok(())
        } else {
            Err(Error::xml(format!("unbound prefix in {qname}")))
        }
    }

    fn add_child(&mut self, name: String, value: JsonValue) {
        match self.children.get_mut(&name) {
            Some(JsonValue::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = JsonValue::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, JsonValue) {
        let text = self.text.trim();

        if self.attributes.is_empty() && self.children.is_empty() {
            let value = if text.is_empty() {
                JsonValue::Null
            } else {
                JsonValue::String(text.to_string())
            };
            return (self.name, value);
        }

        let mut object = self.attributes;
        object.extend(self.children);
        if !text.is_empty() {
            object.insert(TEXT_KEY.to_string(), JsonValue::String(text.to_string()));
        }
        (self.name, JsonValue::Object(object))
    }
}

/// General entities declared in the internal DOCTYPE subset
#[derive(Debug, Default)]
struct Entities {
    declared: HashMap<String, String>,
}

impl Entities {
    fn from_doctype(doctype: &str) -> Result<Self> {
        let mut entities = Self::default();
        let Some(open) = doctype.find('[') else {
            return Ok(entities);
        };

        let mut rest = &doctype[open + 1..];
        while let Some(pos) = rest.find(ENTITY_DECL) {
            rest = rest[pos + ENTITY_DECL.len()..].trim_start();

            // Parameter entities only matter to validating parsers
            if rest.starts_with('%') {
                rest = skip_declaration(rest);
                continue;
            }

            let name_end = rest
                .find(char::is_whitespace)
                .ok_or_else(|| Error::xml("truncated ENTITY declaration"))?;
            let name = &rest[..name_end];
            check_name(name)?;
            rest = rest[name_end..].trim_start();

            let Some(quote) = rest.chars().next().filter(|&c| matches!(c, '"' | '\'')) else {
                // External entity: declared, but never resolved
                rest = skip_declaration(rest);
                continue;
            };
            let close = rest[1..]
                .find(quote)
                .ok_or_else(|| Error::xml(format!("unterminated value for entity {name}")))?;
            let value = &rest[1..=close];
            if value.contains(|c| matches!(c, '<' | '&' | '%')) {
                return Err(Error::xml(format!(
                    "entity {name} has markup or references in its value"
                )));
            }

            // The first declaration of an entity is binding
            entities
                .declared
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
            rest = skip_declaration(&rest[close + 2..]);
        }

        Ok(entities)
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        match name {
            "lt" => Some("<"),
            "gt" => Some(">"),
            "amp" => Some("&"),
            "apos" => Some("'"),
            "quot" => Some("\""),
            _ => self.declared.get(name).map(String::as_str),
        }
    }
}

fn skip_declaration(rest: &str) -> &str {
    rest.find('>').map_or("", |end| &rest[end + 1..])
}

/// Convert an XML document into a JSON tree
pub fn xml_to_json(xml: &str) -> Result<JsonValue> {
    let xml = xml.strip_prefix('\u{FEFF}').unwrap_or(xml);
    check_chars(xml)?;

    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, JsonValue)> = None;
    let mut entities = Entities::default();
    let mut seen_doctype = false;
    let mut first_event = true;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::xml(format!("at byte {}: {e}", reader.buffer_position())))?;
        let at_start = std::mem::replace(&mut first_event, false);

        match event {
            Event::Decl(_) if !at_start => {
                return Err(Error::xml(
                    "XML declaration is only allowed at the start of the document",
                ));
            }
            Event::Decl(_) => {}
            Event::DocType(doctype) => {
                if seen_doctype || !stack.is_empty() || root.is_some() {
                    return Err(Error::xml("DOCTYPE must come once, before the root element"));
                }
                seen_doctype = true;
                entities = Entities::from_doctype(utf8(&doctype)?)?;
            }
            Event::Start(start) => {
                ensure_single_root(&stack, root.as_ref())?;
                let element = OpenElement::open(&start, &entities, &stack)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                ensure_single_root(&stack, root.as_ref())?;
                let element = OpenElement::open(&start, &entities, &stack)?;
                attach(element.close(), &mut stack, &mut root);
            }
            Event::End(end) => {
                check_name(utf8(end.name().as_ref())?)?;
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml("closing tag without an open element"))?;
                attach(element.close(), &mut stack, &mut root);
            }
            Event::Text(text) => {
                if utf8(&text)?.contains("]]>") {
                    return Err(Error::xml("']]>' is not allowed in character data"));
                }
                let text = text
                    .unescape_with(|entity| entities.resolve(entity))
                    .map_err(|e| Error::xml(e.to_string()))?;
                check_chars(&text)?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                push_text(&mut stack, utf8(&cdata)?)?;
            }
            Event::Comment(comment) => {
                let comment = utf8(&comment)?;
                if comment.contains("--") || comment.ends_with('-') {
                    return Err(Error::xml("'--' is not allowed inside a comment"));
                }
            }
            Event::PI(pi) => {
                let target = utf8(&pi)?
                    .split(char::is_whitespace)
                    .next()
                    .unwrap_or_default();
                check_name(target)?;
                if target.eq_ignore_ascii_case("xml") {
                    return Err(Error::xml("reserved processing instruction target"));
                }
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::xml(format!("unclosed element <{}>", open.name)));
    }

    let (name, value) = root.ok_or_else(|| Error::xml("document has no root element"))?;
    let mut document = JsonObject::new();
    document.insert(name, value);
    Ok(JsonValue::Object(document))
}

fn ensure_single_root(stack: &[OpenElement], root: Option<&(String, JsonValue)>) -> Result<()> {
    match (stack.is_empty(), root) {
        (true, Some((name, _))) => Err(Error::xml(format!(
            "second root element after <{name}>"
        ))),
        _ => Ok(()),
    }
}

fn attach(
    (name, value): (String, JsonValue),
    stack: &mut [OpenElement],
    root: &mut Option<(String, JsonValue)>,
) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::xml("text outside of the root element")),
    }
}

fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char);
    if valid {
        Ok(())
    } else {
        Err(Error::xml(format!("invalid name '{name}'")))
    }
}

fn check_chars(text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(Error::xml(format!(
            "character U+{:04X} is not allowed",
            u32::from(c)
        ))),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::xml(format!("invalid UTF-8: {e}")))
}
