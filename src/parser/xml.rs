//! Árbol XML mínimo, sin espacios de nombres, construido a partir de los
//! eventos de `quick_xml`. Sólo cubre lo que necesitan los fragmentos de
//! pasos y de fuente de datos: elementos, atributos y texto.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::MarkupError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Hijos directos que son elementos, en orden de documento
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Descendientes con el nombre dado, en preorden. El propio elemento no se incluye.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_named(name, found);
        }
    }

    /// Texto concatenado de todos los descendientes
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.append_text(&mut text);
        text
    }

    fn append_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.append_text(out),
            }
        }
    }
}

/// Elemento raíz del documento y sus descendientes con el nombre dado.
/// La raíz cuenta si coincide, igual que en una búsqueda sobre el documento.
pub fn elements_named<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    if root.name == name {
        found.push(root);
    }
    found.extend(root.descendants_named(name));
    found
}

pub fn parse_document(xml: &str) -> Result<Element, MarkupError> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| MarkupError::Xml {
            position: reader.buffer_position(),
            source,
        })?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&root, &open)?;
                open.push(start_element(&start, reader.buffer_position())?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &open)?;
                let element = start_element(&start, reader.buffer_position())?;
                close(element, &mut open, &mut root);
            }
            Event::End(_) => match open.pop() {
                Some(element) => close(element, &mut open, &mut root),
                None => return Err(MarkupError::MissingRoot),
            },
            Event::Text(text) => {
                let text = text.unescape().map_err(|source| MarkupError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                check_chars(&text, reader.buffer_position())?;
                push_text(&mut open, text.into_owned())?;
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                check_chars(&text, reader.buffer_position())?;
                push_text(&mut open, text)?;
            }
            Event::Eof => break,
            // Comentarios, declaraciones, instrucciones de proceso y DOCTYPE
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(MarkupError::Unclosed(unclosed.name.clone()));
    }
    root.ok_or(MarkupError::MissingRoot)
}

fn start_element(start: &BytesStart, position: usize) -> Result<Element, MarkupError> {
    let xml_error = |source| MarkupError::Xml { position, source };

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(e.into()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        check_chars(&value, position)?;
        attributes.push((key, value));
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        children: Vec::new(),
    })
}

// Producción `Char` de XML 1.0; `char` ya excluye los sustitutos
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn check_chars(text: &str, position: usize) -> Result<(), MarkupError> {
    if text.chars().all(is_xml_char) {
        Ok(())
    } else {
        Err(MarkupError::InvalidChar { position })
    }
}

fn ensure_single_root(root: &Option<Element>, open: &[Element]) -> Result<(), MarkupError> {
    match root {
        Some(existing) if open.is_empty() => {
            Err(MarkupError::ContentOutsideRoot(format!("<{}>", existing.name)))
        }
        _ => Ok(()),
    }
}

fn close(element: Element, open: &mut [Element], root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(open: &mut [Element], text: String) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MarkupError::ContentOutsideRoot(text.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_tree_with_attributes_and_text() {
        let root = parse_document(r#"<a x="1"><b>uno</b><b y="&amp;">dos<c/></b></a>"#).unwrap();

        assert_eq!(root.name, "a");
        assert_eq!(root.attribute("x"), Some("1"));
        let bs = root.descendants_named("b");
        assert_eq!(bs.len(), 2);
        assert_eq!(bs[1].attribute("y"), Some("&"));
        assert_eq!(root.text_content(), "unodos");
    }

    #[test]
    fn cdata_counts_as_text() {
        let root = parse_document("<a><![CDATA[<b>x</b>]]></a>").unwrap();
        assert_eq!(root.text_content(), "<b>x</b>");
        assert!(root.descendants_named("b").is_empty());
    }

    #[test]
    fn declaration_and_comments_are_ignored() {
        let root = parse_document("<?xml version=\"1.0\"?>\n<!-- c --><a><!-- d -->t</a>\n").unwrap();
        assert_eq!(root.text_content(), "t");
    }

    #[test]
    fn unclosed_element_is_an_error() {
        let err = parse_document(r#"<steps><step id="1">"#).unwrap_err();
        assert!(matches!(err, MarkupError::Unclosed(name) if name == "step"));
    }

    #[test]
    fn mismatched_end_tag_is_an_error() {
        let err = parse_document("<a><b></a>").unwrap_err();
        assert!(matches!(err, MarkupError::Xml { .. }));
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(parse_document("  "), Err(MarkupError::MissingRoot)));
    }

    #[test]
    fn text_after_root_is_rejected() {
        let err = parse_document("<a/>trailing").unwrap_err();
        assert!(matches!(err, MarkupError::ContentOutsideRoot(_)));
    }

    #[test]
    fn control_char_in_text_is_rejected() {
        let err = parse_document("<a>x\u{1}y</a>").unwrap_err();
        assert!(matches!(err, MarkupError::InvalidChar { .. }));
    }

    #[test]
    fn control_char_in_attribute_is_rejected() {
        let err = parse_document("<a b=\"\u{8}\"/>").unwrap_err();
        assert!(matches!(err, MarkupError::InvalidChar { .. }));
    }

    #[test]
    fn tabs_line_breaks_and_astral_chars_are_allowed() {
        let root = parse_document("<a b=\"\t\">uno\r\ndos 😀</a>").unwrap();
        assert_eq!(root.text_content(), "uno\r\ndos 😀");
    }

    #[test]
    fn second_root_is_rejected() {
        let err = parse_document("<a/><b/>").unwrap_err();
        assert!(matches!(err, MarkupError::ContentOutsideRoot(_)));
    }
}
