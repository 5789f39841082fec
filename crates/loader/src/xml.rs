//! XML document → [`Element`] tree.

use crate::error::LoadError;
use crate::tree::Element;

/// Parse an XML document into an element tree rooted at the document
/// element.
///
/// Comments and processing instructions are dropped. An element's text is
/// the concatenation of its direct text and CDATA children.
pub fn parse_document(text: &str) -> Result<Element, LoadError> {
    let doc = roxmltree::Document::parse(text).map_err(|e| LoadError::Xml(e.to_string()))?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    element.attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    for child in node.children() {
        if child.is_element() {
            element.children.push(convert(child));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.text.push_str(text);
            }
        }
    }
    element
}
