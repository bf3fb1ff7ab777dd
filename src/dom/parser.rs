use crate::dom::DomNode;
use scraper::{ElementRef, Html, Node};
use std::collections::HashMap;

/// Tags whose children should be stripped (invisible/script content)
const SKIP_CHILDREN: &[&str] = &["script", "noscript", "svg"];

/// Parse a server-rendered response fragment into a `DomNode` document.
///
/// Responses from the game's worker endpoints are bare fragments (no
/// `<html>` or `<body>`), so they go through the fragment parser.
pub fn parse_fragment(html: &str) -> DomNode {
    let fragment = Html::parse_fragment(html);
    let root = convert_element(fragment.root_element());
    DomNode::document(root.children)
}

fn convert_element(el: ElementRef<'_>) -> DomNode {
    let tag = el.value().name.local.as_ref().to_string();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    // Skip children of invisible elements
    if SKIP_CHILDREN.contains(&tag.as_str()) {
        return DomNode::element(tag, attributes, Vec::new());
    }

    let mut children = Vec::new();

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    children.push(convert_element(child_el));
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if !s.trim().is_empty() {
                    children.push(DomNode::text(s));
                }
            }
            _ => {}
        }
    }

    DomNode::element(tag, attributes, children)
}
