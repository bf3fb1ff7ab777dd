pub mod parser;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// Parser-independent fragment node.
///
/// Extractors only ever see this tree, never the underlying HTML parser's
/// types, so the extraction rules can be tested against hand-built trees.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

impl DomNode {
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            tag: "#document".into(),
            attributes: HashMap::new(),
            text: String::new(),
            children,
            node_type: NodeType::Document,
        }
    }

    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Concatenated raw text of the subtree, like the DOM's `textContent`.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        self.text_content_inner(&mut buf);
        buf
    }

    fn text_content_inner(&self, buf: &mut String) {
        buf.push_str(&self.text);
        for child in &self.children {
            child.text_content_inner(buf);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Whether the `class` attribute lists `name` as one of its tokens.
    pub fn has_class(&self, name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == name))
            .unwrap_or(false)
    }

    /// First descendant (document order, excluding `self`) matching `pred`.
    pub fn find<P>(&self, pred: P) -> Option<&DomNode>
    where
        P: Fn(&DomNode) -> bool + Copy,
    {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants matching `pred`, in document order.
    pub fn find_all<P>(&self, pred: P) -> Vec<&DomNode>
    where
        P: Fn(&DomNode) -> bool + Copy,
    {
        let mut out = Vec::new();
        self.find_all_inner(pred, &mut out);
        out
    }

    fn find_all_inner<'a, P>(&'a self, pred: P, out: &mut Vec<&'a DomNode>)
    where
        P: Fn(&DomNode) -> bool + Copy,
    {
        for child in &self.children {
            if pred(child) {
                out.push(child);
            }
            child.find_all_inner(pred, out);
        }
    }

    /// First descendant element with the given tag name.
    pub fn first_tag(&self, tag: &str) -> Option<&DomNode> {
        self.find(|n| n.is_element() && n.tag == tag)
    }

    pub fn all_tags(&self, tag: &str) -> Vec<&DomNode> {
        self.find_all(|n| n.is_element() && n.tag == tag)
    }

    /// First descendant element carrying every class in `classes`.
    pub fn first_with_classes(&self, classes: &[&str]) -> Option<&DomNode> {
        self.find(|n| n.is_element() && classes.iter().all(|c| n.has_class(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, class: Option<&str>, children: Vec<DomNode>) -> DomNode {
        let mut attrs = HashMap::new();
        if let Some(c) = class {
            attrs.insert("class".to_string(), c.to_string());
        }
        DomNode::element(tag, attrs, children)
    }

    #[test]
    fn text_content_is_raw_concatenation() {
        let node = el(
            "strong",
            None,
            vec![DomNode::text("2"), el("em", None, vec![DomNode::text("4")])],
        );
        assert_eq!(node.text_content(), "24");
    }

    #[test]
    fn find_walks_in_document_order() {
        let doc = DomNode::document(vec![
            el("div", Some("a"), vec![el("strong", None, vec![DomNode::text("first")])]),
            el("strong", None, vec![DomNode::text("second")]),
        ]);
        let strong = doc.first_tag("strong").unwrap();
        assert_eq!(strong.text_content(), "first");
        assert_eq!(doc.all_tags("strong").len(), 2);
    }

    #[test]
    fn class_tokens_match_exactly() {
        let node = el("div", Some("center sliding"), vec![]);
        assert!(node.has_class("center"));
        assert!(node.has_class("sliding"));
        assert!(!node.has_class("slid"));
    }
}
