//! CDP-style DOM node structure for selection to Markdown conversion.
//!
//! The converter never sees a live document. Callers hand it a detached copy
//! of the selection built from this structure, either by hand, from a CDP
//! `DOM.Node` payload, or through [`crate::parse_html`].

use std::collections::VecDeque;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// A DOM node following the CDP DOM.Node structure.
///
/// Children are owned exclusively by their parent; a tree is never shared
/// between conversions.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Text content for text nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(flat_attrs),
            children: Some(Vec::new()),
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document fragment node, the usual root of a cloned selection
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Builder-style variant of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder-style variant of [`Node::add_child`] for several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Iterate the whitespace-separated entries of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check if the `class` attribute contains `class_name`
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().any(|c| c == class_name)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let attrs = self.attributes.get_or_insert_with(Vec::new);

        let mut i = 0;
        while i + 1 < attrs.len() {
            if attrs[i].eq_ignore_ascii_case(name) {
                attrs[i + 1] = value.to_string();
                return;
            }
            i += 2;
        }
        attrs.push(name.to_string());
        attrs.push(value.to_string());
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self.children().map(|child| child.text_content()).collect(),
        }
    }

    /// Find the nearest element in this subtree (the node itself included)
    /// matching `pred`, breadth-first so shallower matches win.
    pub fn find_descendant<F>(&self, pred: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            if node.is_element() && pred(node) {
                return Some(node);
            }
            queue.extend(node.children());
        }
        None
    }

    /// Collect the outermost descendant elements matching `pred`, in document
    /// order. Matches are not searched for nested matches.
    pub fn find_descendants<F>(&self, pred: F) -> Vec<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        fn walk<'a, F: Fn(&Node) -> bool>(node: &'a Node, pred: &F, out: &mut Vec<&'a Node>) {
            for child in node.element_children() {
                if pred(child) {
                    out.push(child);
                } else {
                    walk(child, pred, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &pred, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("div");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert_eq!(node.node_name, "DIV");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs("a", vec![("href", "https://example.com"), ("title", "Example")]);
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("TITLE"), Some("Example"));
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_set_attr_overwrites() {
        let mut node = Node::element("div");
        node.set_attr("role", "group");
        node.set_attr("Role", "list");
        assert_eq!(node.attr("role"), Some("list"));
        assert_eq!(node.attributes.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_classes() {
        let node = Node::element_with_attrs("div", vec![("class", "form-check  pl-radio")]);
        assert!(node.has_class("form-check"));
        assert!(node.has_class("pl-radio"));
        assert!(!node.has_class("form"));
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::text("World"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let div = Node::element("div")
            .with_child(Node::text("Hello "))
            .with_child(Node::comment("ignored"))
            .with_child(Node::element("span").with_child(Node::text("World")));

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_find_descendant_prefers_shallow_match() {
        let deep = Node::element("span")
            .with_child(Node::element_with_attrs("mjx-math", vec![("data-latex", "deep")]));
        let root = Node::element("div")
            .with_child(deep)
            .with_child(Node::element_with_attrs("mjx-math", vec![("data-latex", "shallow")]));

        let found = root.find_descendant(|n| n.has_attr("data-latex"));
        assert_eq!(found.and_then(|n| n.attr("data-latex")), Some("shallow"));
    }

    #[test]
    fn test_find_descendants_stops_at_match() {
        let row = |label: &str| {
            Node::element_with_attrs("div", vec![("class", "form-check")])
                .with_child(Node::element_with_attrs("div", vec![("class", "form-check")]))
                .with_child(Node::text(label))
        };
        let root = Node::element("div").with_child(row("a")).with_child(row("b"));

        let rows = root.find_descendants(|n| n.has_class("form-check"));
        assert_eq!(rows.len(), 2);
    }
}
