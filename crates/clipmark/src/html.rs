//! HTML parsing support.
//!
//! Turns an HTML string into the detached fragment the converter works on,
//! for callers that hold markup rather than a live DOM selection.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a document-fragment [`Node`].
///
/// # Example
///
/// ```rust
/// use clipmark::{parse_html, ConvertService};
///
/// let fragment = parse_html("<h1>Hello <em>World</em></h1>");
///
/// let service = ConvertService::new();
/// let markdown = service.convert(&fragment);
/// assert_eq!(markdown, "# Hello *World*\n");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    let mut fragment = Node::document_fragment();
    append_children(&mut fragment, document.root_element());
    fragment
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };
    append_children(&mut node, element);
    node
}

fn append_children(node: &mut Node, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }
}
