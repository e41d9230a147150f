//! ConvertService: the public entry point.

use log::debug;

use crate::context::Context;
use crate::convert::Converter;
use crate::escape::escape;
use crate::node::Node;
use crate::normalize::normalize;
use crate::options::Options;
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::strip_markers;
use crate::{ClipmarkError, Result};

/// The main service for converting a selected DOM fragment to Markdown
pub struct ConvertService {
    options: Options,
    rules: Rules,
}

impl ConvertService {
    /// Create a new ConvertService with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a ConvertService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a node (usually a document fragment) to Markdown.
    ///
    /// Returns an empty string when nothing convertible is left; otherwise
    /// the result ends with exactly one newline.
    pub fn convert(&self, node: &Node) -> String {
        let converter = Converter::new(&self.options, &self.rules);
        let raw = converter.convert_node(node, &Context::new());
        self.post_process(&raw)
    }

    /// Convert the current selection. A missing or collapsed selection and
    /// a selection with no convertible content are errors.
    pub fn convert_selection(&self, selection: Option<&Node>) -> Result<String> {
        let node = selection.ok_or(ClipmarkError::EmptySelection)?;
        if node.children().next().is_none() && !node.is_text() && !node.is_element() {
            return Err(ClipmarkError::EmptySelection);
        }

        let markdown = self.convert(node);
        if markdown.is_empty() {
            debug!("selection produced no markdown");
            return Err(ClipmarkError::EmptyOutput);
        }
        Ok(markdown)
    }

    /// Parse an HTML fragment and convert it
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let fragment = crate::html::parse_html(html);
        self.convert_selection(Some(&fragment))
    }

    /// Add a custom rule, checked before the built-in rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Skip elements matching the filter, subtree included
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.ignore(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Normalize, escape, normalize again, then trim
    fn post_process(&self, raw: &str) -> String {
        let markdown = normalize(raw);
        let markdown = if self.options.escape {
            escape(&markdown)
        } else {
            strip_markers(&markdown)
        };
        let markdown = normalize(&markdown);

        let markdown = markdown.trim();
        if markdown.is_empty() {
            String::new()
        } else {
            format!("{}\n", markdown)
        }
    }
}

impl Default for ConvertService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Node {
        Node::element("p").with_child(Node::text(text))
    }

    #[test]
    fn test_simple_paragraph() {
        let service = ConvertService::new();
        let fragment = Node::document_fragment().with_child(p("Hello World"));
        assert_eq!(service.convert(&fragment), "Hello World\n");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let service = ConvertService::new();
        let fragment = Node::document_fragment().with_children([p("one"), p("two")]);
        assert_eq!(service.convert(&fragment), "one\n\ntwo\n");
    }

    #[test]
    fn test_text_escaped() {
        let service = ConvertService::new();
        let fragment = Node::document_fragment().with_child(p("snake_case *x*"));
        assert_eq!(service.convert(&fragment), "snake\\_case \\*x\\*\n");
    }

    #[test]
    fn test_escape_disabled() {
        let mut service = ConvertService::new();
        service.options_mut().escape = false;
        let fragment = Node::document_fragment().with_child(p("snake_case"));
        assert_eq!(service.convert(&fragment), "snake_case\n");
    }

    #[test]
    fn test_empty_selection() {
        let service = ConvertService::new();
        assert!(matches!(
            service.convert_selection(None),
            Err(ClipmarkError::EmptySelection)
        ));
        assert!(matches!(
            service.convert_selection(Some(&Node::document_fragment())),
            Err(ClipmarkError::EmptySelection)
        ));
    }

    #[test]
    fn test_empty_output() {
        let service = ConvertService::new();
        let fragment = Node::document_fragment().with_child(Node::element("button"));
        assert!(matches!(
            service.convert_selection(Some(&fragment)),
            Err(ClipmarkError::EmptyOutput)
        ));
    }

    #[test]
    fn test_remove_filter() {
        let mut service = ConvertService::new();
        service.remove(Filter::class("solution"));
        let fragment = Node::document_fragment()
            .with_child(p("question"))
            .with_child(Node::element_with_attrs("div", vec![("class", "solution")]).with_child(p("answer")));
        assert_eq!(service.convert(&fragment), "question\n");
    }

    #[test]
    fn test_custom_rule() {
        let mut service = ConvertService::new();
        service.add_rule(
            "marks",
            Rule::for_tag("mark", |conv, node, ctx| {
                format!("=={}==", conv.convert_children(node, ctx))
            }),
        );
        let fragment = Node::document_fragment()
            .with_child(Node::element("mark").with_child(Node::text("hi")));
        assert_eq!(service.convert(&fragment), "==hi==\n");
    }

    #[test]
    fn test_use_plugin() {
        let mut service = ConvertService::new();
        service.use_plugin(|s| {
            s.options_mut().bullet_list_marker = '*';
        });
        let list = Node::element("ul").with_child(Node::element("li").with_child(Node::text("x")));
        assert_eq!(service.convert(&list), "* x\n");
    }
}
