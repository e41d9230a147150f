//! Recursive node to Markdown conversion.
//!
//! The walk dispatches each node in a fixed order: text, ignored elements,
//! multiple-choice groups, math containers, preformatted content, rules, and
//! finally plain pass-through of the children.

use log::{debug, trace};

use crate::choice;
use crate::context::Context;
use crate::math;
use crate::node::{Node, NodeType};
use crate::options::Options;
use crate::rules::Rules;
use crate::utilities::{collapse_whitespace, is_block, strip_markers};

/// Borrowed view of a service's configuration, handed to every rule
pub struct Converter<'a> {
    options: &'a Options,
    rules: &'a Rules,
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a Options, rules: &'a Rules) -> Self {
        Self { options, rules }
    }

    pub fn options(&self) -> &Options {
        self.options
    }

    /// Convert a node and its subtree to a Markdown fragment
    pub fn convert_node(&self, node: &Node, ctx: &Context) -> String {
        match node.node_type {
            NodeType::Text => convert_text(node, ctx),
            NodeType::Comment => String::new(),
            NodeType::Document | NodeType::DocumentFragment => self.convert_children(node, ctx),
            NodeType::Element => self.convert_element(node, ctx),
        }
    }

    /// Concatenate the fragments of all children, in order
    pub fn convert_children(&self, node: &Node, ctx: &Context) -> String {
        node.children()
            .map(|child| self.convert_node(child, ctx))
            .collect()
    }

    fn convert_element(&self, node: &Node, ctx: &Context) -> String {
        let tag = node.tag_name();

        if self.rules.should_ignore(&tag, node) {
            trace!("skipping <{tag}>");
            return String::new();
        }

        if choice::is_choice_group(node) {
            match choice::convert_choice_group(self, node, ctx) {
                Some(markdown) => return markdown,
                None => debug!("choice group without option rows, converting as plain content"),
            }
        }

        if math::is_math_container(node) {
            match math::extract(node) {
                Some(span) => return span.render(ctx),
                None => debug!("<{tag}> looks like math but carries no TeX source"),
            }
        }

        if ctx.in_preformatted() {
            return if tag == "br" {
                "\n".to_string()
            } else {
                self.convert_children(node, ctx)
            };
        }

        if let Some(rule) = self.rules.for_node(&tag, node) {
            return rule.replace(self, node, ctx);
        }

        let content = self.convert_children(node, ctx);
        if is_block(&tag) && !content.trim().is_empty() {
            format!("\n{}\n", content)
        } else {
            content
        }
    }
}

fn convert_text(node: &Node, ctx: &Context) -> String {
    let text = strip_markers(node.node_value.as_deref().unwrap_or(""));
    if ctx.in_preformatted() {
        text
    } else {
        collapse_whitespace(&text)
    }
}
