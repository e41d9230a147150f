//! Rule system for node to Markdown conversion.

mod block;
mod code;
mod inline;
mod list;
mod rule;
mod table;

pub use code::language_from_filename;
pub use rule::{Filter, Rule};
pub use table::TableMatrix;

use indexmap::IndexMap;

use crate::math;
use crate::node::Node;

/// Create all built-in rules, in lookup order
pub fn builtin_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(code::rules());
    rules.extend(block::rules());
    rules.extend(list::rules());
    rules.extend(table::rules());
    rules.extend(inline::rules());
    rules
}

/// Filters for interactive widgets and non-content elements, skipped
/// together with their whole subtree
pub fn default_ignore_filters() -> Vec<Filter> {
    vec![
        Filter::tags(&["input", "textarea", "select", "button", "style", "noscript", "template"]),
        Filter::predicate(|tag, node| tag == "script" && !math::is_math_container(node)),
        Filter::class("input-group"),
        Filter::class("pl-number-input"),
        Filter::class("pl-string-input"),
        Filter::class("pl-checkbox"),
        Filter::class("pl-radio"),
        Filter::predicate(|_, node| {
            node.attr("aria-hidden") == Some("true") && !math::is_math_container(node)
        }),
        Filter::predicate(|_, node| math::is_rendering_artifact(node)),
    ]
}

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Ignore filters (skip element and subtree)
    ignore_filters: Vec<Filter>,
    /// Built-in rules
    builtin_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules and ignore set
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            ignore_filters: default_ignore_filters(),
            builtin_rules: builtin_rules(),
        }
    }

    /// Add a custom rule. Re-using a key replaces the earlier rule in place.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add an ignore filter
    pub fn ignore(&mut self, filter: Filter) {
        self.ignore_filters.push(filter);
    }

    /// Find the appropriate rule for an element
    pub fn for_node(&self, tag: &str, node: &Node) -> Option<&Rule> {
        self.custom_rules
            .values()
            .chain(self.builtin_rules.iter())
            .find(|rule| rule.filter.matches(tag, node))
    }

    /// Check if an element should be skipped entirely
    pub fn should_ignore(&self, tag: &str, node: &Node) -> bool {
        self.ignore_filters
            .iter()
            .any(|filter| filter.matches(tag, node))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
