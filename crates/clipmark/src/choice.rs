//! Multiple-choice widgets become Markdown task lists.

use crate::context::Context;
use crate::convert::Converter;
use crate::node::Node;
use crate::utilities::{indent_continuation, one_line, tidy_inline, verbatim};

/// A `role="group"` element whose accessible label mentions multiple choice
pub fn is_choice_group(node: &Node) -> bool {
    node.is_element()
        && node
            .attr("role")
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("group"))
        && node
            .attr("aria-label")
            .is_some_and(|l| l.to_lowercase().contains("multiple choice"))
}

/// Render each option row as an unchecked task item. Returns `None` when the
/// group has no option rows.
pub fn convert_choice_group(conv: &Converter<'_>, node: &Node, ctx: &Context) -> Option<String> {
    let row_class = conv.options().choice.option_row_class.as_str();
    let rows = node.find_descendants(|n| n.has_class(row_class));
    if rows.is_empty() {
        return None;
    }

    let lines: Vec<String> = rows
        .into_iter()
        .filter_map(|row| option_line(conv, row, ctx))
        .collect();
    if lines.is_empty() {
        return Some(String::new());
    }
    Some(format!("\n\n{}\n\n", lines.join("\n")))
}

fn option_line(conv: &Converter<'_>, row: &Node, ctx: &Context) -> Option<String> {
    let choice = &conv.options().choice;

    let key = row
        .find_descendant(|n| n.has_class(&choice.key_class))
        .map(|k| one_line(&k.text_content()))
        .unwrap_or_default();

    let answer = row
        .find_descendant(|n| n.has_class(&choice.answer_class))
        .or_else(|| row.find_descendant(|n| n.tag_name() == "label"))
        .map(|a| tidy_inline(&conv.convert_node(a, ctx)))
        .unwrap_or_default();
    // A bare `label` answer usually repeats the key label
    let answer = if !key.is_empty() && answer.starts_with(&key) {
        answer[key.len()..].trim_start().to_string()
    } else {
        answer
    };

    let text = [key, answer]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(format!("{} {}", verbatim("- [ ]"), indent_continuation(&text, "  ")))
}
