//! List rules.
//!
//! Item markers sit at an absolute indent of two spaces per enclosing list,
//! so nested fragments are appended as they are. Continuation lines of an
//! item body align with the text after the marker. Every emitted line is
//! anchored, which keeps a list nested inside a wrapper element (`<li><div>
//! <ul>`) at its own column when the wrapper's text is re-indented.

use super::Rule;
use crate::context::{Context, ListFrame, ListKind};
use crate::convert::Converter;
use crate::node::Node;
use crate::utilities::{
    anchored, indent_continuation, one_line, tidy_inline, verbatim, LINE_ANCHOR,
};

const LIST_TAGS: &[&str] = &["ul", "ol", "menu"];

pub(super) fn rules() -> Vec<Rule> {
    vec![list_rule(), list_item_rule()]
}

fn list_rule() -> Rule {
    Rule::for_tags(LIST_TAGS, convert_list)
}

/// A list item reached without going through its list
fn list_item_rule() -> Rule {
    Rule::for_tag("li", |conv, node, ctx| {
        if ctx.list_depth() == 0 {
            let item_ctx = ctx.enter_list(ListFrame::unordered());
            if ctx.in_table_cell() {
                return one_line(&conv.convert_children(node, &item_ctx));
            }
            format!("\n{}", convert_item(conv, node, &item_ctx))
        } else if ctx.in_table_cell() {
            one_line(&conv.convert_children(node, ctx))
        } else {
            convert_item(conv, node, ctx)
        }
    })
}

fn is_list(node: &Node) -> bool {
    node.is_element() && LIST_TAGS.contains(&node.tag_name().as_str())
}

fn first_frame(node: &Node) -> ListFrame {
    if node.tag_name() == "ol" {
        let start = node
            .attr("start")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(1);
        ListFrame::ordered(start)
    } else {
        ListFrame::unordered()
    }
}

fn items(node: &Node) -> impl Iterator<Item = &Node> {
    node.element_children().filter(|c| c.tag_name() == "li")
}

fn convert_list(conv: &Converter<'_>, node: &Node, ctx: &Context) -> String {
    if ctx.in_table_cell() {
        return flatten_list(conv, node, ctx);
    }

    let mut frame = first_frame(node);
    let mut out = String::new();
    for item in items(node) {
        out.push_str(&convert_item(conv, item, &ctx.enter_list(frame)));
        frame = frame.advance();
    }

    if out.trim().is_empty() {
        String::new()
    } else if ctx.list_depth() > 0 {
        out
    } else {
        format!("\n\n{}\n", out)
    }
}

/// Render one item. `ctx` already holds the item's own frame.
fn convert_item(conv: &Converter<'_>, item: &Node, ctx: &Context) -> String {
    let frame = ctx
        .current_frame()
        .copied()
        .unwrap_or_else(ListFrame::unordered);
    let indent = "  ".repeat(ctx.list_depth().saturating_sub(1));
    let marker = frame.marker(conv.options().bullet_list_marker);

    let mut body = String::new();
    let mut nested = String::new();
    for child in item.children() {
        if is_list(child) {
            nested.push_str(&conv.convert_node(child, ctx));
        } else {
            body.push_str(&conv.convert_node(child, ctx));
        }
    }

    let content_indent = format!("{}{}", indent, " ".repeat(marker.chars().count()));
    let body = indent_continuation(&tidy_inline(&body), &anchored(&content_indent));

    let mut out = format!("{}{}", anchored(&indent), verbatim(marker.trim_end()));
    if body.starts_with(LINE_ANCHOR) {
        // The item opens with a list of its own
        out.push('\n');
    } else if !body.is_empty() {
        out.push(' ');
    }
    out.push_str(&body);
    out.push('\n');

    let nested = nested.trim_start_matches('\n').trim_end();
    if !nested.is_empty() {
        out.push_str(nested);
        out.push('\n');
    }
    out
}

/// A list inside a table cell, as one line of items joined by `"; "`
fn flatten_list(conv: &Converter<'_>, node: &Node, ctx: &Context) -> String {
    let mut frame = first_frame(node);
    let mut parts = Vec::new();

    for item in items(node) {
        let item_ctx = ctx.enter_list(frame);
        let mut text = String::new();
        let mut nested = Vec::new();
        for child in item.children() {
            let converted = conv.convert_node(child, &item_ctx);
            if is_list(child) {
                nested.push(converted);
            } else {
                text.push_str(&converted);
            }
        }

        let text = one_line(&text);
        if !text.is_empty() {
            parts.push(match frame.kind {
                ListKind::Ordered => format!("{}. {}", frame.ordinal, text),
                ListKind::Unordered => text,
            });
        }
        parts.extend(
            nested
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        );
        frame = frame.advance();
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" {} ", parts.join("; "))
    }
}
