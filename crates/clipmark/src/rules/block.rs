//! Block rules: paragraphs, headings, block quotes, rules and line breaks.

use super::{Filter, Rule};
use crate::utilities::{one_line, tidy_block, tidy_inline, verbatim, CELL_BREAK, HARD_BREAK};

pub(super) fn rules() -> Vec<Rule> {
    vec![
        paragraph_rule(),
        heading_rule(),
        blockquote_rule(),
        horizontal_rule(),
        line_break_rule(),
    ]
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |conv, node, ctx| {
        let content = tidy_inline(&conv.convert_children(node, ctx));
        if content.is_empty() {
            String::new()
        } else if ctx.in_table_cell() {
            format!("{}\n", content)
        } else {
            format!("\n\n{}\n\n", content)
        }
    })
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::tags(&["h1", "h2", "h3", "h4", "h5", "h6"]),
        |conv, node, ctx| {
            let tag = node.tag_name();
            let level: usize = tag[1..].parse().unwrap_or(1);

            let content = one_line(&conv.convert_children(node, ctx));
            if content.is_empty() {
                return String::new();
            }
            if ctx.in_table_cell() {
                return format!("{}\n", content);
            }
            format!("\n{} {}\n", "#".repeat(level), content)
        },
    )
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |conv, node, ctx| {
        let content = tidy_block(&conv.convert_children(node, ctx));
        if content.is_empty() {
            return String::new();
        }
        if ctx.in_table_cell() {
            return format!("{}\n", content);
        }
        let quoted: Vec<String> = content
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    })
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |conv, _, ctx| {
        if ctx.in_table_cell() {
            return String::new();
        }
        format!("\n\n{}\n\n", verbatim(&conv.options().hr))
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, ctx| {
        if ctx.in_table_cell() {
            CELL_BREAK.to_string()
        } else {
            HARD_BREAK.to_string()
        }
    })
}
