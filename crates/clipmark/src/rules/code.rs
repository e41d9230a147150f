//! Code block rules: `<pre>` blocks and Ace editor widgets.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{inline::code_span, Filter, Rule};
use crate::context::Context;
use crate::convert::Converter;
use crate::node::Node;
use crate::utilities::{collapse_whitespace, longest_run, verbatim};

static FILE_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.([A-Za-z0-9]+)\s*$").expect("FILE_EXTENSION: hardcoded regex is valid")
});

/// Attributes that may carry the file name of an embedded source file
const FILENAME_ATTRIBUTES: &[&str] = &["data-filename", "data-file", "title"];

/// Language used for Ace editors when nothing better is known
const ACE_DEFAULT_LANGUAGE: &str = "text";

pub(super) fn rules() -> Vec<Rule> {
    vec![ace_editor_rule(), code_block_rule()]
}

fn code_block_rule() -> Rule {
    Rule::for_tag("pre", |conv, node, ctx| {
        let code = node.element_children().find(|c| c.tag_name() == "code");

        let language = code
            .and_then(language_from_classes)
            .or_else(|| language_from_classes(node))
            .or_else(|| code.and_then(language_from_attributes))
            .or_else(|| language_from_attributes(node))
            .unwrap_or_default();

        let source = code.unwrap_or(node);
        let text = conv.convert_children(source, &ctx.preformatted());
        render_code_block(conv, &text, &language, ctx)
    })
}

fn ace_editor_rule() -> Rule {
    Rule::new(Filter::class("ace_editor"), |conv, node, ctx| {
        let lines = node.find_descendants(|n| n.has_class("ace_line"));
        let text = if lines.is_empty() {
            node.find_descendant(|n| n.has_class("ace_text-layer"))
                .map(|layer| layer.text_content())
                .unwrap_or_default()
        } else {
            lines
                .iter()
                .map(|line| line.text_content())
                .collect::<Vec<_>>()
                .join("\n")
        };

        let language = language_from_attributes(node)
            .or_else(|| {
                node.find_descendant(|n| FILENAME_ATTRIBUTES.iter().any(|a| n.has_attr(a)))
                    .and_then(language_from_attributes)
            })
            .unwrap_or_else(|| ACE_DEFAULT_LANGUAGE.to_string());

        render_code_block(conv, &text.replace('\u{a0}', " "), &language, ctx)
    })
}

/// Fenced block for `text`; a code span inside table cells
fn render_code_block(conv: &Converter<'_>, text: &str, language: &str, ctx: &Context) -> String {
    let text = text.trim_start_matches(['\r', '\n']).trim_end();
    if text.trim().is_empty() {
        return String::new();
    }
    if ctx.in_table_cell() {
        return code_span(collapse_whitespace(text).trim());
    }

    let configured = &conv.options().fence;
    let fence_char = configured.chars().next().unwrap_or('`');
    let run = longest_run(text, fence_char);
    let fence = if run >= configured.chars().count() {
        fence_char.to_string().repeat(run + 1)
    } else {
        configured.clone()
    };

    format!(
        "\n\n{}\n\n",
        verbatim(&format!("{fence}{language}\n{text}\n{fence}"))
    )
}

/// Language from a `language-xxx` or `lang-xxx` class
fn language_from_classes(node: &Node) -> Option<String> {
    node.classes()
        .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

fn language_from_attributes(node: &Node) -> Option<String> {
    FILENAME_ATTRIBUTES
        .iter()
        .filter_map(|name| node.attr(name))
        .find_map(language_from_filename)
        .map(str::to_string)
}

/// Infer a fence language from a file name's extension
pub fn language_from_filename(name: &str) -> Option<&'static str> {
    let extension = FILE_EXTENSION.captures(name)?.get(1)?.as_str().to_ascii_lowercase();
    let language = match extension.as_str() {
        "cc" | "cpp" | "cxx" | "h" | "hpp" | "hh" | "hxx" => "cpp",
        "c" => "c",
        "js" => "javascript",
        "ts" => "typescript",
        "py" => "python",
        "sh" => "bash",
        "zsh" => "zsh",
        "md" => "markdown",
        "yml" | "yaml" => "yaml",
        "json" => "json",
        "html" => "html",
        "css" => "css",
        _ => return None,
    };
    Some(language)
}
