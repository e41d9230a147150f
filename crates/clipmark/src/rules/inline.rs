//! Inline rules: emphasis, code spans, links and images.

use log::warn;

use super::{Filter, Rule};
use crate::options::Options;
use crate::utilities::{
    clean_attribute, longest_run, map_text, one_line, strip_markers, verbatim,
};

/// Destinations treated as absent
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

pub(super) fn rules() -> Vec<Rule> {
    vec![
        emphasis_rule(),
        strong_rule(),
        strikethrough_rule(),
        code_rule(),
        link_rule(),
        image_rule(),
    ]
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |conv, node, ctx| {
        let delimiter = conv.options().em_delimiter.to_string();
        delimit(&conv.convert_children(node, ctx), &delimiter)
    })
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |conv, node, ctx| {
        delimit(&conv.convert_children(node, ctx), &conv.options().strong_delimiter)
    })
}

fn strikethrough_rule() -> Rule {
    Rule::for_tags(&["del", "s", "strike"], |conv, node, ctx| {
        delimit(&conv.convert_children(node, ctx), "~~")
    })
}

fn code_rule() -> Rule {
    Rule::for_tags(&["code", "kbd", "samp", "tt"], |_, node, _| {
        code_span(&node.text_content())
    })
}

fn link_rule() -> Rule {
    Rule::new(Filter::tag("a"), |conv, node, ctx| {
        let text = one_line(&conv.convert_children(node, ctx));
        let href = clean_attribute(node.attr("href"));

        let Some(destination) = resolve_destination(conv.options(), &href, false) else {
            return text;
        };
        let label = if text.is_empty() {
            destination.clone()
        } else {
            text
        };
        format!(
            "[{}]({})",
            map_text(&label, escape_brackets),
            verbatim(&format!("{}{}", format_destination(&destination), title_part(node.attr("title"))))
        )
    })
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |conv, node, _| {
        let src = clean_attribute(node.attr("src").or_else(|| node.attr("data-src")));
        let Some(destination) = resolve_destination(conv.options(), &src, true) else {
            return String::new();
        };

        let mut alt = clean_attribute(node.attr("alt"));
        if alt.is_empty() {
            alt = fallback_alt(&src);
        }

        format!(
            "![{}]({})",
            escape_brackets(&alt),
            verbatim(&format!("{}{}", format_destination(&destination), title_part(node.attr("title"))))
        )
    })
}

fn escape_brackets(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}

/// Wrap converted content in `delimiter`, keeping surrounding whitespace
/// outside the delimiters. Delimiters cannot span a blank line, so the
/// content is flattened onto one line.
fn delimit(content: &str, delimiter: &str) -> String {
    let inner = one_line(content);
    if inner.is_empty() {
        return if content.is_empty() {
            String::new()
        } else {
            " ".to_string()
        };
    }

    let leading = if content.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if content.ends_with(char::is_whitespace) { " " } else { "" };
    format!(
        "{}{}{}{}{}",
        leading,
        verbatim(delimiter),
        inner,
        verbatim(delimiter),
        trailing
    )
}

/// Render raw text as a code span. The backtick run is one longer than the
/// longest run inside, and the content is padded when it touches a backtick.
pub(crate) fn code_span(text: &str) -> String {
    let text = strip_markers(text).replace(['\r', '\n'], " ");
    if text.trim().is_empty() {
        return String::new();
    }

    let ticks = "`".repeat(longest_run(&text, '`') + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    verbatim(&format!("{ticks}{pad}{text}{pad}{ticks}"))
}

/// Resolve a link or image destination. `None` means the element has no
/// usable destination. Inline `data:` payloads are only kept for images.
fn resolve_destination(options: &Options, raw: &str, allow_data: bool) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let scheme: String = raw
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if SCRIPT_SCHEMES.iter().any(|s| scheme.starts_with(s))
        || (!allow_data && scheme.starts_with("data:"))
    {
        return None;
    }

    match url::Url::parse(raw) {
        Ok(_) => Some(raw.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => match &options.base_url {
            Some(base) => match base.join(raw) {
                Ok(url) => Some(url.to_string()),
                Err(err) => {
                    warn!("could not resolve {raw:?} against {base}: {err}");
                    Some(raw.to_string())
                }
            },
            None => Some(raw.to_string()),
        },
        Err(err) => {
            warn!("malformed destination {raw:?}: {err}");
            Some(raw.to_string())
        }
    }
}

fn format_destination(destination: &str) -> String {
    if destination.contains(char::is_whitespace) {
        format!("<{}>", destination.replace('<', "%3C").replace('>', "%3E"))
    } else {
        destination.to_string()
    }
}

fn title_part(title: Option<&str>) -> String {
    let title = clean_attribute(title);
    if title.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", title.replace('"', "\\\""))
    }
}

/// Alt text for an image without one: the file name without extension
fn fallback_alt(src: &str) -> String {
    if src.to_ascii_lowercase().starts_with("data:") {
        return "image".to_string();
    }

    let path = src.split(['?', '#']).next().unwrap_or("");
    let file = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };

    if stem.is_empty() {
        "image".to_string()
    } else {
        stem.to_string()
    }
}
