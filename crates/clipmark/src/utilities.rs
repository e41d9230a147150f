//! Utility functions and constants shared by the handlers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "details", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Opens a run of generated markup the escaper must leave alone
pub const VERBATIM_OPEN: char = '\u{E000}';

/// Closes a run opened by [`VERBATIM_OPEN`]
pub const VERBATIM_CLOSE: char = '\u{E001}';

/// Starts a line that already sits at its final column; continuation
/// indenting leaves it alone. Removed together with the verbatim markers.
pub const LINE_ANCHOR: char = '\u{E002}';

/// Hard line break outside table cells: backslash + newline survives
/// trailing-space trimming, unlike the two-space form.
pub const HARD_BREAK: &str = "\\\n";

/// Line break inside a table cell, where a newline would end the row
pub const CELL_BREAK: &str = "<br>";

static SPACE_BEFORE_NEWLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+\n").expect("SPACE_BEFORE_NEWLINE: hardcoded regex is valid")
});
static SPACE_AFTER_NEWLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]+").expect("SPACE_AFTER_NEWLINE: hardcoded regex is valid")
});
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]{2,}").expect("SPACE_RUN: hardcoded regex is valid")
});
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n{3,}").expect("NEWLINE_RUN: hardcoded regex is valid")
});
static ANY_NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n+").expect("ANY_NEWLINE_RUN: hardcoded regex is valid")
});

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Mark `s` as generated markup
pub fn verbatim(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 6);
    out.push(VERBATIM_OPEN);
    out.push_str(s);
    out.push(VERBATIM_CLOSE);
    out
}

/// Remove verbatim markers and line anchors
pub fn strip_markers(s: &str) -> String {
    s.chars()
        .filter(|&c| !matches!(c, VERBATIM_OPEN | VERBATIM_CLOSE | LINE_ANCHOR))
        .collect()
}

/// Start of a line pinned at column `pad.len()`
pub fn anchored(pad: &str) -> String {
    format!("{LINE_ANCHOR}{}", verbatim(pad))
}

/// A piece of converted output, either free text or a marked verbatim run
/// (markers included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Verbatim(&'a str),
}

/// Split `s` into text and verbatim segments. Nested markers stay inside the
/// outermost run; an unclosed run extends to the end.
pub fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c == VERBATIM_OPEN {
            if depth == 0 {
                if start < i {
                    out.push(Segment::Text(&s[start..i]));
                }
                start = i;
            }
            depth += 1;
        } else if c == VERBATIM_CLOSE && depth > 0 {
            depth -= 1;
            if depth == 0 {
                let end = i + c.len_utf8();
                out.push(Segment::Verbatim(&s[start..end]));
                start = end;
            }
        }
    }

    if start < s.len() {
        let rest = &s[start..];
        out.push(if depth > 0 {
            Segment::Verbatim(rest)
        } else {
            Segment::Text(rest)
        });
    }
    out
}

/// Apply `f` to every text segment, copying verbatim segments unchanged
pub fn map_text<F>(s: &str, f: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::with_capacity(s.len());
    for segment in segments(s) {
        match segment {
            Segment::Text(text) => out.push_str(&f(text)),
            Segment::Verbatim(run) => out.push_str(run),
        }
    }
    out
}

/// Collapse whitespace in text
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Trim surrounding blank space and dangling hard breaks from a block
pub fn trim_block(s: &str) -> &str {
    let is_space = |c: char| c == ' ' || c == '\t' || c == '\n';

    let mut s = s;
    loop {
        let t = s.trim_start_matches(is_space);
        match t.strip_prefix(HARD_BREAK) {
            Some(rest) => s = rest,
            None => {
                s = t;
                break;
            }
        }
    }
    loop {
        let t = s.trim_end_matches([' ', '\t']);
        if let Some(rest) = t.strip_suffix(HARD_BREAK) {
            s = rest;
        } else if let Some(rest) = t.strip_suffix('\n') {
            s = rest;
        } else {
            s = t;
            break;
        }
    }
    s
}

/// Tidy converted inline content: no indentation, single spaces, no
/// trailing blanks. Line structure and verbatim runs are preserved.
pub fn tidy_inline(s: &str) -> String {
    let tidied = map_text(s, |text| {
        let text = text.replace('\u{a0}', " ");
        let text = SPACE_BEFORE_NEWLINE.replace_all(&text, "\n");
        let text = SPACE_AFTER_NEWLINE.replace_all(&text, "\n");
        let text = NEWLINE_RUN.replace_all(&text, "\n\n");
        SPACE_RUN.replace_all(&text, " ").into_owned()
    });
    trim_block(&tidied).to_string()
}

/// Tidy converted block content, keeping indentation intact
pub fn tidy_block(s: &str) -> String {
    let tidied = map_text(s, |text| {
        let text = SPACE_BEFORE_NEWLINE.replace_all(text, "\n");
        NEWLINE_RUN.replace_all(&text, "\n\n").into_owned()
    });
    trim_block(&tidied).to_string()
}

/// Flatten converted content onto one line
pub fn one_line(s: &str) -> String {
    let flat = map_text(&tidy_inline(s), |text| {
        let text = text.replace(HARD_BREAK, " ");
        let text = ANY_NEWLINE_RUN.replace_all(&text, " ");
        SPACE_RUN.replace_all(&text, " ").into_owned()
    });
    flat.trim().to_string()
}

/// Replace newline runs with `replacement` in text segments
pub fn replace_newlines(s: &str, replacement: &str) -> String {
    map_text(s, |text| {
        let text = text.replace(HARD_BREAK, "\n");
        ANY_NEWLINE_RUN.replace_all(&text, replacement).into_owned()
    })
}

/// Prefix every non-empty line after the first with `indent`, except lines
/// that are already anchored
pub fn indent_continuation(s: &str, indent: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() && !line.starts_with(LINE_ANCHOR) {
                out.push_str(indent);
            }
        }
        out.push_str(line);
    }
    out
}

/// Length of the longest run of `ch` in `s`
pub fn longest_run(s: &str, ch: char) -> usize {
    s.chars()
        .fold((0, 0), |(max, current), c| {
            if c == ch {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0
}
