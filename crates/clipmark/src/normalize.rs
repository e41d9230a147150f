//! Whitespace normalization of assembled Markdown.
//!
//! Each pass is idempotent, and so is their composition.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)[ \t]+$").expect("TRAILING_SPACE: hardcoded regex is valid")
});
static BLANK_LINE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n{3,}").expect("BLANK_LINE_RUN: hardcoded regex is valid")
});
static WHITESPACE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]+$").expect("WHITESPACE_LINE: hardcoded regex is valid")
});

/// A named normalization pass
pub type Pass = fn(&str) -> String;

/// The passes applied by [`normalize`], in order
pub const PASSES: [(&str, Pass); 4] = [
    ("non-breaking-spaces", replace_nbsp),
    ("trailing-whitespace", strip_trailing_whitespace),
    ("blank-lines", collapse_blank_lines),
    ("whitespace-only-lines", clear_whitespace_lines),
];

/// Non-breaking spaces become plain spaces
pub fn replace_nbsp(s: &str) -> String {
    s.replace('\u{a0}', " ")
}

/// Strip spaces and tabs at the end of every line
pub fn strip_trailing_whitespace(s: &str) -> String {
    TRAILING_SPACE.replace_all(s, "").into_owned()
}

/// At most one blank line between blocks
pub fn collapse_blank_lines(s: &str) -> String {
    BLANK_LINE_RUN.replace_all(s, "\n\n").into_owned()
}

/// Lines holding only spaces or tabs become empty
pub fn clear_whitespace_lines(s: &str) -> String {
    WHITESPACE_LINE.replace_all(s, "").into_owned()
}

/// Run every pass in order
pub fn normalize(s: &str) -> String {
    PASSES
        .iter()
        .fold(s.to_string(), |acc, (_, pass)| pass(&acc))
}
