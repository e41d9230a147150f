//! Escaping of Markdown-significant characters outside protected runs.
//!
//! A protected run is generated markup (wrapped in verbatim markers),
//! display math (`$$...$$`) or inline math (`$...$`). Everything else is
//! text, where `*`, `_` and backticks get a backslash. Markers never
//! survive escaping.

use crate::utilities::{strip_markers, VERBATIM_CLOSE, VERBATIM_OPEN};

/// A piece of assembled Markdown, as seen by the escaper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run<'a> {
    Text(&'a str),
    Math(&'a str),
    Verbatim(&'a str),
}

/// Split `s` into text and protected runs. Delimiters close at their nearest
/// match before the next verbatim run; a `$` or `$$` without a closing match
/// is text.
pub fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while let Some(c) = s[i..].chars().next() {
        let protected = if c == VERBATIM_OPEN {
            Some((verbatim_end(s, i), false))
        } else if c == '$' {
            // Verbatim runs are atomic: a `$` in text never closes inside one
            let limit = s[i..].find(VERBATIM_OPEN).map_or(s.len(), |k| i + k);
            math_end(&s[..limit], i).map(|end| (end, true))
        } else {
            None
        };

        match protected {
            Some((end, is_math)) => {
                if text_start < i {
                    out.push(Run::Text(&s[text_start..i]));
                }
                out.push(if is_math {
                    Run::Math(&s[i..end])
                } else {
                    Run::Verbatim(&s[i..end])
                });
                i = end;
                text_start = end;
            }
            None => i += c.len_utf8(),
        }
    }

    if text_start < s.len() {
        out.push(Run::Text(&s[text_start..]));
    }
    out
}

/// End (exclusive) of the math run opening with the `$` at `start`
fn math_end(s: &str, start: usize) -> Option<usize> {
    if s[start..].starts_with("$$") {
        if let Some(j) = s[start + 2..].find("$$") {
            return Some(start + 2 + j + 2);
        }
    }
    s[start + 1..].find('$').map(|j| start + 1 + j + 1)
}

/// End (exclusive) of the verbatim run opening at `start`
fn verbatim_end(s: &str, start: usize) -> usize {
    let mut depth = 0usize;
    for (i, c) in s[start..].char_indices() {
        if c == VERBATIM_OPEN {
            depth += 1;
        } else if c == VERBATIM_CLOSE {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return start + i + c.len_utf8();
            }
        }
    }
    s.len()
}

/// Backslash-escape `*`, `_` and backticks
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '_' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape text outside protected runs and drop verbatim markers
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for run in runs(s) {
        match run {
            Run::Text(text) => out.push_str(&escape_text(&strip_markers(text))),
            Run::Math(math) | Run::Verbatim(math) => out.push_str(&strip_markers(math)),
        }
    }
    out
}
