//! Rendered math (MathJax 2/3, KaTeX) back to its TeX source.

use crate::context::Context;
use crate::node::Node;
use crate::utilities::{collapse_whitespace, verbatim};

/// TeX recovered from a rendered formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    source: String,
    display: bool,
}

impl MathSpan {
    /// Build a span from raw TeX. Returns `None` for blank sources.
    ///
    /// Sources containing an environment or a line break are always
    /// displayed, whatever the markup said.
    pub fn new(source: &str, display: bool) -> Option<Self> {
        let source = source.trim();
        if source.is_empty() {
            return None;
        }
        let display = display || source.contains("\\begin{") || source.contains('\n');
        Some(Self {
            source: source.to_string(),
            display,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_display(&self) -> bool {
        self.display
    }

    /// Markdown for the span: `$x$` inline, a `$$` block on its own lines
    /// for display math, or `$$ x $$` on one line inside a table cell
    pub fn render(&self, ctx: &Context) -> String {
        if !self.display {
            return verbatim(&format!("${}$", self.source));
        }
        if ctx.in_table_cell() {
            return verbatim(&format!("$$ {} $$", collapse_whitespace(&self.source)));
        }
        format!("\n\n{}\n\n", verbatim(&format!("$$\n{}\n$$", self.source)))
    }
}

/// Whether `node` is the outer element of a rendered formula
pub fn is_math_container(node: &Node) -> bool {
    if !node.is_element() {
        return false;
    }
    let tag = node.tag_name();
    tag.starts_with("mjx-")
        || node.has_class("katex")
        || node.has_class("katex-display")
        || (tag == "script" && is_tex_script(node))
}

/// MathJax 2 preview and rendering spans. Their TeX lives in the sibling
/// `script[type^=math/tex]`, which is converted instead.
pub fn is_rendering_artifact(node: &Node) -> bool {
    node.is_element()
        && !node.tag_name().starts_with("mjx-")
        && (node.has_class("MathJax_Preview")
            || node.has_class("MathJax")
            || node.has_class("MathJax_Display")
            || node.has_class("MathJax_SVG"))
}

fn is_tex_script(node: &Node) -> bool {
    node.attr("type")
        .is_some_and(|t| t.trim().to_ascii_lowercase().starts_with("math/tex"))
}

/// Recover the TeX source of a math container
pub fn extract(node: &Node) -> Option<MathSpan> {
    if node.tag_name() == "script" {
        let display = node
            .attr("type")
            .is_some_and(|t| t.to_ascii_lowercase().contains("mode=display"));
        return MathSpan::new(&node.text_content(), display);
    }

    let source = node
        .find_descendant(|n| n.has_attr("data-latex"))
        .and_then(|n| n.attr("data-latex"))
        .map(str::to_string)
        .or_else(|| {
            node.find_descendant(|n| {
                n.tag_name() == "annotation"
                    && n.attr("encoding")
                        .is_some_and(|e| e.eq_ignore_ascii_case("application/x-tex"))
            })
            .map(|n| n.text_content())
        })?;

    MathSpan::new(&source, is_display(node))
}

fn is_display(node: &Node) -> bool {
    let flagged = node
        .find_descendant(|n| n.tag_name() == "mjx-container")
        .and_then(|n| n.attr("display"))
        .is_some_and(|d| d.eq_ignore_ascii_case("true"));
    flagged || node.find_descendant(|n| n.has_class("katex-display")).is_some()
}
