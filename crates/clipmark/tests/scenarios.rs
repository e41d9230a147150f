//! End-to-end conversion scenarios
//!
//! Each scenario parses a small HTML selection, as copied from a rendered
//! course page, and checks the exact Markdown produced.

use clipmark::{ClipmarkError, ConvertService, Node, Options};
use rstest::{fixture, rstest};

#[fixture]
fn service() -> ConvertService {
    ConvertService::new()
}

fn convert(service: &ConvertService, html: &str) -> String {
    service.convert_html(html).unwrap()
}

#[rstest]
#[case::heading("<h2>Title</h2>", "## Title\n")]
#[case::image_alt_from_file_name(r#"<img src="https://x/y/diagram.png">"#, "![diagram](https://x/y/diagram.png)\n")]
#[case::image_with_title(r#"<img src="/a.png" alt="Plot" title="Fig 1">"#, "![Plot](/a.png \"Fig 1\")\n")]
#[case::code_span_with_backtick("<p>Use <code>a`b</code> here</p>", "Use ``a`b`` here\n")]
#[case::code_span_starting_with_backtick("<code>`x</code>", "`` `x ``\n")]
#[case::emphasis("<p><em>very</em> <strong>bold</strong></p>", "*very* **bold**\n")]
#[case::strikethrough("<del>old</del>", "~~old~~\n")]
#[case::link(r#"<a href="https://x.org/a_b">the_link</a>"#, "[the\\_link](https://x.org/a_b)\n")]
#[case::script_link(r#"<a href="javascript:void(0)">Run</a>"#, "Run\n")]
#[case::link_text_with_brackets(r#"<a href="/x">[t]</a>"#, "[\\[t\\]](/x)\n")]
#[case::link_without_text(r#"<a href="https://x.org"></a>"#, "[https://x.org](https://x.org)\n")]
#[case::line_break("<p>a<br>b</p>", "a\\\nb\n")]
#[case::blockquote("<blockquote><p>Quote</p><p>More</p></blockquote>", "> Quote\n>\n> More\n")]
#[case::horizontal_rule("<p>a</p><hr><p>b</p>", "a\n\n---\n\nb\n")]
#[case::form_controls(r#"<p>Answer: <input type="text"><button>Submit</button></p>"#, "Answer:\n")]
#[case::script_dropped("<p>x</p><script>alert(1)</script>", "x\n")]
#[case::aria_hidden(r#"<p>Visible<span aria-hidden="true">hidden</span></p>"#, "Visible\n")]
fn test_inline_and_block(service: ConvertService, #[case] html: &str, #[case] expected: &str) {
    assert_eq!(convert(&service, html), expected);
}

#[rstest]
fn test_nested_list(service: ConvertService) {
    let html = "<ul><li>x<ol><li>y</li><li>z</li></ol></li><li>w</li></ul>";
    assert_eq!(convert(&service, html), "- x\n  1. y\n  2. z\n- w\n");
}

#[rstest]
fn test_list_nested_inside_div(service: ConvertService) {
    let html = "<ol><li>x<div><ul><li>y<div><ul><li>z</li></ul></div></li></ul></div></li></ol>";
    assert_eq!(convert(&service, html), "1. x\n  - y\n    - z\n");
}

#[rstest]
fn test_ordered_start_out_of_range(service: ConvertService) {
    let html = r#"<ol start="4294967295"><li>a</li><li>b</li></ol>"#;
    assert_eq!(convert(&service, html), "999999999. a\n999999999. b\n");
}

#[rstest]
fn test_strong_around_paragraphs(service: ConvertService) {
    let strong = Node::element("strong")
        .with_child(Node::element("p").with_child(Node::text("a")))
        .with_child(Node::element("p").with_child(Node::text("b")));
    assert_eq!(service.convert(&Node::document_fragment().with_child(strong)), "**a b**\n");
}

#[rstest]
fn test_paragraph_after_list(service: ConvertService) {
    let html = "<p>Steps:</p><ol><li>one</li><li>two</li></ol><p>Done.</p>";
    assert_eq!(convert(&service, html), "Steps:\n\n1. one\n2. two\n\nDone.\n");
}

#[rstest]
fn test_code_block_language_class(service: ConvertService) {
    let html = "<pre><code class=\"language-python\">print(\"a_b\")\n</code></pre>";
    assert_eq!(convert(&service, html), "```python\nprint(\"a_b\")\n```\n");
}

#[rstest]
fn test_code_block_fence_lengthened(service: ConvertService) {
    let html = "<pre><code>```\nx\n```</code></pre>";
    assert_eq!(convert(&service, html), "````\n```\nx\n```\n````\n");
}

#[rstest]
fn test_code_block_language_from_file_name(service: ConvertService) {
    let html = r#"<pre data-filename="main.cpp"><code>int main() {}</code></pre>"#;
    assert_eq!(convert(&service, html), "```cpp\nint main() {}\n```\n");
}

#[rstest]
fn test_ace_editor(service: ConvertService) {
    let html = concat!(
        r#"<div class="ace_editor" data-filename="solve.py">"#,
        r#"<textarea class="ace_text-input"></textarea>"#,
        r#"<div class="ace_gutter"><div class="ace_gutter-cell">1</div></div>"#,
        r#"<div class="ace_scroller"><div class="ace_content"><div class="ace_text-layer">"#,
        r#"<div class="ace_line">def f(x):</div>"#,
        r#"<div class="ace_line">    return x</div>"#,
        "</div></div></div></div>",
    );
    assert_eq!(convert(&service, html), "```python\ndef f(x):\n    return x\n```\n");
}

#[rstest]
fn test_table(service: ConvertService) {
    let html = "<table><thead><tr><th>n</th><th>n^2</th></tr></thead>\
                <tbody><tr><td>2</td><td>4</td></tr></tbody></table>";
    assert_eq!(convert(&service, html), "| n | n^2 |\n| --- | --- |\n| 2 | 4 |\n");
}

#[rstest]
fn test_list_inside_table_cell(service: ConvertService) {
    let html = "<table><tr><th>Steps</th></tr><tr><td><ol><li>a</li><li>b</li></ol></td></tr></table>";
    assert_eq!(convert(&service, html), "| Steps |\n| --- |\n| 1. a; 2. b |\n");
}

#[rstest]
fn test_display_math(service: ConvertService) {
    let html = r#"<p>Solve</p><mjx-container display="true"><mjx-math data-latex="x_1 + x_2 = 0"></mjx-math></mjx-container>"#;
    assert_eq!(convert(&service, html), "Solve\n\n$$\nx_1 + x_2 = 0\n$$\n");
}

#[rstest]
fn test_inline_math_not_escaped(service: ConvertService) {
    let html = r#"<p>Let <mjx-container><mjx-math data-latex="a_i"></mjx-math></mjx-container> be_large</p>"#;
    assert_eq!(convert(&service, html), "Let $a_i$ be\\_large\n");
}

#[rstest]
fn test_dollar_in_text_before_math(service: ConvertService) {
    let html = r#"<p>cost $5 and <mjx-container><mjx-math data-latex="x_1"></mjx-math></mjx-container></p>"#;
    assert_eq!(convert(&service, html), "cost $5 and $x_1$\n");
}

#[rstest]
fn test_katex(service: ConvertService) {
    let html = concat!(
        r#"<span class="katex"><span class="katex-mathml"><math><semantics>"#,
        r#"<mrow><mi>y</mi></mrow><annotation encoding="application/x-tex">y^2</annotation>"#,
        r#"</semantics></math></span><span class="katex-html" aria-hidden="true">y2</span></span>"#,
    );
    assert_eq!(convert(&service, html), "$y^2$\n");
}

#[rstest]
fn test_mathjax2(service: ConvertService) {
    let html = r#"<span class="MathJax_Preview">x</span><span class="MathJax">x</span><script type="math/tex">x+1</script>"#;
    assert_eq!(convert(&service, html), "$x+1$\n");
}

#[rstest]
fn test_multiple_choice(service: ConvertService) {
    let html = r#"
        <div role="group" aria-label="Multiple choice options">
          <div class="form-check">
            <input type="radio" name="q">
            <label><span class="pl-multiple-choice-key-label">(a)</span></label>
            <div class="pl-multiple-choice-answer">2</div>
          </div>
          <div class="form-check">
            <input type="radio" name="q">
            <label><span class="pl-multiple-choice-key-label">(b)</span></label>
            <div class="pl-multiple-choice-answer">4</div>
          </div>
        </div>"#;
    assert_eq!(convert(&service, html), "- [ ] (a) 2\n- [ ] (b) 4\n");
}

#[rstest]
fn test_relative_link_resolved() {
    let options = Options::default()
        .with_base_url("https://example.com/course/")
        .unwrap();
    let service = ConvertService::with_options(options);
    assert_eq!(
        convert(&service, r#"<a href="page.html">Next</a>"#),
        "[Next](https://example.com/course/page.html)\n"
    );
}

#[rstest]
fn test_empty_selection(service: ConvertService) {
    assert!(matches!(
        service.convert_html(""),
        Err(ClipmarkError::EmptySelection)
    ));
    assert!(matches!(
        service.convert_html("<button>Submit</button>"),
        Err(ClipmarkError::EmptyOutput)
    ));
}
