use insta::assert_snapshot;

use markdown_arbor_engine::{parse, render_html, render_markdown, render_plain_text};

#[test]
fn markdown_inline_formatting() {
    let doc = parse("Hello *world*, **bold** and ~~struck~~.");
    assert_snapshot!(render_markdown(&doc), @"Hello *world*, **bold** and ~~struck~~.");
}

#[test]
fn markdown_trims_heading_whitespace() {
    let doc = parse("### heading   ");
    assert_snapshot!(render_markdown(&doc), @"### heading");
}

#[test]
fn plain_text_strips_everything() {
    let doc = parse("A *b* with [link](/url) and `code`.");
    assert_snapshot!(render_plain_text(&doc), @"A b with link and code.");
}

#[test]
fn html_paragraph() {
    let doc = parse("tiny *doc*");
    assert_snapshot!(render_html(&doc).trim_end(), @"<p>tiny <em>doc</em></p>");
}

#[test]
fn html_quoted_span_after_pass() {
    let doc = parse("say “less”").parse_quotes();
    assert_snapshot!(
        render_html(&doc).trim_end(),
        @r#"<p>say <span class="quoted">“less”</span></p>"#
    );
}

#[test]
fn html_latex_span_after_pass() {
    let doc = parse(r"sum \\(a+b\\)").extract_latex();
    assert_snapshot!(
        render_html(&doc).trim_end(),
        @r#"<p>sum <span class="math inline">\(a+b\)</span></p>"#
    );
}
