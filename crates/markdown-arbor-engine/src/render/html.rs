use std::fmt::Write as _;

use crate::ast::{Block, ColumnAlignment, Document, Inline, TableRow, TaskListItem};

/// Renders a document as HTML, one tag shape per node kind. Text content is
/// escaped; raw HTML passes through the GFM tagfilter.
pub fn render_html(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        render_block(&mut out, block);
    }
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Blockquote { children } => {
            out.push_str("<blockquote>\n");
            for child in children {
                render_block(out, child);
            }
            out.push_str("</blockquote>\n");
        }
        Block::BulletedList { tight, items } => {
            out.push_str("<ul>\n");
            for item in items {
                render_list_item(out, None, &item.children, *tight);
            }
            out.push_str("</ul>\n");
        }
        Block::NumberedList {
            tight,
            start,
            items,
        } => {
            if *start == 1 {
                out.push_str("<ol>\n");
            } else {
                let _ = writeln!(out, "<ol start=\"{start}\">");
            }
            for item in items {
                render_list_item(out, None, &item.children, *tight);
            }
            out.push_str("</ol>\n");
        }
        Block::TaskList { tight, items } => {
            out.push_str("<ul>\n");
            for item in items {
                render_list_item(out, Some(checkbox(item)), &item.children, *tight);
            }
            out.push_str("</ul>\n");
        }
        Block::CodeBlock {
            fence_info,
            content,
        } => {
            match fence_info
                .as_deref()
                .and_then(|info| info.split_whitespace().next())
            {
                Some(language) => {
                    let _ = write!(
                        out,
                        "<pre><code class=\"language-{}\">",
                        html_escape::encode_double_quoted_attribute(language)
                    );
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&html_escape::encode_text(content));
            out.push_str("</code></pre>\n");
        }
        Block::HtmlBlock { content } => {
            out.push_str(&tagfilter(content));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            render_inlines(out, content);
            out.push_str("</p>\n");
        }
        Block::Heading { level, content } => {
            let _ = write!(out, "<h{level}>");
            render_inlines(out, content);
            let _ = writeln!(out, "</h{level}>");
        }
        Block::Table {
            column_alignments,
            rows,
        } => render_table(out, column_alignments, rows),
        Block::ThematicBreak => out.push_str("<hr />\n"),
    }
}

fn checkbox(item: &TaskListItem) -> &'static str {
    if item.checked {
        "<input type=\"checkbox\" checked=\"\" disabled=\"\" /> "
    } else {
        "<input type=\"checkbox\" disabled=\"\" /> "
    }
}

/// Tight items inline their paragraph content; loose items keep full block
/// rendering inside `<li>`.
fn render_list_item(out: &mut String, prefix: Option<&'static str>, children: &[Block], tight: bool) {
    out.push_str("<li>");
    if let Some(prefix) = prefix {
        out.push_str(prefix);
    }
    if tight {
        let mut first = true;
        for child in children {
            match child {
                Block::Paragraph { content } => {
                    if !first {
                        out.push('\n');
                    }
                    render_inlines(out, content);
                }
                other => {
                    out.push('\n');
                    render_block(out, other);
                }
            }
            first = false;
        }
    } else {
        out.push('\n');
        for child in children {
            render_block(out, child);
        }
    }
    out.push_str("</li>\n");
}

fn render_table(out: &mut String, alignments: &[ColumnAlignment], rows: &[TableRow]) {
    out.push_str("<table>\n");
    if let Some(header) = rows.first() {
        out.push_str("<thead>\n<tr>\n");
        for (cell, align) in header.cells.iter().zip(alignments) {
            out.push_str(&open_cell_tag("th", align));
            render_inlines(out, &cell.content);
            out.push_str("</th>\n");
        }
        out.push_str("</tr>\n</thead>\n");
    }
    if rows.len() > 1 {
        out.push_str("<tbody>\n");
        for row in &rows[1..] {
            out.push_str("<tr>\n");
            for (cell, align) in row.cells.iter().zip(alignments) {
                out.push_str(&open_cell_tag("td", align));
                render_inlines(out, &cell.content);
                out.push_str("</td>\n");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

fn open_cell_tag(tag: &str, align: &ColumnAlignment) -> String {
    match align {
        ColumnAlignment::None => format!("<{tag}>"),
        ColumnAlignment::Left => format!("<{tag} align=\"left\">"),
        ColumnAlignment::Center => format!("<{tag} align=\"center\">"),
        ColumnAlignment::Right => format!("<{tag} align=\"right\">"),
    }
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        render_inline(out, inline);
    }
}

fn render_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Inline::SoftBreak => out.push('\n'),
        Inline::LineBreak => out.push_str("<br />\n"),
        Inline::Code(code) => {
            out.push_str("<code>");
            out.push_str(&html_escape::encode_text(code));
            out.push_str("</code>");
        }
        Inline::Html(html) => out.push_str(&tagfilter(html)),
        Inline::Emphasis { children } => wrap(out, "em", children),
        Inline::Strong { children } => wrap(out, "strong", children),
        Inline::Strikethrough { children } => wrap(out, "del", children),
        Inline::Link {
            destination,
            children,
        } => {
            let _ = write!(
                out,
                "<a href=\"{}\">",
                html_escape::encode_double_quoted_attribute(destination)
            );
            render_inlines(out, children);
            out.push_str("</a>");
        }
        Inline::Image { source, children } => {
            let alt = super::plain_text::render_plain_text(&Document::new(vec![Block::Paragraph {
                content: children.clone(),
            }]));
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\" />",
                html_escape::encode_double_quoted_attribute(source),
                html_escape::encode_double_quoted_attribute(&alt)
            );
        }
        Inline::Quoted { children } => {
            out.push_str("<span class=\"quoted\">");
            render_inlines(out, children);
            out.push_str("</span>");
        }
        Inline::Latex { content, display } => {
            let class = if *display { "display" } else { "inline" };
            let (open, close) = if *display {
                ("\\[", "\\]")
            } else {
                ("\\(", "\\)")
            };
            let _ = write!(out, "<span class=\"math {class}\">{open}");
            out.push_str(&html_escape::encode_text(content));
            out.push_str(close);
            out.push_str("</span>");
        }
    }
}

fn wrap(out: &mut String, tag: &str, children: &[Inline]) {
    let _ = write!(out, "<{tag}>");
    render_inlines(out, children);
    let _ = write!(out, "</{tag}>");
}

/// The GFM tagfilter: certain raw HTML tags are disarmed by escaping their
/// opening angle bracket.
const FILTERED_TAGS: &[&str] = &[
    "title",
    "textarea",
    "style",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "script",
    "plaintext",
];

fn tagfilter(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' && is_filtered_at(html, i) {
            out.push_str("&lt;");
            i += 1;
        } else {
            let c = html[i..].chars().next().expect("char boundary");
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}

fn is_filtered_at(html: &str, at: usize) -> bool {
    let rest = &html[at + 1..];
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    FILTERED_TAGS.iter().any(|tag| {
        rest.len() >= tag.len()
            && rest[..tag.len()].eq_ignore_ascii_case(tag)
            && rest[tag.len()..]
                .chars()
                .next()
                .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/')
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parsing::parse;

    #[test]
    fn paragraph_and_heading() {
        let doc = parse("# Title\n\nHello *world*.");
        assert_eq!(
            render_html(&doc),
            "<h1>Title</h1>\n<p>Hello <em>world</em>.</p>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        let doc = parse("a < b & c");
        assert_eq!(render_html(&doc), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn tight_list_unwraps_paragraphs() {
        let doc = parse("- one\n- two");
        assert_eq!(
            render_html(&doc),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn loose_list_keeps_paragraphs() {
        let doc = parse("- one\n\n- two");
        assert_eq!(
            render_html(&doc),
            "<ul>\n<li>\n<p>one</p>\n</li>\n<li>\n<p>two</p>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn ordered_list_start_attribute() {
        let doc = parse("7. seven\n8. eight");
        assert_eq!(
            render_html(&doc),
            "<ol start=\"7\">\n<li>seven</li>\n<li>eight</li>\n</ol>\n"
        );
    }

    #[test]
    fn task_list_checkboxes() {
        let doc = parse("- [x] done\n- [ ] todo");
        assert_eq!(
            render_html(&doc),
            "<ul>\n<li><input type=\"checkbox\" checked=\"\" disabled=\"\" /> done</li>\n<li><input type=\"checkbox\" disabled=\"\" /> todo</li>\n</ul>\n"
        );
    }

    #[test]
    fn code_block_with_language_class() {
        let doc = parse("```rust\nfn main() {}\n```");
        assert_eq!(
            render_html(&doc),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn table_with_alignment_attributes() {
        let doc = parse("| a | b |\n| :-- | --- |\n| 1 | 2 |");
        assert_eq!(
            render_html(&doc),
            "<table>\n<thead>\n<tr>\n<th align=\"left\">a</th>\n<th>b</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td align=\"left\">1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn image_alt_uses_plain_text_of_children() {
        let doc = parse("![an *alt*](/pic.png)");
        assert_eq!(
            render_html(&doc),
            "<p><img src=\"/pic.png\" alt=\"an alt\" /></p>\n"
        );
    }

    #[test]
    fn tagfilter_disarms_script_tags() {
        let doc = parse("<script>alert(1)</script>\n\nfine <b>bold</b>");
        assert_eq!(
            render_html(&doc),
            "&lt;script>alert(1)&lt;/script>\n<p>fine <b>bold</b></p>\n"
        );
    }

    #[test]
    fn tagfilter_is_case_insensitive() {
        assert_eq!(tagfilter("<SCRIPT>x"), "&lt;SCRIPT>x");
        assert_eq!(tagfilter("<scripting>x"), "<scripting>x");
    }

    #[test]
    fn hard_break_tag() {
        let doc = parse("a  \nb");
        assert_eq!(render_html(&doc), "<p>a<br />\nb</p>\n");
    }

    #[test]
    fn blockquote_wraps_children() {
        let doc = parse("> hi");
        assert_eq!(render_html(&doc), "<blockquote>\n<p>hi</p>\n</blockquote>\n");
    }

    #[test]
    fn thematic_break_tag() {
        let doc = parse("---");
        assert_eq!(render_html(&doc), "<hr />\n");
    }
}
