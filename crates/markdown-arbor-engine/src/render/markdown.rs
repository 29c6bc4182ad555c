use std::sync::OnceLock;

use regex::Regex;

use crate::ast::{Block, ColumnAlignment, Document, Inline};

/// Renders a document back to Markdown.
///
/// Round-trip oriented: re-parsing the output produces a tree equal to the
/// input. Byte identity with the original source is explicitly not a goal;
/// markers are normalized (`-` bullets, `*` emphasis, backtick fences) and
/// text is conservatively escaped.
pub fn render_markdown(doc: &Document) -> String {
    render_blocks(&doc.blocks, "\n\n")
}

fn render_blocks(blocks: &[Block], separator: &str) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Blockquote { children } => {
            prefix_lines(&render_blocks(children, "\n\n"), "> ", "> ")
        }
        Block::BulletedList { tight, items } => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_item("- ", &item.children, *tight))
                .collect();
            rendered.join(if *tight { "\n" } else { "\n\n" })
        }
        Block::NumberedList {
            tight,
            start,
            items,
        } => {
            let rendered: Vec<String> = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let marker = format!("{}. ", start + i as u64);
                    render_item(&marker, &item.children, *tight)
                })
                .collect();
            rendered.join(if *tight { "\n" } else { "\n\n" })
        }
        Block::TaskList { tight, items } => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| {
                    let marker = if item.checked { "- [x] " } else { "- [ ] " };
                    render_task_item(marker, &item.children, *tight)
                })
                .collect();
            rendered.join(if *tight { "\n" } else { "\n\n" })
        }
        Block::CodeBlock {
            fence_info,
            content,
        } => match fence_info {
            Some(info) => {
                let fence = "`".repeat(longest_run(content, '`').max(2) + 1);
                let mut out = format!("{fence}{info}\n{content}");
                if !content.is_empty() && !content.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&fence);
                out
            }
            None => prefix_lines(content.trim_end_matches('\n'), "    ", "    "),
        },
        Block::HtmlBlock { content } => content.trim_end_matches('\n').to_string(),
        Block::Paragraph { content } => escape_ordered_marker(&render_inlines(content)),
        Block::Heading { level, content } => {
            format!(
                "{} {}",
                "#".repeat(usize::from(*level)),
                render_inlines(content)
            )
        }
        Block::Table {
            column_alignments,
            rows,
        } => render_table(column_alignments, rows),
        Block::ThematicBreak => "---".to_string(),
    }
}

fn render_item(marker: &str, children: &[Block], tight: bool) -> String {
    let body = render_blocks(children, if tight { "\n" } else { "\n\n" });
    let continuation = " ".repeat(marker.len());
    prefix_lines(&body, marker, &continuation)
}

/// Task items indent continuation lines to the bullet width, not the
/// checkbox width: the checkbox is item content, so two columns suffice on
/// re-parse.
fn render_task_item(marker: &str, children: &[Block], tight: bool) -> String {
    let body = render_blocks(children, if tight { "\n" } else { "\n\n" });
    prefix_lines(&body, marker, "  ")
}

fn render_table(alignments: &[ColumnAlignment], rows: &[crate::ast::TableRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    let render_row = |row: &crate::ast::TableRow| {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| escape_cell(&render_inlines(&cell.content)))
            .collect();
        format!("| {} |", cells.join(" | "))
    };
    if let Some(header) = rows.first() {
        lines.push(render_row(header));
    }
    let delimiter: Vec<&str> = alignments
        .iter()
        .map(|align| match align {
            ColumnAlignment::None => "---",
            ColumnAlignment::Left => ":--",
            ColumnAlignment::Center => ":-:",
            ColumnAlignment::Right => "--:",
        })
        .collect();
    lines.push(format!("| {} |", delimiter.join(" | ")));
    for row in rows.iter().skip(1) {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

fn render_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(render_inline).collect()
}

fn render_inline(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => escape_text(text),
        Inline::SoftBreak => "\n".to_string(),
        Inline::LineBreak => "\\\n".to_string(),
        Inline::Code(code) => render_code_span(code),
        Inline::Html(html) => html.clone(),
        Inline::Emphasis { children } => format!("*{}*", render_inlines(children)),
        Inline::Strong { children } => format!("**{}**", render_inlines(children)),
        Inline::Strikethrough { children } => format!("~~{}~~", render_inlines(children)),
        Inline::Link {
            destination,
            children,
        } => render_link(destination, children),
        Inline::Image { source, children } => {
            format!("![{}]({})", render_inlines(children), render_destination(source))
        }
        Inline::Quoted { children } => render_inlines(children),
        Inline::Latex { content, display } => {
            if *display {
                format!("\\[{content}\\]")
            } else {
                format!("\\({content}\\)")
            }
        }
    }
}

fn render_link(destination: &str, children: &[Inline]) -> String {
    if let [Inline::Text(text)] = children {
        // Autolinks round-trip through their original spellings.
        if text == destination && destination.contains(':') && !destination.contains(char::is_whitespace) {
            return format!("<{destination}>");
        }
        if destination.strip_prefix("mailto:") == Some(text) {
            return format!("<{text}>");
        }
        if destination.strip_prefix("http://") == Some(text) && text.starts_with("www.") {
            return text.clone();
        }
    }
    format!(
        "[{}]({})",
        render_inlines(children),
        render_destination(destination)
    )
}

fn render_destination(destination: &str) -> String {
    if destination.is_empty()
        || destination.contains(char::is_whitespace)
        || destination.contains('(')
        || destination.contains(')')
    {
        format!("<{destination}>")
    } else {
        destination.to_string()
    }
}

fn render_code_span(code: &str) -> String {
    if code.is_empty() {
        return "` `".to_string();
    }
    let fence = "`".repeat(longest_run(code, '`') + 1);
    let pad = code.starts_with('`')
        || code.ends_with('`')
        || code.starts_with(' ')
        || code.ends_with(' ');
    if pad {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn longest_run(text: &str, target: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == target {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Backslash-escapes the characters that could re-parse as structure.
/// Deliberately conservative: escaped punctuation always re-parses to the
/// literal character.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '~' | '-' | '+'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A paragraph line starting with `7.` would re-parse as an ordered list;
/// a backslash before the delimiter keeps it text.
fn escape_ordered_marker(paragraph: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?m)^(\d{1,9})([.)])").expect("ordered marker pattern"));
    re.replace_all(paragraph, r"$1\$2").to_string()
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Prefixes every line of `text`; trailing whitespace is trimmed from the
/// prefix on blank lines so blockquote markers do not leave dangling spaces.
fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let prefix = if i == 0 { first } else { rest };
        if line.is_empty() {
            out.push_str(prefix.trim_end());
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}
