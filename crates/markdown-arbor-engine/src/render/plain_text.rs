use crate::ast::{Block, Document, Inline};

/// Renders a document as plain text: markers dropped, literal content kept.
pub fn render_plain_text(doc: &Document) -> String {
    render_blocks(&doc.blocks)
}

fn render_blocks(blocks: &[Block]) -> String {
    let rendered: Vec<String> = blocks
        .iter()
        .map(render_block)
        .filter(|text| !text.is_empty())
        .collect();
    rendered.join("\n\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Blockquote { children } => render_blocks(children),
        Block::BulletedList { items, .. } | Block::NumberedList { items, .. } => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_blocks(&item.children))
                .filter(|text| !text.is_empty())
                .collect();
            rendered.join("\n")
        }
        Block::TaskList { items, .. } => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render_blocks(&item.children))
                .filter(|text| !text.is_empty())
                .collect();
            rendered.join("\n")
        }
        Block::CodeBlock { content, .. } => content.trim_end_matches('\n').to_string(),
        Block::HtmlBlock { .. } => String::new(),
        Block::Paragraph { content } | Block::Heading { content, .. } => render_inlines(content),
        Block::Table { rows, .. } => {
            let rendered: Vec<String> = rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| render_inlines(&cell.content))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            rendered.join("\n")
        }
        Block::ThematicBreak => String::new(),
    }
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        render_inline(inline, &mut out);
    }
    out
}

fn render_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::SoftBreak => out.push(' '),
        Inline::LineBreak => out.push('\n'),
        Inline::Code(code) => out.push_str(code),
        Inline::Html(_) => {}
        Inline::Image { .. } => {}
        Inline::Latex { content, .. } => out.push_str(content),
        Inline::Emphasis { children }
        | Inline::Strong { children }
        | Inline::Strikethrough { children }
        | Inline::Link { children, .. }
        | Inline::Quoted { children } => {
            for child in children {
                render_inline(child, out);
            }
        }
    }
}
