//! The AST builder: maps the generic parse tree into the typed taxonomy.
//!
//! Every raw node kind has exactly one typed counterpart, so drift between
//! the block phase and this module is a compile error, not a runtime
//! condition. Per-kind metadata is resolved here: list disambiguation
//! (checkbox beats bullet/ordered), ordered start numbers, fence info
//! strings, wire alignment characters, and the inline parse of leaf text.

use crate::ast::{Block, ColumnAlignment, ListItem, TableCell, TableRow, TaskListItem};

use super::blocks::tree::{RawBlock, RawList};
use super::inline::{InlineContext, parse_inlines};
use super::{Extensions, RefMap};

pub(crate) fn lower_document(
    raw: Vec<RawBlock>,
    refs: &RefMap,
    extensions: Extensions,
) -> Vec<Block> {
    let ctx = InlineContext { refs, extensions };
    raw.into_iter().map(|block| lower_block(block, &ctx)).collect()
}

fn lower_block(raw: RawBlock, ctx: &InlineContext) -> Block {
    match raw {
        RawBlock::Blockquote { children } => Block::Blockquote {
            children: children
                .into_iter()
                .map(|child| lower_block(child, ctx))
                .collect(),
        },
        RawBlock::List(list) => lower_list(list, ctx),
        RawBlock::CodeBlock {
            fence_info,
            content,
        } => Block::CodeBlock {
            fence_info,
            content,
        },
        RawBlock::HtmlBlock { content } => Block::HtmlBlock { content },
        RawBlock::Paragraph { text } => Block::Paragraph {
            content: parse_inlines(&text, ctx),
        },
        RawBlock::Heading { level, text } => Block::heading(level, parse_inlines(&text, ctx)),
        RawBlock::Table { alignments, rows } => lower_table(alignments, rows, ctx),
        RawBlock::ThematicBreak => Block::ThematicBreak,
    }
}

/// A checkbox on any item makes the whole list a task list, taking
/// precedence over the bullet/ordered distinction.
fn lower_list(list: RawList, ctx: &InlineContext) -> Block {
    if list.items.iter().any(|item| item.checkbox.is_some()) {
        let items = list
            .items
            .into_iter()
            .map(|item| {
                TaskListItem::new(
                    item.checkbox.unwrap_or(false),
                    lower_children(item.children, ctx),
                )
            })
            .collect();
        return Block::task_list(list.tight, items);
    }
    let items: Vec<ListItem> = list
        .items
        .into_iter()
        .map(|item| ListItem::new(lower_children(item.children, ctx)))
        .collect();
    if list.ordered {
        Block::numbered_list(list.tight, list.start, items)
    } else {
        Block::bulleted_list(list.tight, items)
    }
}

fn lower_children(children: Vec<RawBlock>, ctx: &InlineContext) -> Vec<Block> {
    children
        .into_iter()
        .map(|child| lower_block(child, ctx))
        .collect()
}

/// Ragged rows are normalized here: short rows are padded with empty cells,
/// long rows truncated, so every row matches the alignment count.
fn lower_table(alignments: Vec<char>, rows: Vec<Vec<String>>, ctx: &InlineContext) -> Block {
    let column_alignments: Vec<ColumnAlignment> = alignments
        .into_iter()
        .map(|c| ColumnAlignment::try_from(c).unwrap_or_default())
        .collect();
    let width = column_alignments.len();
    let rows = rows
        .into_iter()
        .map(|mut cells| {
            cells.resize(width, String::new());
            TableRow {
                cells: cells
                    .into_iter()
                    .map(|text| TableCell {
                        content: parse_inlines(&text, ctx),
                    })
                    .collect(),
            }
        })
        .collect();
    Block::Table {
        column_alignments,
        rows,
    }
}
