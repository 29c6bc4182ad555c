//! # Tree Rewrite Infrastructure
//!
//! Generic, pure, bottom-up tree transforms over [`Block`] and [`Inline`]
//! sequences, with one-to-many replacement: a transform returns zero, one or
//! many nodes for each node it visits, so a single text leaf can split into
//! several siblings.
//!
//! For every composite node the children are rewritten first, the node is
//! rebuilt with the new children, and only then is the transform applied to
//! the rebuilt node. Transforms must be pure (no shared mutable state) so
//! repeated application is deterministic and independent trees can be
//! rewritten concurrently. The identity transform `|n| vec![n]` returns a
//! tree deeply equal to its input.

use crate::ast::{Block, Inline, ListItem, TableCell, TableRow, TaskListItem};

/// Rewrites a block sequence bottom-up with `f`.
pub fn rewrite_blocks<F>(blocks: Vec<Block>, f: &F) -> Vec<Block>
where
    F: Fn(Block) -> Vec<Block>,
{
    blocks
        .into_iter()
        .flat_map(|block| rewrite_block(block, f))
        .collect()
}

fn rewrite_block<F>(block: Block, f: &F) -> Vec<Block>
where
    F: Fn(Block) -> Vec<Block>,
{
    match block {
        Block::Blockquote { children } => f(Block::Blockquote {
            children: rewrite_blocks(children, f),
        }),
        Block::BulletedList { tight, items } => f(Block::BulletedList {
            tight,
            items: items
                .into_iter()
                .map(|item| ListItem::new(rewrite_blocks(item.children, f)))
                .collect(),
        }),
        Block::NumberedList {
            tight,
            start,
            items,
        } => f(Block::NumberedList {
            tight,
            start,
            items: items
                .into_iter()
                .map(|item| ListItem::new(rewrite_blocks(item.children, f)))
                .collect(),
        }),
        Block::TaskList { tight, items } => f(Block::TaskList {
            tight,
            items: items
                .into_iter()
                .map(|item| TaskListItem::new(item.checked, rewrite_blocks(item.children, f)))
                .collect(),
        }),
        leaf => f(leaf),
    }
}

/// Rewrites an inline sequence bottom-up with `f`.
pub fn rewrite_inlines<F>(inlines: Vec<Inline>, f: &F) -> Vec<Inline>
where
    F: Fn(Inline) -> Vec<Inline>,
{
    inlines
        .into_iter()
        .flat_map(|inline| rewrite_inline(inline, f))
        .collect()
}

fn rewrite_inline<F>(inline: Inline, f: &F) -> Vec<Inline>
where
    F: Fn(Inline) -> Vec<Inline>,
{
    match inline {
        Inline::Emphasis { children } => f(Inline::Emphasis {
            children: rewrite_inlines(children, f),
        }),
        Inline::Strong { children } => f(Inline::Strong {
            children: rewrite_inlines(children, f),
        }),
        Inline::Strikethrough { children } => f(Inline::Strikethrough {
            children: rewrite_inlines(children, f),
        }),
        Inline::Link {
            destination,
            children,
        } => f(Inline::Link {
            destination,
            children: rewrite_inlines(children, f),
        }),
        Inline::Image { source, children } => f(Inline::Image {
            source,
            children: rewrite_inlines(children, f),
        }),
        Inline::Quoted { children } => f(Inline::Quoted {
            children: rewrite_inlines(children, f),
        }),
        leaf => f(leaf),
    }
}

/// Rewrites every inline reachable from a block sequence: paragraph and
/// heading content, table cells, and everything nested in containers. The
/// block structure itself is rebuilt unchanged.
pub fn rewrite_block_inlines<F>(blocks: Vec<Block>, f: &F) -> Vec<Block>
where
    F: Fn(Inline) -> Vec<Inline>,
{
    blocks
        .into_iter()
        .map(|block| rewrite_block_inline(block, f))
        .collect()
}

fn rewrite_block_inline<F>(block: Block, f: &F) -> Block
where
    F: Fn(Inline) -> Vec<Inline>,
{
    match block {
        Block::Blockquote { children } => Block::Blockquote {
            children: rewrite_block_inlines(children, f),
        },
        Block::BulletedList { tight, items } => Block::BulletedList {
            tight,
            items: items
                .into_iter()
                .map(|item| ListItem::new(rewrite_block_inlines(item.children, f)))
                .collect(),
        },
        Block::NumberedList {
            tight,
            start,
            items,
        } => Block::NumberedList {
            tight,
            start,
            items: items
                .into_iter()
                .map(|item| ListItem::new(rewrite_block_inlines(item.children, f)))
                .collect(),
        },
        Block::TaskList { tight, items } => Block::TaskList {
            tight,
            items: items
                .into_iter()
                .map(|item| {
                    TaskListItem::new(item.checked, rewrite_block_inlines(item.children, f))
                })
                .collect(),
        },
        Block::Paragraph { content } => Block::Paragraph {
            content: rewrite_inlines(content, f),
        },
        Block::Heading { level, content } => Block::Heading {
            level,
            content: rewrite_inlines(content, f),
        },
        Block::Table {
            column_alignments,
            rows,
        } => Block::Table {
            column_alignments,
            rows: rows
                .into_iter()
                .map(|row| TableRow {
                    cells: row
                        .cells
                        .into_iter()
                        .map(|cell| TableCell {
                            content: rewrite_inlines(cell.content, f),
                        })
                        .collect(),
                })
                .collect(),
        },
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parsing::parse;

    const SAMPLE: &str = "# Title\n\n> a *quote*\n\n- one\n- two **bold**\n\n| a | b |\n| --- | --- |\n| 1 | 2 |";

    #[test]
    fn block_identity_law() {
        let doc = parse(SAMPLE);
        let rewritten = rewrite_blocks(doc.blocks.clone(), &|block| vec![block]);
        assert_eq!(rewritten, doc.blocks);
    }

    #[test]
    fn inline_identity_law() {
        let doc = parse(SAMPLE);
        let rewritten = rewrite_block_inlines(doc.blocks.clone(), &|inline| vec![inline]);
        assert_eq!(rewritten, doc.blocks);
    }

    #[test]
    fn block_transform_can_drop_nodes() {
        let doc = parse("para\n\n---\n\npara");
        let rewritten = rewrite_blocks(doc.blocks, &|block| match block {
            Block::ThematicBreak => vec![],
            other => vec![other],
        });
        assert_eq!(rewritten.len(), 2);
    }

    #[test]
    fn inline_transform_can_split_a_leaf() {
        let doc = parse("one two");
        let rewritten = rewrite_block_inlines(doc.blocks, &|inline| match inline {
            Inline::Text(text) => text
                .split_whitespace()
                .map(|word| Inline::text(word))
                .collect(),
            other => vec![other],
        });
        assert_eq!(
            rewritten,
            vec![Block::Paragraph {
                content: vec![Inline::text("one"), Inline::text("two")]
            }]
        );
    }

    #[test]
    fn bottom_up_order_sees_rewritten_children() {
        // The transform wraps emphasis in strong; children visited first
        // means the wrapped node already carries transformed children.
        let doc = parse("*a b*");
        let rewritten = rewrite_block_inlines(doc.blocks, &|inline| match inline {
            Inline::Text(text) => vec![Inline::Text(text.to_uppercase())],
            other => vec![other],
        });
        assert_eq!(
            rewritten,
            vec![Block::Paragraph {
                content: vec![Inline::Emphasis {
                    children: vec![Inline::text("A B")]
                }]
            }]
        );
    }

    #[test]
    fn rewrite_reaches_table_cells_and_list_items() {
        let doc = parse("- cell *x*\n\n| *y* |\n| --- |");
        let count = std::cell::Cell::new(0usize);
        // Counting through a Cell is fine for a test; the production
        // contract still demands pure transforms.
        rewrite_block_inlines(doc.blocks, &|inline| {
            if matches!(inline, Inline::Emphasis { .. }) {
                count.set(count.get() + 1);
            }
            vec![inline]
        });
        assert_eq!(count.get(), 2);
    }
}
