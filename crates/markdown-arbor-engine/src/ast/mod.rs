//! # Typed Markdown AST
//!
//! The closed node taxonomy every other module operates on. Two categories:
//!
//! - **[`Block`]**: structural nodes (paragraphs, lists, tables, ...)
//! - **[`Inline`]**: text-flow nodes (emphasis, links, code spans, ...)
//!
//! Trees are plain owned values: acyclic, strictly downward ownership, no
//! interior mutability. Once built they are never mutated in place. The
//! rewrite passes in [`crate::rewrite`] and [`crate::passes`] always allocate
//! new trees, so any number of consumers can hold the same tree across
//! threads without synchronization.

pub mod block;
pub mod inline;

pub use block::{
    Block, ColumnAlignment, InvalidAlignmentChar, ListItem, TableCell, TableRow, TaskListItem,
};
pub use inline::Inline;

use serde::Serialize;

/// A parsed Markdown document: a sequence of top-level blocks.
///
/// Produced by [`crate::parse`] (or assembled directly from literal nodes)
/// and consumed by the serializers in [`crate::render`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parses Markdown source with all extensions enabled.
    pub fn parse(text: &str) -> Self {
        crate::parsing::parse(text)
    }

    /// Runs the LaTeX-extraction pass, producing a new document.
    pub fn extract_latex(self) -> Self {
        Self {
            blocks: crate::rewrite::rewrite_block_inlines(self.blocks, &|inline| {
                crate::passes::latex::extract_from(inline)
            }),
        }
    }

    /// Runs the quoted-span detection pass, producing a new document.
    pub fn parse_quotes(self) -> Self {
        Self {
            blocks: crate::rewrite::rewrite_block_inlines(self.blocks, &|inline| {
                crate::passes::quotes::detect_in(inline)
            }),
        }
    }

    pub fn render_markdown(&self) -> String {
        crate::render::render_markdown(self)
    }

    pub fn render_plain_text(&self) -> String {
        crate::render::render_plain_text(self)
    }

    pub fn render_html(&self) -> String {
        crate::render::render_html(self)
    }
}
