//! Markdown parsing, tree-rewrite and serialization engine.
//!
//! Text goes in, a typed immutable tree comes out, the tree can be rewritten
//! by pure passes, and serialized back to Markdown, plain text or HTML:
//!
//! ```rust
//! use markdown_arbor_engine::{parse, render_html};
//!
//! let doc = parse("# Hi\n\nSome *emphasis*.");
//! assert_eq!(
//!     render_html(&doc),
//!     "<h1>Hi</h1>\n<p>Some <em>emphasis</em>.</p>\n"
//! );
//! ```
//!
//! The extension passes are plain functions from tree to tree:
//!
//! ```rust
//! use markdown_arbor_engine::{Inline, parse_quotes};
//!
//! let inlines = vec![Inline::text("He said “hi” to me")];
//! let rewritten = parse_quotes(inlines);
//! assert_eq!(rewritten.len(), 3);
//! ```

pub mod ast;
pub mod parsing;
pub mod passes;
pub mod render;
pub mod rewrite;

pub use ast::{
    Block, ColumnAlignment, Document, Inline, InvalidAlignmentChar, ListItem, TableCell, TableRow,
    TaskListItem,
};
pub use parsing::{Extensions, MarkdownParser, parse};
pub use passes::{extract_latex, parse_quotes};
pub use render::{render_html, render_markdown, render_plain_text};
pub use rewrite::{rewrite_block_inlines, rewrite_blocks, rewrite_inlines};
