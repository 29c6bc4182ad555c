//! The generic intermediate parse tree emitted by the block phase.
//!
//! Deliberately untyped where the final AST is typed: lists are one node
//! kind regardless of marker family or checkboxes, leaf text is still raw,
//! and table alignments are wire characters. [`crate::parsing::lower`] maps
//! this tree into the taxonomy.

/// A block-phase parse node. Leaf text has not been inline-parsed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBlock {
    Blockquote {
        children: Vec<RawBlock>,
    },
    List(RawList),
    CodeBlock {
        fence_info: Option<String>,
        content: String,
    },
    HtmlBlock {
        content: String,
    },
    Paragraph {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    Table {
        /// Wire alignment characters from the delimiter row.
        alignments: Vec<char>,
        /// Raw cell text, row 0 being the header. Rows may still be ragged
        /// here; the AST builder normalizes them.
        rows: Vec<Vec<String>>,
    },
    ThematicBreak,
}

/// An undifferentiated list node: bulleted, numbered and task lists all
/// look the same at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawList {
    pub ordered: bool,
    pub start: u64,
    pub tight: bool,
    pub items: Vec<RawListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListItem {
    /// Checkbox state stripped from the item's first line, when the
    /// task-list extension is active.
    pub checkbox: Option<bool>,
    pub children: Vec<RawBlock>,
}
