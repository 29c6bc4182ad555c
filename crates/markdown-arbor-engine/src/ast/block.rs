use serde::Serialize;

use crate::ast::inline::Inline;

/// A structural (block-level) Markdown node.
///
/// The taxonomy is closed: serializers and the rewrite infrastructure match
/// exhaustively over it, so an unhandled kind is unrepresentable rather than
/// a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Blockquote {
        children: Vec<Block>,
    },
    BulletedList {
        tight: bool,
        items: Vec<ListItem>,
    },
    NumberedList {
        tight: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    TaskList {
        tight: bool,
        items: Vec<TaskListItem>,
    },
    /// `fence_info` is `Some` for fenced code (possibly empty, captured
    /// verbatim from the opening fence) and `None` for indented code.
    CodeBlock {
        fence_info: Option<String>,
        content: String,
    },
    HtmlBlock {
        content: String,
    },
    Paragraph {
        content: Vec<Inline>,
    },
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    Table {
        column_alignments: Vec<ColumnAlignment>,
        rows: Vec<TableRow>,
    },
    ThematicBreak,
}

impl Block {
    /// Builds a heading, failing fast on a level outside 1..=6.
    ///
    /// An out-of-range level can only come from a caller bug, never from
    /// parsed input, so this panics instead of returning a `Result`.
    pub fn heading(level: u8, content: Vec<Inline>) -> Self {
        assert!(
            (1..=6).contains(&level),
            "heading level must be in 1..=6, got {level}"
        );
        Self::Heading { level, content }
    }

    /// Builds a bulleted list, demoting `tight` to loose when any item holds
    /// more than one paragraph. The demotion happens here, once, and is never
    /// reversed.
    pub fn bulleted_list(tight: bool, items: Vec<ListItem>) -> Self {
        let tight = tight && items.iter().all(|item| at_most_one_paragraph(&item.children));
        Self::BulletedList { tight, items }
    }

    /// Builds a numbered list; same tightness demotion as [`Self::bulleted_list`].
    pub fn numbered_list(tight: bool, start: u64, items: Vec<ListItem>) -> Self {
        let tight = tight && items.iter().all(|item| at_most_one_paragraph(&item.children));
        Self::NumberedList { tight, start, items }
    }

    /// Builds a task list; same tightness demotion as [`Self::bulleted_list`].
    pub fn task_list(tight: bool, items: Vec<TaskListItem>) -> Self {
        let tight = tight && items.iter().all(|item| at_most_one_paragraph(&item.children));
        Self::TaskList { tight, items }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph { .. })
    }
}

fn at_most_one_paragraph(children: &[Block]) -> bool {
    children.iter().filter(|b| b.is_paragraph()).count() <= 1
}

/// An item of a bulleted or numbered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ListItem {
    pub children: Vec<Block>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// An item of a task list, carrying its checkbox state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskListItem {
    pub checked: bool,
    pub children: Vec<Block>,
}

impl TaskListItem {
    pub fn new(checked: bool, children: Vec<Block>) -> Self {
        Self { checked, children }
    }
}

/// Per-column alignment of a table, as declared by its delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// A column alignment wire character that is not `'l'`, `'c'`, `'r'` or NUL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid column alignment marker {0:?}")]
pub struct InvalidAlignmentChar(pub char);

impl ColumnAlignment {
    /// The compact single-character wire form, `None` for unaligned columns.
    pub fn wire_char(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Left => Some('l'),
            Self::Center => Some('c'),
            Self::Right => Some('r'),
        }
    }
}

impl TryFrom<char> for ColumnAlignment {
    type Error = InvalidAlignmentChar;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '\0' => Ok(Self::None),
            'l' => Ok(Self::Left),
            'c' => Ok(Self::Center),
            'r' => Ok(Self::Right),
            other => Err(InvalidAlignmentChar(other)),
        }
    }
}

/// One table row. The header is row 0; all rows have exactly as many cells
/// as the table has column alignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// One table cell: an independent inline sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableCell {
    pub content: Vec<Inline>,
}
