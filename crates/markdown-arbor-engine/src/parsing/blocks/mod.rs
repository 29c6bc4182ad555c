//! # Block Parsing
//!
//! Phase 1 of the engine: recognizes block structure line by line.
//!
//! ## Phases
//!
//! 1. **Line classification** (`classify`): each line is reduced to local
//!    facts (blank, indentation, markers, fence signature) with no context.
//!
//! 2. **Block construction** (`builder`): a [`BlockBuilder`] walks the
//!    classified lines, tracking the open container context (blockquote,
//!    list, list item) and emitting the generic [`tree::RawBlock`] tree.
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific syntax with owned delimiters (blockquote
//!   markers, code fences, headings, list markers, tables, breaks)
//! - **`classify`**: [`classify::LineFacts`] per line
//! - **`builder`**: the container-stack state machine
//! - **`tree`**: the generic intermediate parse tree
//!
//! ## Key invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Fenced code blocks are raw zones: nothing inside them is parsed
//! - Blank lines terminate lazy paragraph continuation and make lists loose

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod tree;

pub use builder::BlockBuilder;
pub use classify::LineFacts;

use crate::parsing::{Extensions, RefMap};
use tree::RawBlock;

/// Runs the block phase over a whole source text.
pub(crate) fn parse_raw(text: &str, extensions: Extensions) -> (Vec<RawBlock>, RefMap) {
    BlockBuilder::new(extensions).build(text)
}

#[cfg(test)]
mod tests {
    use super::tree::RawBlock;
    use super::*;

    fn raw(text: &str) -> Vec<RawBlock> {
        parse_raw(text, Extensions::all()).0
    }

    #[test]
    fn empty_input_is_empty_tree() {
        assert_eq!(raw(""), vec![]);
        assert_eq!(raw("\n\n  \n"), vec![]);
    }

    #[test]
    fn paragraph_joins_lines() {
        assert_eq!(
            raw("one\ntwo"),
            vec![RawBlock::Paragraph {
                text: "one\ntwo".to_string()
            }]
        );
    }

    #[test]
    fn blank_line_splits_paragraphs() {
        assert_eq!(
            raw("one\n\ntwo"),
            vec![
                RawBlock::Paragraph {
                    text: "one".to_string()
                },
                RawBlock::Paragraph {
                    text: "two".to_string()
                },
            ]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        assert_eq!(
            raw("text\n# head"),
            vec![
                RawBlock::Paragraph {
                    text: "text".to_string()
                },
                RawBlock::Heading {
                    level: 1,
                    text: "head".to_string()
                },
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_content_verbatim() {
        assert_eq!(
            raw("```rust\nfn main() {}\n```"),
            vec![RawBlock::CodeBlock {
                fence_info: Some("rust".to_string()),
                content: "fn main() {}\n".to_string()
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        assert_eq!(
            raw("```\ncode"),
            vec![RawBlock::CodeBlock {
                fence_info: Some(String::new()),
                content: "code\n".to_string()
            }]
        );
    }

    #[test]
    fn fence_content_is_not_parsed() {
        assert_eq!(
            raw("```\n# not a heading\n> not a quote\n```"),
            vec![RawBlock::CodeBlock {
                fence_info: Some(String::new()),
                content: "# not a heading\n> not a quote\n".to_string()
            }]
        );
    }

    #[test]
    fn indented_code_strips_four_spaces() {
        assert_eq!(
            raw("    let x = 1;\n    let y = 2;"),
            vec![RawBlock::CodeBlock {
                fence_info: None,
                content: "let x = 1;\nlet y = 2;\n".to_string()
            }]
        );
    }

    #[test]
    fn blockquote_collects_marked_and_lazy_lines() {
        let blocks = raw("> quoted\nlazy line");
        match &blocks[..] {
            [RawBlock::Blockquote { children }] => {
                assert_eq!(
                    children,
                    &vec![RawBlock::Paragraph {
                        text: "quoted\nlazy line".to_string()
                    }]
                );
            }
            other => panic!("expected blockquote, got {other:?}"),
        }
    }

    #[test]
    fn nested_blockquote() {
        let blocks = raw("> > inner");
        match &blocks[..] {
            [RawBlock::Blockquote { children }] => {
                assert!(matches!(children[..], [RawBlock::Blockquote { .. }]));
            }
            other => panic!("expected blockquote, got {other:?}"),
        }
    }

    #[test]
    fn list_tightness_and_start() {
        let blocks = raw("7. seven\n8. eight");
        match &blocks[..] {
            [RawBlock::List(list)] => {
                assert!(list.ordered);
                assert_eq!(list.start, 7);
                assert!(list.tight);
                assert_eq!(list.items.len(), 2);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_between_items_makes_list_loose() {
        let blocks = raw("- one\n\n- two");
        match &blocks[..] {
            [RawBlock::List(list)] => {
                assert!(!list.tight);
                assert_eq!(list.items.len(), 2);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn nested_list_item_content() {
        let blocks = raw("- a\n  - b");
        match &blocks[..] {
            [RawBlock::List(list)] => {
                assert_eq!(list.items.len(), 1);
                assert!(matches!(
                    list.items[0].children[..],
                    [RawBlock::Paragraph { .. }, RawBlock::List(_)]
                ));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn task_checkbox_is_stripped_from_item_text() {
        let blocks = raw("- [x] done\n- [ ] todo");
        match &blocks[..] {
            [RawBlock::List(list)] => {
                assert_eq!(list.items[0].checkbox, Some(true));
                assert_eq!(list.items[1].checkbox, Some(false));
                assert_eq!(
                    list.items[0].children,
                    vec![RawBlock::Paragraph {
                        text: "done".to_string()
                    }]
                );
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn checkbox_ignored_without_tasklist_extension() {
        let mut exts = Extensions::all();
        exts.tasklist = false;
        let (blocks, _) = parse_raw("- [x] done", exts);
        match &blocks[..] {
            [RawBlock::List(list)] => {
                assert_eq!(list.items[0].checkbox, None);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn table_header_delimiter_and_rows() {
        let blocks = raw("| a | b | c |\n| --- | :-: | --: |\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |");
        match &blocks[..] {
            [RawBlock::Table { alignments, rows }] => {
                assert_eq!(alignments, &vec!['\0', 'c', 'r']);
                assert_eq!(rows.len(), 3);
                assert_eq!(rows[0], vec!["a", "b", "c"]);
                assert_eq!(rows[2], vec!["4", "5", "6"]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn column_count_mismatch_is_not_a_table() {
        let blocks = raw("| a | b |\n| --- |");
        assert!(matches!(blocks[..], [RawBlock::Paragraph { .. }]));
    }

    #[test]
    fn tables_disabled_without_extension() {
        let mut exts = Extensions::all();
        exts.table = false;
        let (blocks, _) = parse_raw("| a |\n| --- |", exts);
        assert!(matches!(blocks[..], [RawBlock::Paragraph { .. }]));
    }

    #[test]
    fn reference_definition_is_collected_not_emitted() {
        let (blocks, refs) = parse_raw("[label]: /url \"title\"\n\ntext", Extensions::all());
        assert_eq!(refs.get("label"), Some(&"/url".to_string()));
        assert_eq!(
            blocks,
            vec![RawBlock::Paragraph {
                text: "text".to_string()
            }]
        );
    }

    #[test]
    fn html_block_runs_to_blank_line() {
        assert_eq!(
            raw("<div>\n<p>hi</p>\n</div>\n\nafter"),
            vec![
                RawBlock::HtmlBlock {
                    content: "<div>\n<p>hi</p>\n</div>\n".to_string()
                },
                RawBlock::Paragraph {
                    text: "after".to_string()
                },
            ]
        );
    }

    #[test]
    fn thematic_break_beats_list_marker() {
        assert_eq!(raw("- - -"), vec![RawBlock::ThematicBreak]);
    }
}
