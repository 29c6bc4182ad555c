//! # Parsing Engine
//!
//! Two-phase Markdown parsing: block structure first ([`blocks`]), then
//! inline structure per leaf block ([`inline`]), with [`lower`] mapping the
//! generic block tree into the typed taxonomy.
//!
//! Parsing is total: any UTF-8 input produces a best-effort tree under
//! CommonMark's permissive fallback rules, and an empty parse is simply an
//! empty document. There is no error path.

pub mod blocks;
pub mod inline;
mod lower;

use std::collections::HashMap;

use crate::ast::Document;

/// Link reference definitions collected during the block phase, keyed by
/// normalized label.
pub(crate) type RefMap = HashMap<String, String>;

/// Normalizes a link reference label: case-folded, whitespace collapsed.
pub(crate) fn normalize_label(label: &str) -> String {
    let folded = label.trim().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The GFM syntax extensions the engine can enable.
///
/// Explicit per-parser state, never a process-wide registry: parsers with
/// different extension sets coexist freely and tests can run in parallel
/// without cross-contamination. `tagfilter` has no effect on parsing; the
/// HTML serializer applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extensions {
    pub autolink: bool,
    pub strikethrough: bool,
    pub tagfilter: bool,
    pub tasklist: bool,
    pub table: bool,
}

impl Extensions {
    /// Every supported extension, the set this system always parses with.
    pub const fn all() -> Self {
        Self {
            autolink: true,
            strikethrough: true,
            tagfilter: true,
            tasklist: true,
            table: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            autolink: false,
            strikethrough: false,
            tagfilter: false,
            tasklist: false,
            table: false,
        }
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::all()
    }
}

/// A Markdown parser instance owning its extension configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser {
    extensions: Extensions,
}

impl MarkdownParser {
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> Extensions {
        self.extensions
    }

    /// Parses Markdown source into a typed document.
    pub fn parse(&self, text: &str) -> Document {
        let (raw, refs) = blocks::parse_raw(text, self.extensions);
        Document {
            blocks: lower::lower_document(raw, &refs, self.extensions),
        }
    }
}

/// Parses Markdown with all extensions enabled.
pub fn parse(text: &str) -> Document {
    MarkdownParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{Block, ColumnAlignment, Inline};

    fn paragraph_inlines(text: &str) -> Vec<Inline> {
        let doc = parse(text);
        match doc.blocks.into_iter().next() {
            Some(Block::Paragraph { content }) => content,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_empty_document() {
        assert_eq!(parse("").blocks, vec![]);
    }

    #[test]
    fn plain_text_paragraph() {
        assert_eq!(
            paragraph_inlines("hello world"),
            vec![Inline::text("hello world")]
        );
    }

    #[test]
    fn emphasis_and_strong() {
        assert_eq!(
            paragraph_inlines("a *em* and **strong**"),
            vec![
                Inline::text("a "),
                Inline::Emphasis {
                    children: vec![Inline::text("em")]
                },
                Inline::text(" and "),
                Inline::Strong {
                    children: vec![Inline::text("strong")]
                },
            ]
        );
    }

    #[test]
    fn triple_delimiters_nest_emphasis_around_strong() {
        assert_eq!(
            paragraph_inlines("***both***"),
            vec![Inline::Emphasis {
                children: vec![Inline::Strong {
                    children: vec![Inline::text("both")]
                }]
            }]
        );
    }

    #[test]
    fn intraword_underscore_is_literal() {
        assert_eq!(
            paragraph_inlines("snake_case_name"),
            vec![Inline::text("snake_case_name")]
        );
    }

    #[test]
    fn mixed_run_lengths_respect_multiple_of_three_rule() {
        assert_eq!(
            paragraph_inlines("*foo**bar**baz*"),
            vec![Inline::Emphasis {
                children: vec![
                    Inline::text("foo"),
                    Inline::Strong {
                        children: vec![Inline::text("bar")]
                    },
                    Inline::text("baz"),
                ]
            }]
        );
    }

    #[test]
    fn strikethrough_requires_double_tilde() {
        assert_eq!(
            paragraph_inlines("~~gone~~ ~not~"),
            vec![
                Inline::Strikethrough {
                    children: vec![Inline::text("gone")]
                },
                Inline::text(" ~not~"),
            ]
        );
    }

    #[test]
    fn strikethrough_disabled_without_extension() {
        let parser = MarkdownParser::new(Extensions::none());
        let doc = parser.parse("~~gone~~");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                content: vec![Inline::text("~~gone~~")]
            }]
        );
    }

    #[test]
    fn code_span_is_a_raw_zone() {
        assert_eq!(
            paragraph_inlines("`*not em*`"),
            vec![Inline::Code("*not em*".to_string())]
        );
    }

    #[test]
    fn unclosed_code_span_is_literal() {
        assert_eq!(
            paragraph_inlines("`oops"),
            vec![Inline::text("`oops")]
        );
    }

    #[test]
    fn backslash_escape_suppresses_emphasis() {
        assert_eq!(
            paragraph_inlines(r"\*literal\*"),
            vec![Inline::text("*literal*")]
        );
    }

    #[test]
    fn inline_link() {
        assert_eq!(
            paragraph_inlines("[text](/url)"),
            vec![Inline::Link {
                destination: "/url".to_string(),
                children: vec![Inline::text("text")]
            }]
        );
    }

    #[test]
    fn inline_link_with_title_keeps_destination_only() {
        assert_eq!(
            paragraph_inlines(r#"[text](/url "title")"#),
            vec![Inline::Link {
                destination: "/url".to_string(),
                children: vec![Inline::text("text")]
            }]
        );
    }

    #[test]
    fn image_with_emphasized_alt() {
        assert_eq!(
            paragraph_inlines("![an *alt*](/pic.png)"),
            vec![Inline::Image {
                source: "/pic.png".to_string(),
                children: vec![
                    Inline::text("an "),
                    Inline::Emphasis {
                        children: vec![Inline::text("alt")]
                    }
                ]
            }]
        );
    }

    #[test]
    fn unmatched_bracket_is_literal() {
        assert_eq!(
            paragraph_inlines("[not a link"),
            vec![Inline::text("[not a link")]
        );
    }

    #[test]
    fn reference_link_resolves_through_definition() {
        let doc = parse("[foo][bar]\n\n[bar]: /dest");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                content: vec![Inline::Link {
                    destination: "/dest".to_string(),
                    children: vec![Inline::text("foo")]
                }]
            }]
        );
    }

    #[test]
    fn shortcut_reference_link() {
        let doc = parse("[bar]\n\n[bar]: /dest");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                content: vec![Inline::Link {
                    destination: "/dest".to_string(),
                    children: vec![Inline::text("bar")]
                }]
            }]
        );
    }

    #[test]
    fn undefined_reference_stays_literal() {
        assert_eq!(
            paragraph_inlines("[foo][nope]"),
            vec![Inline::text("[foo][nope]")]
        );
    }

    #[test]
    fn bare_url_autolink() {
        assert_eq!(
            paragraph_inlines("see www.example.com now"),
            vec![
                Inline::text("see "),
                Inline::Link {
                    destination: "http://www.example.com".to_string(),
                    children: vec![Inline::text("www.example.com")]
                },
                Inline::text(" now"),
            ]
        );
    }

    #[test]
    fn bare_url_trailing_punctuation_stays_outside() {
        assert_eq!(
            paragraph_inlines("go to https://example.com/a."),
            vec![
                Inline::text("go to "),
                Inline::Link {
                    destination: "https://example.com/a".to_string(),
                    children: vec![Inline::text("https://example.com/a")]
                },
                Inline::text("."),
            ]
        );
    }

    #[test]
    fn hard_break_from_trailing_spaces() {
        assert_eq!(
            paragraph_inlines("alpha  \nbeta"),
            vec![
                Inline::text("alpha"),
                Inline::LineBreak,
                Inline::text("beta")
            ]
        );
    }

    #[test]
    fn soft_break_from_newline() {
        assert_eq!(
            paragraph_inlines("alpha\nbeta"),
            vec![
                Inline::text("alpha"),
                Inline::SoftBreak,
                Inline::text("beta")
            ]
        );
    }

    #[test]
    fn heading_levels_clamped_by_grammar() {
        let doc = parse("### three");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 3,
                content: vec![Inline::text("three")]
            }]
        );
    }

    #[test]
    fn ordered_list_start_preserved() {
        let doc = parse("7. seven\n8. eight");
        match &doc.blocks[..] {
            [Block::NumberedList { start, tight, items }] => {
                assert_eq!(*start, 7);
                assert!(*tight);
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected numbered list, got {other:?}"),
        }
    }

    #[test]
    fn task_list_takes_precedence_over_bullets() {
        let doc = parse("- [x] done\n- [ ] todo");
        match &doc.blocks[..] {
            [Block::TaskList { items, .. }] => {
                assert!(items[0].checked);
                assert!(!items[1].checked);
            }
            other => panic!("expected task list, got {other:?}"),
        }
    }

    #[test]
    fn loose_list_from_parsed_blank_line() {
        let doc = parse("- one\n\n- two");
        assert!(matches!(
            doc.blocks[..],
            [Block::BulletedList { tight: false, .. }]
        ));
    }

    #[test]
    fn table_shape_matches_alignments() {
        let doc = parse("| a | b | c |\n| :-- | :-: | --- |\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |");
        match &doc.blocks[..] {
            [Block::Table {
                column_alignments,
                rows,
            }] => {
                assert_eq!(
                    column_alignments,
                    &vec![
                        ColumnAlignment::Left,
                        ColumnAlignment::Center,
                        ColumnAlignment::None
                    ]
                );
                assert_eq!(rows.len(), 3);
                for row in rows {
                    assert_eq!(row.cells.len(), column_alignments.len());
                }
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn ragged_table_rows_are_padded_and_truncated() {
        let doc = parse("| a | b |\n| --- | --- |\n| only |\n| x | y | extra |");
        match &doc.blocks[..] {
            [Block::Table { rows, .. }] => {
                assert_eq!(rows[1].cells.len(), 2);
                assert_eq!(rows[1].cells[1].content, vec![]);
                assert_eq!(rows[2].cells.len(), 2);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn uri_autolink_in_angle_brackets() {
        assert_eq!(
            paragraph_inlines("<https://example.com>"),
            vec![Inline::Link {
                destination: "https://example.com".to_string(),
                children: vec![Inline::text("https://example.com")]
            }]
        );
    }

    #[test]
    fn inline_html_passes_through() {
        assert_eq!(
            paragraph_inlines("a <em>b</em> c"),
            vec![
                Inline::text("a "),
                Inline::Html("<em>".to_string()),
                Inline::text("b"),
                Inline::Html("</em>".to_string()),
                Inline::text(" c"),
            ]
        );
    }

    #[test]
    fn parsers_with_different_extensions_coexist() {
        let gfm = MarkdownParser::new(Extensions::all());
        let plain = MarkdownParser::new(Extensions::none());
        let input = "~~x~~";
        assert_ne!(gfm.parse(input), plain.parse(input));
        // And the full parser is unaffected by the restricted one.
        assert_eq!(gfm.parse(input), parse(input));
    }
}
