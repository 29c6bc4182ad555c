use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{Extensions, RefMap, normalize_label};

use super::{
    classify::LineFacts,
    kinds::{BlockQuote, CodeFence, Fence, ListMarker, MarkerKind, PipeTable, TaskMarker},
    tree::{RawBlock, RawList, RawListItem},
};

/// Phase-2 block construction: walks classified lines, maintaining the open
/// container context (blockquote, list, list item) through recursion, and
/// emits the generic [`RawBlock`] tree.
///
/// Container handling strips one marker level per recursion step: a
/// blockquote's marked lines are collected, de-prefixed and re-parsed as a
/// fresh document, and likewise for list item content. Lazy paragraph
/// continuation keeps unmarked lines attached to the innermost open
/// paragraph.
pub struct BlockBuilder {
    extensions: Extensions,
    refs: RefMap,
}

impl BlockBuilder {
    pub fn new(extensions: Extensions) -> Self {
        Self {
            extensions,
            refs: RefMap::new(),
        }
    }

    /// Consumes the whole source, returning the raw tree plus the link
    /// reference definitions collected along the way.
    pub fn build(mut self, text: &str) -> (Vec<RawBlock>, RefMap) {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let blocks = self.parse_lines(&lines);
        (blocks, self.refs)
    }

    fn parse_lines(&mut self, lines: &[String]) -> Vec<RawBlock> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let facts = LineFacts::classify(&lines[i]);
            if facts.blank {
                i += 1;
                continue;
            }
            if facts.indent >= 4 {
                let (block, next) = self.take_indented_code(lines, i);
                out.push(block);
                i = next;
                continue;
            }
            if let Some(fence) = facts.fence {
                let (block, next) = self.take_fenced_code(lines, i, fence);
                out.push(block);
                i = next;
                continue;
            }
            if facts.thematic_break {
                out.push(RawBlock::ThematicBreak);
                i += 1;
                continue;
            }
            if let Some((level, text)) = facts.atx_heading {
                out.push(RawBlock::Heading { level, text });
                i += 1;
                continue;
            }
            if facts.quote_marker.is_some() {
                let (block, next) = self.take_blockquote(lines, i);
                out.push(block);
                i = next;
                continue;
            }
            if let Some(marker) = facts.list_marker {
                let (block, next) = self.take_list(lines, i, marker);
                out.push(block);
                i = next;
                continue;
            }
            if facts.html_start {
                let (block, next) = self.take_html_block(lines, i);
                out.push(block);
                i = next;
                continue;
            }
            if self.extensions.table
                && let Some((block, next)) = self.try_take_table(lines, i)
            {
                out.push(block);
                i = next;
                continue;
            }
            let (block, next) = self.take_paragraph(lines, i);
            if let Some(block) = block {
                out.push(block);
            }
            i = next;
        }
        out
    }

    fn take_indented_code(&self, lines: &[String], start: usize) -> (RawBlock, usize) {
        let mut content_lines: Vec<String> = Vec::new();
        let mut pending_blanks = 0;
        let mut i = start;
        while i < lines.len() {
            let line = &lines[i];
            if line.trim().is_empty() {
                pending_blanks += 1;
                i += 1;
                continue;
            }
            let indent = line.len() - line.trim_start_matches(' ').len();
            if indent < 4 {
                break;
            }
            for _ in 0..pending_blanks {
                content_lines.push(String::new());
            }
            pending_blanks = 0;
            content_lines.push(line[4..].to_string());
            i += 1;
        }
        let mut content = content_lines.join("\n");
        content.push('\n');
        (
            RawBlock::CodeBlock {
                fence_info: None,
                content,
            },
            i,
        )
    }

    fn take_fenced_code(&self, lines: &[String], start: usize, fence: Fence) -> (RawBlock, usize) {
        let mut content = String::new();
        let mut i = start + 1;
        while i < lines.len() {
            let line = &lines[i];
            if CodeFence::closes(&fence, line) {
                i += 1;
                break;
            }
            let indent = line.len() - line.trim_start_matches(' ').len();
            content.push_str(&line[indent.min(fence.indent)..]);
            content.push('\n');
            i += 1;
        }
        (
            RawBlock::CodeBlock {
                fence_info: Some(fence.info),
                content,
            },
            i,
        )
    }

    fn take_html_block(&self, lines: &[String], start: usize) -> (RawBlock, usize) {
        let mut content = String::new();
        let mut i = start;
        while i < lines.len() && !lines[i].trim().is_empty() {
            content.push_str(&lines[i]);
            content.push('\n');
            i += 1;
        }
        (RawBlock::HtmlBlock { content }, i)
    }

    fn take_blockquote(&mut self, lines: &[String], start: usize) -> (RawBlock, usize) {
        let mut inner: Vec<String> = Vec::new();
        let mut i = start;
        while i < lines.len() {
            let line = &lines[i];
            if let Some(idx) = BlockQuote::marker(line) {
                inner.push(line[idx..].to_string());
                i += 1;
                continue;
            }
            let facts = LineFacts::classify(line);
            let lazy = !facts.blank
                && !facts.starts_construct()
                && inner.last().is_some_and(|l| !l.trim().is_empty());
            if lazy {
                inner.push(line.clone());
                i += 1;
                continue;
            }
            break;
        }
        let children = self.parse_lines(&inner);
        (RawBlock::Blockquote { children }, i)
    }

    fn take_list(&mut self, lines: &[String], start: usize, first: ListMarker) -> (RawBlock, usize) {
        let ordered = first.kind.is_ordered();
        let list_start = match first.kind {
            MarkerKind::Ordered { number, .. } => number,
            MarkerKind::Bullet(_) => 1,
        };
        let family = first.kind;
        let mut items: Vec<RawListItem> = Vec::new();
        let mut tight = true;
        let mut i = start;
        let mut blank_between = false;
        let mut marker = Some(first);

        while let Some(m) = marker.take() {
            if !items.is_empty() && blank_between {
                tight = false;
            }
            let width = m.content_indent;
            let mut item_lines: Vec<String> = vec![m.content];
            let mut pending_blanks = 0usize;
            let mut internal_blank = false;
            i += 1;
            while i < lines.len() {
                let line = &lines[i];
                if line.trim().is_empty() {
                    pending_blanks += 1;
                    i += 1;
                    continue;
                }
                let indent = line.len() - line.trim_start_matches(' ').len();
                if indent >= width {
                    if pending_blanks > 0 {
                        internal_blank = true;
                        for _ in 0..pending_blanks {
                            item_lines.push(String::new());
                        }
                        pending_blanks = 0;
                    }
                    item_lines.push(line[width..].to_string());
                    i += 1;
                    continue;
                }
                if pending_blanks > 0 {
                    break;
                }
                let facts = LineFacts::classify(line);
                let lazy = !facts.starts_construct()
                    && item_lines.last().is_some_and(|l| !l.trim().is_empty());
                if lazy {
                    item_lines.push(line.trim_start().to_string());
                    i += 1;
                    continue;
                }
                break;
            }

            let mut children = self.parse_lines(&item_lines);
            let mut checkbox = None;
            if self.extensions.tasklist
                && let Some(RawBlock::Paragraph { text }) = children.first_mut()
                && let Some((checked, rest)) = TaskMarker::strip(text)
            {
                checkbox = Some(checked);
                *text = rest;
            }
            if internal_blank {
                tight = false;
            }
            items.push(RawListItem { checkbox, children });
            blank_between = pending_blanks > 0;

            if i < lines.len() {
                marker = ListMarker::parse(&lines[i]).filter(|next| next.kind.same_family(&family));
            }
        }

        (
            RawBlock::List(RawList {
                ordered,
                start: list_start,
                tight,
                items,
            }),
            i,
        )
    }

    fn try_take_table(&self, lines: &[String], start: usize) -> Option<(RawBlock, usize)> {
        let alignments = PipeTable::delimiter_row(lines.get(start + 1)?)?;
        let header = PipeTable::split_cells(&lines[start]);
        if header.len() != alignments.len() {
            return None;
        }
        let mut rows = vec![header];
        let mut i = start + 2;
        while i < lines.len() {
            let facts = LineFacts::classify(&lines[i]);
            if facts.blank || facts.starts_construct() {
                break;
            }
            rows.push(PipeTable::split_cells(&lines[i]));
            i += 1;
        }
        Some((RawBlock::Table { alignments, rows }, i))
    }

    fn take_paragraph(&mut self, lines: &[String], start: usize) -> (Option<RawBlock>, usize) {
        let mut buf: Vec<String> = Vec::new();
        let mut i = start;
        while i < lines.len() {
            let line = &lines[i];
            let facts = LineFacts::classify(line);
            if facts.blank {
                break;
            }
            if i > start {
                let breaks = if buf.is_empty() {
                    facts.starts_construct()
                } else {
                    facts.interrupts_paragraph()
                };
                if breaks {
                    break;
                }
            }
            if self.extensions.table
                && i + 1 < lines.len()
                && PipeTable::delimiter_row(&lines[i + 1])
                    .is_some_and(|a| a.len() == PipeTable::split_cells(line).len())
            {
                // This line is a table header; flush what we have.
                break;
            }
            if buf.is_empty() && self.try_reference_definition(line) {
                i += 1;
                continue;
            }
            buf.push(line.trim_start().to_string());
            i += 1;
        }
        if buf.is_empty() {
            return (None, i);
        }
        let text = buf.join("\n").trim_end().to_string();
        (Some(RawBlock::Paragraph { text }), i)
    }

    fn try_reference_definition(&mut self, line: &str) -> bool {
        static REF_DEF: OnceLock<Regex> = OnceLock::new();
        let re = REF_DEF.get_or_init(|| {
            Regex::new(
                r#"^ {0,3}\[([^\[\]]+)\]:\s*(?:<([^<>]*)>|(\S+))\s*(?:(?:"[^"]*"|'[^']*'|\([^()]*\))\s*)?$"#,
            )
            .expect("reference definition pattern")
        });
        let Some(caps) = re.captures(line) else {
            return false;
        };
        let label = normalize_label(&caps[1]);
        let dest = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        // First definition wins, as in CommonMark.
        self.refs.entry(label).or_insert(dest);
        true
    }
}
