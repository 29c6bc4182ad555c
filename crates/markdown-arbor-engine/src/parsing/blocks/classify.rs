use super::kinds::{
    AtxHeading, BlockQuote, CodeFence, Fence, HtmlBlockStart, ListMarker, ThematicBreak,
};

/// Local facts about a single line, computed without surrounding context.
///
/// Phase 1 of block parsing: the [`super::builder::BlockBuilder`] dispatches
/// on these facts to open, continue and close blocks.
#[derive(Debug, Clone)]
pub struct LineFacts {
    pub blank: bool,
    /// Leading space count (tabs are not expanded; the grammar here only
    /// distinguishes 0-3 from 4+).
    pub indent: usize,
    pub quote_marker: Option<usize>,
    pub thematic_break: bool,
    pub atx_heading: Option<(u8, String)>,
    pub fence: Option<Fence>,
    pub list_marker: Option<ListMarker>,
    pub html_start: bool,
}

impl LineFacts {
    pub fn classify(line: &str) -> Self {
        let blank = line.trim().is_empty();
        let indent = line.len() - line.trim_start_matches(' ').len();
        Self {
            blank,
            indent,
            quote_marker: BlockQuote::marker(line),
            thematic_break: ThematicBreak::matches(line),
            atx_heading: AtxHeading::parse(line),
            fence: CodeFence::open(line),
            list_marker: ListMarker::parse(line),
            html_start: HtmlBlockStart::matches(line),
        }
    }

    /// Whether this line opens some block construct, i.e. cannot be lazy
    /// paragraph continuation text.
    pub fn starts_construct(&self) -> bool {
        self.thematic_break
            || self.atx_heading.is_some()
            || self.fence.is_some()
            || self.quote_marker.is_some()
            || self.list_marker.is_some()
            || self.html_start
    }

    /// Whether this line interrupts an open paragraph. Stricter than
    /// [`Self::starts_construct`]: only a bullet item with content, or an
    /// ordered item numbered 1 with content, may interrupt, and raw HTML
    /// never does.
    pub fn interrupts_paragraph(&self) -> bool {
        if self.thematic_break || self.atx_heading.is_some() || self.fence.is_some() {
            return true;
        }
        if self.quote_marker.is_some() {
            return true;
        }
        if let Some(marker) = &self.list_marker {
            if marker.content.trim().is_empty() {
                return false;
            }
            return match marker.kind {
                super::kinds::MarkerKind::Bullet(_) => true,
                super::kinds::MarkerKind::Ordered { number, .. } => number == 1,
            };
        }
        false
    }
}
