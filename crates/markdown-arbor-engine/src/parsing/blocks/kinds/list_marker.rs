/// Which family of list a marker opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Bullet(char),
    Ordered { number: u64, delimiter: char },
}

impl MarkerKind {
    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Ordered { .. })
    }

    /// Whether two markers continue the same list.
    pub fn same_family(&self, other: &MarkerKind) -> bool {
        self.is_ordered() == other.is_ordered()
    }
}

/// A recognized list item marker plus the layout facts the builder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: MarkerKind,
    /// Indentation of the marker itself.
    pub indent: usize,
    /// Column where the item's content begins; continuation lines must be
    /// indented at least this far to stay inside the item.
    pub content_indent: usize,
    /// Rest of the line after the marker and its separating spaces.
    pub content: String,
}

impl ListMarker {
    /// Recognizes a list item marker: `-`, `+` or `*`, or a 1-9 digit number
    /// followed by `.` or `)`, each followed by at least one space (or end of
    /// line for an empty item). More than four spaces after the marker count
    /// as item content, per the usual indented-code-in-item rule.
    pub fn parse(line: &str) -> Option<ListMarker> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let first = rest.chars().next()?;

        let (kind, marker_len) = if matches!(first, '-' | '+' | '*') {
            (MarkerKind::Bullet(first), 1)
        } else if first.is_ascii_digit() {
            let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits > 9 {
                return None;
            }
            let delimiter = rest[digits..].chars().next()?;
            if delimiter != '.' && delimiter != ')' {
                return None;
            }
            let number = rest[..digits].parse().ok()?;
            (MarkerKind::Ordered { number, delimiter }, digits + 1)
        } else {
            return None;
        };

        let after = &rest[marker_len..];
        if after.is_empty() {
            return Some(ListMarker {
                kind,
                indent,
                content_indent: indent + marker_len + 1,
                content: String::new(),
            });
        }
        if !after.starts_with(' ') {
            return None;
        }
        let spaces = after.len() - after.trim_start_matches(' ').len();
        let consumed = if spaces > 4 || after.trim().is_empty() {
            1
        } else {
            spaces
        };
        Some(ListMarker {
            kind,
            indent,
            content_indent: indent + marker_len + consumed,
            content: after[consumed..].to_string(),
        })
    }
}

/// GFM task list checkbox, only meaningful as the first content of an item.
pub struct TaskMarker;

impl TaskMarker {
    /// Strips a leading `[ ]` / `[x]` / `[X]` checkbox from item text,
    /// returning the checked state and the remaining text.
    pub fn strip(text: &str) -> Option<(bool, String)> {
        let mut chars = text.chars();
        if chars.next()? != '[' {
            return None;
        }
        let state = chars.next()?;
        let checked = match state {
            ' ' => false,
            'x' | 'X' => true,
            _ => return None,
        };
        if chars.next()? != ']' {
            return None;
        }
        let rest = &text[3..];
        if rest.is_empty() {
            return Some((checked, String::new()));
        }
        if !rest.starts_with(' ') && !rest.starts_with('\t') {
            return None;
        }
        Some((checked, rest[1..].to_string()))
    }
}
