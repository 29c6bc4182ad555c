/// GFM pipe table syntax: cell splitting and delimiter-row recognition.
///
/// Alignments are reported in the compact wire form (`'l'`, `'c'`, `'r'`,
/// NUL for unaligned); the AST builder converts them to
/// [`crate::ast::ColumnAlignment`].
pub struct PipeTable;

impl PipeTable {
    /// Splits a table line into trimmed cell strings. A single leading and
    /// trailing pipe are boundary markers, not cell separators; `\|` is an
    /// escaped literal pipe.
    pub fn split_cells(line: &str) -> Vec<String> {
        let trimmed = line.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut i = usize::from(chars.first() == Some(&'|'));
        let mut closed_by_pipe = false;
        while i < chars.len() {
            match chars[i] {
                '\\' if chars.get(i + 1) == Some(&'|') => {
                    cell.push('|');
                    i += 2;
                }
                '|' => {
                    cells.push(cell.trim().to_string());
                    cell.clear();
                    closed_by_pipe = true;
                    i += 1;
                }
                c => {
                    cell.push(c);
                    closed_by_pipe = false;
                    i += 1;
                }
            }
        }
        if !closed_by_pipe || !cell.trim().is_empty() {
            cells.push(cell.trim().to_string());
        }
        cells
    }

    /// Recognizes a delimiter row (`| --- | :-: |` ...), returning one wire
    /// alignment character per column. The row must contain a pipe so a bare
    /// `---` stays a thematic break.
    pub fn delimiter_row(line: &str) -> Option<Vec<char>> {
        if !line.contains('|') {
            return None;
        }
        let cells = Self::split_cells(line);
        if cells.is_empty() {
            return None;
        }
        let mut alignments = Vec::with_capacity(cells.len());
        for cell in &cells {
            let left = cell.starts_with(':');
            let right = cell.len() > 1 && cell.ends_with(':');
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
                return None;
            }
            alignments.push(match (left, right) {
                (true, true) => 'c',
                (true, false) => 'l',
                (false, true) => 'r',
                (false, false) => '\0',
            });
        }
        Some(alignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_with_boundary_pipes() {
        assert_eq!(PipeTable::split_cells("| a | b |"), vec!["a", "b"]);
    }

    #[test]
    fn split_without_boundary_pipes() {
        assert_eq!(PipeTable::split_cells("a | b"), vec!["a", "b"]);
    }

    #[test]
    fn split_keeps_escaped_pipes() {
        assert_eq!(PipeTable::split_cells("| a \\| b | c |"), vec!["a | b", "c"]);
    }

    #[test]
    fn split_keeps_interior_empty_cells() {
        assert_eq!(PipeTable::split_cells("| a |  | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn delimiter_row_alignments() {
        assert_eq!(
            PipeTable::delimiter_row("| --- | :-- | :-: | --: |"),
            Some(vec!['\0', 'l', 'c', 'r'])
        );
    }

    #[test]
    fn delimiter_row_needs_a_pipe() {
        assert_eq!(PipeTable::delimiter_row("---"), None);
    }

    #[test]
    fn delimiter_row_rejects_text() {
        assert_eq!(PipeTable::delimiter_row("| a | b |"), None);
        assert_eq!(PipeTable::delimiter_row("| -x- |"), None);
    }

    #[test]
    fn lone_colon_is_not_a_column() {
        assert_eq!(PipeTable::delimiter_row("| : |"), None);
    }
}
