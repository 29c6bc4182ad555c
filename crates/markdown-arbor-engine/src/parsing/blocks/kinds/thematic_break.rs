/// Thematic break syntax (`---`, `***`, `___`).
pub struct ThematicBreak;

impl ThematicBreak {
    /// Recognizes a thematic break: after up to three spaces of indentation,
    /// at least three of the same `-`, `_` or `*`, with only spaces and tabs
    /// between them.
    pub fn matches(line: &str) -> bool {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return false;
        }
        let rest = line[indent..].trim_end();
        let Some(delim) = rest.chars().find(|c| !c.is_whitespace()) else {
            return false;
        };
        if !matches!(delim, '-' | '_' | '*') {
            return false;
        }
        let mut count = 0;
        for c in rest.chars() {
            if c == delim {
                count += 1;
            } else if c != ' ' && c != '\t' {
                return false;
            }
        }
        count >= 3
    }
}
