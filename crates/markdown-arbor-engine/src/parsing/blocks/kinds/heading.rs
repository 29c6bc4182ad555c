/// ATX heading syntax (`#` to `######`).
pub struct AtxHeading;

impl AtxHeading {
    /// Recognizes an ATX heading line, returning its level and raw inline
    /// text. The opening run must be 1-6 `#` followed by a space, tab or end
    /// of line; an optional closing `#` run is stripped.
    pub fn parse(line: &str) -> Option<(u8, String)> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let level = rest.chars().take_while(|&c| c == '#').count();
        if level == 0 || level > 6 {
            return None;
        }
        let after = &rest[level..];
        if !after.is_empty() && !after.starts_with(' ') && !after.starts_with('\t') {
            return None;
        }
        let mut text = after.trim();
        // Strip a closing run of #s, but only when separated from the text.
        let without_close = text.trim_end_matches('#');
        if without_close.len() < text.len()
            && (without_close.is_empty() || without_close.ends_with(' '))
        {
            text = without_close.trim_end();
        }
        Some((level as u8, text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_levels() {
        assert_eq!(AtxHeading::parse("# one"), Some((1, "one".to_string())));
        assert_eq!(
            AtxHeading::parse("###### six"),
            Some((6, "six".to_string()))
        );
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        assert_eq!(AtxHeading::parse("####### x"), None);
    }

    #[test]
    fn missing_space_is_not_a_heading() {
        assert_eq!(AtxHeading::parse("#hashtag"), None);
    }

    #[test]
    fn empty_heading_allowed() {
        assert_eq!(AtxHeading::parse("##"), Some((2, String::new())));
    }

    #[test]
    fn closing_run_stripped() {
        assert_eq!(AtxHeading::parse("## foo ##"), Some((2, "foo".to_string())));
    }

    #[test]
    fn hash_glued_to_text_is_kept() {
        assert_eq!(AtxHeading::parse("# foo#"), Some((1, "foo#".to_string())));
    }
}
