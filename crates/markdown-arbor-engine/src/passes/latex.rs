use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Inline;
use crate::rewrite::rewrite_inlines;

fn display_math() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Dot matches newlines: display math may span lines.
    RE.get_or_init(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("display math pattern"))
}

fn inline_math() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\\((.*?)\\\)").expect("inline math pattern"))
}

/// Extracts LaTeX spans from every text leaf of an inline sequence.
///
/// Display (`\[...\]`) and inline (`\(...\)`) matches are found
/// independently, leftmost-first and non-greedy; an inline candidate that
/// overlaps an already-accepted display match is discarded, then the
/// survivors are merged by start position. Delimiters are stripped from the
/// captured content. A leaf with no matches is returned unchanged.
pub fn extract_latex(inlines: Vec<Inline>) -> Vec<Inline> {
    rewrite_inlines(inlines, &extract_from)
}

/// The single-node transform behind [`extract_latex`], usable directly with
/// the rewrite infrastructure.
pub fn extract_from(inline: Inline) -> Vec<Inline> {
    match inline {
        Inline::Text(text) => split_text(&text),
        other => vec![other],
    }
}

fn split_text(text: &str) -> Vec<Inline> {
    struct Match {
        start: usize,
        end: usize,
        content: String,
        display: bool,
    }

    let mut matches: Vec<Match> = display_math()
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("regex match");
            Match {
                start: whole.start(),
                end: whole.end(),
                content: caps[1].to_string(),
                display: true,
            }
        })
        .collect();

    for caps in inline_math().captures_iter(text) {
        let whole = caps.get(0).expect("regex match");
        let overlaps = matches
            .iter()
            .any(|m| whole.start() < m.end && whole.end() > m.start);
        if !overlaps {
            matches.push(Match {
                start: whole.start(),
                end: whole.end(),
                content: caps[1].to_string(),
                display: false,
            });
        }
    }

    if matches.is_empty() {
        return vec![Inline::Text(text.to_string())];
    }
    matches.sort_by_key(|m| m.start);

    let mut out = Vec::new();
    let mut last = 0;
    for m in matches {
        if last < m.start {
            out.push(Inline::Text(text[last..m.start].to_string()));
        }
        out.push(Inline::Latex {
            content: m.content,
            display: m.display,
        });
        last = m.end;
    }
    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
    out
}
