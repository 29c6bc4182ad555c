use crate::ast::Inline;
use crate::rewrite::rewrite_inlines;

/// The opener-to-closer table. Bidirectional on purpose: a "closing" mark
/// encountered first acts as an opener for the reversed pair, and the
/// straight double quote closes itself.
const QUOTE_PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('\u{201E}', '\u{201D}'), // „ ... ”
    ('\u{00AB}', '\u{00BB}'), // « ... »
    ('\u{300C}', '\u{300D}'), // 「 ... 」
    ('\u{201C}', '\u{201D}'), // “ ... ”
    ('\u{00BB}', '\u{00AB}'), // » ... «
    ('\u{201D}', '\u{201C}'), // ” ... “
    ('\u{300D}', '\u{300C}'), // 」 ... 「
    ('\u{300E}', '\u{300F}'), // 『 ... 』
    ('\u{300F}', '\u{300E}'), // 』 ... 『
];

fn closer_for(opener: char) -> char {
    QUOTE_PAIRS
        .iter()
        .find(|(open, _)| *open == opener)
        .map(|(_, close)| *close)
        .unwrap_or(opener)
}

fn is_opener(c: char) -> bool {
    QUOTE_PAIRS.iter().any(|(open, _)| *open == c)
}

/// Detects quoted spans in every text leaf of an inline sequence.
///
/// Scans for the earliest opener, then for that opener's specific closer.
/// A matched span becomes a [`Inline::Quoted`] node whose single text child
/// keeps both delimiters; an opener without a closer degrades to a literal
/// one-character text node and scanning resumes right after it.
pub fn parse_quotes(inlines: Vec<Inline>) -> Vec<Inline> {
    rewrite_inlines(inlines, &detect_in)
}

/// The single-node transform behind [`parse_quotes`], usable directly with
/// the rewrite infrastructure.
pub fn detect_in(inline: Inline) -> Vec<Inline> {
    match inline {
        Inline::Text(text) => split_text(&text),
        other => vec![other],
    }
}

fn split_text(text: &str) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some((offset, opener)) = text[pos..]
            .char_indices()
            .find(|&(_, c)| is_opener(c))
        else {
            out.push(Inline::Text(text[pos..].to_string()));
            break;
        };
        let open_at = pos + offset;
        if open_at > pos {
            out.push(Inline::Text(text[pos..open_at].to_string()));
        }

        let closer = closer_for(opener);
        let search_from = open_at + opener.len_utf8();
        match text[search_from..].find(closer) {
            Some(rel) => {
                let close_at = search_from + rel;
                let end = close_at + closer.len_utf8();
                out.push(Inline::Quoted {
                    children: vec![Inline::Text(text[open_at..end].to_string())],
                });
                pos = end;
            }
            None => {
                out.push(Inline::Text(opener.to_string()));
                pos = search_from;
            }
        }
    }

    if out.is_empty() {
        vec![Inline::Text(text.to_string())]
    } else {
        out
    }
}
