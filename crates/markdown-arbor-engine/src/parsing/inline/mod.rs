//! # Inline Parsing
//!
//! Phase 2 of the engine: turns a leaf block's raw text into a typed inline
//! sequence.
//!
//! ## Precedence
//!
//! 1. **Raw zones first** (`scanner`): code spans, autolinks and raw HTML
//!    are recognized during the initial scan and suppress everything inside.
//! 2. **Emphasis** (`emphasis`): `*`/`_`/`~~` runs are recorded as delimiter
//!    pieces and resolved with the delimiter-stack algorithm, innermost
//!    matches first, respecting left/right-flanking rules.
//! 3. **Links** (`links`): brackets resolve as they close, lower precedence
//!    than emphasis inside the link text (which is processed at close time)
//!    but before the final flattening of leftover delimiters into text.
//!
//! Anything unmatched degrades to literal text; inline parsing never fails.

pub mod cursor;
mod emphasis;
mod links;
mod raw_html;
mod scanner;

use crate::ast::Inline;
use crate::parsing::{Extensions, RefMap};

/// Shared inline-parse state: the document's link reference definitions and
/// the engine's extension set.
pub(crate) struct InlineContext<'a> {
    pub refs: &'a RefMap,
    pub extensions: Extensions,
}

/// One entry in the working sequence the scanner produces. Delimiters and
/// bracket openers are placeholders until emphasis and link resolution turn
/// them into nodes or literal text.
pub(crate) enum Piece {
    Node(Inline),
    Text(String),
    Delim {
        ch: char,
        len: usize,
        orig: usize,
        can_open: bool,
        can_close: bool,
    },
    Bracket {
        image: bool,
        active: bool,
    },
}

/// Parses one leaf block's text into inline nodes.
pub(crate) fn parse_inlines(text: &str, ctx: &InlineContext) -> Vec<Inline> {
    let mut pieces = scanner::scan(text, ctx);
    emphasis::process(&mut pieces);
    finalize(pieces)
}

/// Flattens leftover pieces: unmatched delimiters and brackets become
/// literal text, adjacent text runs merge.
pub(crate) fn finalize(pieces: Vec<Piece>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Node(node) => out.push(node),
            Piece::Text(text) => push_text(&mut out, text),
            Piece::Delim { ch, len, .. } => {
                if len > 0 {
                    push_text(&mut out, std::iter::repeat(ch).take(len).collect());
                }
            }
            Piece::Bracket { image, .. } => {
                push_text(&mut out, if image { "![" } else { "[" }.to_string());
            }
        }
    }
    out
}

fn push_text(out: &mut Vec<Inline>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(&text);
    } else {
        out.push(Inline::Text(text));
    }
}
