use crate::ast::Inline;
use crate::parsing::normalize_label;

use super::{InlineContext, Piece, cursor::Cursor, emphasis, finalize};

/// Resolves a just-scanned `]` against the most recent bracket opener.
///
/// Tried in order: inline destination `(...)`, full/collapsed reference
/// `[label]` / `[]`, then shortcut reference from the bracketed text. On
/// success the enclosed pieces get their emphasis processed and become the
/// link or image children; on failure both brackets degrade to literal text.
/// Earlier link openers are deactivated when a link resolves, so links do
/// not nest.
pub(super) fn close_bracket(pieces: &mut Vec<Piece>, cur: &mut Cursor, ctx: &InlineContext) {
    let Some(oi) = pieces
        .iter()
        .rposition(|p| matches!(p, Piece::Bracket { .. }))
    else {
        pieces.push(Piece::Text("]".to_string()));
        return;
    };
    let (image, active) = match pieces[oi] {
        Piece::Bracket { image, active } => (image, active),
        _ => unreachable!(),
    };
    if !active {
        pieces[oi] = Piece::Text(if image { "![" } else { "[" }.to_string());
        pieces.push(Piece::Text("]".to_string()));
        return;
    }

    let destination = resolve_destination(pieces, oi, cur, ctx);
    match destination {
        Some(destination) => {
            let mut inner: Vec<Piece> = pieces.split_off(oi + 1);
            emphasis::process(&mut inner);
            let children = finalize(inner);
            let node = if image {
                Inline::Image {
                    source: destination,
                    children,
                }
            } else {
                Inline::Link {
                    destination,
                    children,
                }
            };
            pieces[oi] = Piece::Node(node);
            if !image {
                for piece in pieces[..oi].iter_mut() {
                    if let Piece::Bracket {
                        image: false,
                        active,
                    } = piece
                    {
                        *active = false;
                    }
                }
            }
        }
        None => {
            pieces[oi] = Piece::Text(if image { "![" } else { "[" }.to_string());
            pieces.push(Piece::Text("]".to_string()));
        }
    }
}

fn resolve_destination(
    pieces: &[Piece],
    oi: usize,
    cur: &mut Cursor,
    ctx: &InlineContext,
) -> Option<String> {
    if cur.peek_char() == Some('(')
        && let Some(dest) = parse_inline_destination(cur)
    {
        return Some(dest);
    }
    if cur.peek_char() == Some('[') {
        let saved = cur.clone();
        if let Some(label) = parse_link_label(cur) {
            let key = if label.trim().is_empty() {
                pieces_plain_text(&pieces[oi + 1..])
            } else {
                label
            };
            if let Some(dest) = ctx.refs.get(&normalize_label(&key)) {
                return Some(dest.clone());
            }
        }
        *cur = saved;
    }
    // Shortcut reference: the bracketed text itself is the label.
    let label = pieces_plain_text(&pieces[oi + 1..]);
    ctx.refs.get(&normalize_label(&label)).cloned()
}

/// Parses `(destination "title")` after a closing bracket. The title is
/// validated but discarded: the taxonomy keeps only the destination.
/// Restores the cursor and returns `None` when the syntax does not close.
fn parse_inline_destination(cur: &mut Cursor) -> Option<String> {
    let saved = cur.clone();
    cur.bump(); // (
    skip_whitespace(cur);

    let dest = if cur.peek_char() == Some('<') {
        cur.bump();
        let mut dest = String::new();
        loop {
            match cur.peek_char() {
                Some('>') => {
                    cur.bump();
                    break;
                }
                None | Some('\n') | Some('<') => {
                    *cur = saved;
                    return None;
                }
                Some('\\') => {
                    cur.bump();
                    match cur.peek_char() {
                        Some(p) if p.is_ascii_punctuation() => {
                            dest.push(p);
                            cur.bump();
                        }
                        _ => dest.push('\\'),
                    }
                }
                Some(c) => {
                    dest.push(c);
                    cur.bump();
                }
            }
        }
        dest
    } else {
        let mut dest = String::new();
        let mut depth = 0u32;
        loop {
            match cur.peek_char() {
                None => break,
                Some(c) if c.is_whitespace() => break,
                Some('(') => {
                    depth += 1;
                    dest.push('(');
                    cur.bump();
                }
                Some(')') => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    dest.push(')');
                    cur.bump();
                }
                Some('\\') => {
                    cur.bump();
                    match cur.peek_char() {
                        Some(p) if p.is_ascii_punctuation() => {
                            dest.push(p);
                            cur.bump();
                        }
                        _ => dest.push('\\'),
                    }
                }
                Some(c) => {
                    dest.push(c);
                    cur.bump();
                }
            }
        }
        dest
    };

    skip_whitespace(cur);
    if let Some(quote) = cur.peek_char()
        && matches!(quote, '"' | '\'' | '(')
    {
        let close = if quote == '(' { ')' } else { quote };
        cur.bump();
        loop {
            match cur.peek_char() {
                None => {
                    *cur = saved;
                    return None;
                }
                Some(c) if c == close => {
                    cur.bump();
                    break;
                }
                Some('\\') => {
                    cur.bump();
                    cur.bump();
                }
                Some(_) => {
                    cur.bump();
                }
            }
        }
        skip_whitespace(cur);
    }

    if cur.peek_char() == Some(')') {
        cur.bump();
        Some(dest)
    } else {
        *cur = saved;
        None
    }
}

/// Parses `[label]`, returning the raw label text. Restores the cursor and
/// returns `None` on nesting or a missing `]`.
fn parse_link_label(cur: &mut Cursor) -> Option<String> {
    let saved = cur.clone();
    cur.bump(); // [
    let mut label = String::new();
    loop {
        match cur.peek_char() {
            None | Some('[') => {
                *cur = saved;
                return None;
            }
            Some(']') => {
                cur.bump();
                return Some(label);
            }
            Some('\\') => {
                cur.bump();
                label.push('\\');
                if let Some(c) = cur.peek_char() {
                    label.push(c);
                    cur.bump();
                }
            }
            Some(c) => {
                label.push(c);
                cur.bump();
            }
        }
    }
}

fn skip_whitespace(cur: &mut Cursor) {
    while cur.peek_char().is_some_and(char::is_whitespace) {
        cur.bump();
    }
}

/// The literal text content of a piece run, used as a reference label.
fn pieces_plain_text(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(t) => out.push_str(t),
            Piece::Delim { ch, len, .. } => {
                for _ in 0..*len {
                    out.push(*ch);
                }
            }
            Piece::Bracket { image, .. } => out.push_str(if *image { "![" } else { "[" }),
            Piece::Node(node) => inline_text(node, &mut out),
        }
    }
    out
}

fn inline_text(node: &Inline, out: &mut String) {
    match node {
        Inline::Text(t) | Inline::Code(t) => out.push_str(t),
        Inline::SoftBreak => out.push(' '),
        Inline::LineBreak => out.push('\n'),
        Inline::Html(_) => {}
        Inline::Latex { content, .. } => out.push_str(content),
        Inline::Emphasis { children }
        | Inline::Strong { children }
        | Inline::Strikethrough { children }
        | Inline::Link { children, .. }
        | Inline::Image { children, .. }
        | Inline::Quoted { children } => {
            for child in children {
                inline_text(child, out);
            }
        }
    }
}
