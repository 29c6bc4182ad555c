use crate::ast::Inline;

use super::Piece;

/// Computes `(can_open, can_close)` for a delimiter run from the characters
/// around it, per the left/right-flanking rules. `_` additionally refuses
/// intraword emphasis.
pub(super) fn flanking(ch: char, before: Option<char>, after: Option<char>) -> (bool, bool) {
    let before_ws = before.is_none_or(char::is_whitespace);
    let after_ws = after.is_none_or(char::is_whitespace);
    let before_punct = before.is_some_and(is_punctuation);
    let after_punct = after.is_some_and(is_punctuation);

    let left = !after_ws && (!after_punct || before_ws || before_punct);
    let right = !before_ws && (!before_punct || after_ws || after_punct);

    match ch {
        '_' => (
            left && (!right || before_punct),
            right && (!left || after_punct),
        ),
        _ => (left, right),
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Resolves emphasis, strong and strikethrough over the piece sequence.
///
/// Repeatedly takes the leftmost closer that has a matching opener, wrapping
/// the pieces between them. Matching the nearest opener first makes nesting
/// come out innermost-first; the "multiple of 3" restriction keeps runs like
/// `*foo**bar**baz*` from pairing across intent.
pub(super) fn process(pieces: &mut Vec<Piece>) {
    'outer: loop {
        let mut ci = 0;
        while ci < pieces.len() {
            let closer = match &pieces[ci] {
                Piece::Delim {
                    ch,
                    len,
                    orig,
                    can_open,
                    can_close: true,
                } if *len > 0 => Some((*ch, *len, *orig, *can_open)),
                _ => None,
            };
            if let Some((ch, clen, corig, copen)) = closer
                && let Some((oi, olen)) = find_opener(pieces, ci, ch, corig, copen)
            {
                apply(pieces, oi, ci, ch, olen, clen);
                continue 'outer;
            }
            ci += 1;
        }
        break;
    }
}

fn find_opener(
    pieces: &[Piece],
    ci: usize,
    ch: char,
    corig: usize,
    copen: bool,
) -> Option<(usize, usize)> {
    let mut oi = ci;
    while oi > 0 {
        oi -= 1;
        if let Piece::Delim {
            ch: och,
            len: olen,
            orig: oorig,
            can_open: true,
            can_close: oclose,
        } = &pieces[oi]
            && *och == ch
            && *olen > 0
        {
            let incompatible = ch != '~'
                && (copen || *oclose)
                && (oorig + corig) % 3 == 0
                && !(oorig % 3 == 0 && corig % 3 == 0);
            if !incompatible {
                return Some((oi, *olen));
            }
        }
    }
    None
}

fn apply(pieces: &mut Vec<Piece>, oi: usize, ci: usize, ch: char, olen: usize, clen: usize) {
    let use_n = if ch == '~' {
        2
    } else if olen >= 2 && clen >= 2 {
        2
    } else {
        1
    };
    let inner: Vec<Piece> = pieces.drain(oi + 1..ci).collect();
    let children = super::finalize(inner);
    let node = match (ch, use_n) {
        ('~', _) => Inline::Strikethrough { children },
        (_, 2) => Inline::Strong { children },
        _ => Inline::Emphasis { children },
    };
    // After the drain the closer sits immediately after the opener.
    if let Piece::Delim { len, .. } = &mut pieces[oi + 1] {
        *len -= use_n;
    }
    if let Piece::Delim { len, .. } = &mut pieces[oi] {
        *len -= use_n;
    }
    pieces.insert(oi + 1, Piece::Node(node));
    let closer_at = oi + 2;
    if matches!(pieces[closer_at], Piece::Delim { len: 0, .. }) {
        pieces.remove(closer_at);
    }
    if matches!(pieces[oi], Piece::Delim { len: 0, .. }) {
        pieces.remove(oi);
    }
}
