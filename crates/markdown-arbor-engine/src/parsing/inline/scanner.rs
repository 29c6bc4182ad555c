use crate::ast::Inline;

use super::{InlineContext, Piece, cursor::Cursor, emphasis, links, raw_html};

/// Tokenizes inline text into pieces: finished nodes for the raw-zone
/// constructs (code spans, autolinks, raw HTML, breaks, escapes), delimiter
/// and bracket placeholders for everything resolved later.
pub(super) fn scan(text: &str, ctx: &InlineContext) -> Vec<Piece> {
    let mut cur = Cursor::new(text);
    let mut pieces: Vec<Piece> = Vec::new();
    let mut buf = String::new();

    while let Some(c) = cur.peek_char() {
        match c {
            '\\' => {
                cur.bump();
                match cur.peek_char() {
                    Some('\n') => {
                        while buf.ends_with(' ') {
                            buf.pop();
                        }
                        flush(&mut pieces, &mut buf);
                        pieces.push(Piece::Node(Inline::LineBreak));
                        cur.bump();
                    }
                    Some(p) if p.is_ascii_punctuation() => {
                        buf.push(p);
                        cur.bump();
                    }
                    _ => buf.push('\\'),
                }
            }
            '`' => scan_code_span(&mut pieces, &mut buf, &mut cur),
            '<' => match raw_html::try_angle(&mut cur) {
                Some(node) => {
                    flush(&mut pieces, &mut buf);
                    pieces.push(Piece::Node(node));
                }
                None => {
                    buf.push('<');
                    cur.bump();
                }
            },
            '\n' => {
                cur.bump();
                let hard = buf.ends_with("  ");
                while buf.ends_with(' ') {
                    buf.pop();
                }
                flush(&mut pieces, &mut buf);
                pieces.push(Piece::Node(if hard {
                    Inline::LineBreak
                } else {
                    Inline::SoftBreak
                }));
            }
            '*' | '_' => scan_delimiter_run(&mut pieces, &mut buf, &mut cur, c),
            '~' if ctx.extensions.strikethrough => {
                let len = cur.rest().chars().take_while(|&t| t == '~').count();
                if len == 2 {
                    scan_delimiter_run(&mut pieces, &mut buf, &mut cur, c);
                } else {
                    for _ in 0..len {
                        buf.push('~');
                    }
                    cur.bump_n(len);
                }
            }
            '!' if cur.starts_with("![") => {
                flush(&mut pieces, &mut buf);
                pieces.push(Piece::Bracket {
                    image: true,
                    active: true,
                });
                cur.bump_n(2);
            }
            '[' => {
                flush(&mut pieces, &mut buf);
                pieces.push(Piece::Bracket {
                    image: false,
                    active: true,
                });
                cur.bump();
            }
            ']' => {
                flush(&mut pieces, &mut buf);
                cur.bump();
                links::close_bracket(&mut pieces, &mut cur, ctx);
            }
            'w' | 'h' if ctx.extensions.autolink && at_word_start(&cur) => {
                if !try_bare_autolink(&mut pieces, &mut buf, &mut cur) {
                    buf.push(c);
                    cur.bump();
                }
            }
            _ => {
                buf.push(c);
                cur.bump();
            }
        }
    }
    flush(&mut pieces, &mut buf);
    pieces
}

fn flush(pieces: &mut Vec<Piece>, buf: &mut String) {
    if !buf.is_empty() {
        pieces.push(Piece::Text(std::mem::take(buf)));
    }
}

fn at_word_start(cur: &Cursor) -> bool {
    cur.char_before().is_none_or(|c| !c.is_alphanumeric())
}

fn scan_code_span(pieces: &mut Vec<Piece>, buf: &mut String, cur: &mut Cursor) {
    let rest = cur.rest();
    let n = rest.chars().take_while(|&c| c == '`').count();
    let bytes = rest.as_bytes();
    let mut i = n;
    let mut close = None;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let mut run = 0;
            while i + run < bytes.len() && bytes[i + run] == b'`' {
                run += 1;
            }
            if run == n {
                close = Some(i);
                break;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    match close {
        Some(pos) => {
            let mut content = rest[n..pos].replace('\n', " ");
            if content.len() >= 2
                && content.starts_with(' ')
                && content.ends_with(' ')
                && !content.chars().all(|c| c == ' ')
            {
                content = content[1..content.len() - 1].to_string();
            }
            flush(pieces, buf);
            pieces.push(Piece::Node(Inline::Code(content)));
            cur.bump_n(pos + n);
        }
        None => {
            for _ in 0..n {
                buf.push('`');
            }
            cur.bump_n(n);
        }
    }
}

fn scan_delimiter_run(pieces: &mut Vec<Piece>, buf: &mut String, cur: &mut Cursor, ch: char) {
    let len = cur.rest().chars().take_while(|&c| c == ch).count();
    let before = cur.char_before();
    let after = cur.rest()[len..].chars().next();
    let (can_open, can_close) = emphasis::flanking(ch, before, after);
    flush(pieces, buf);
    pieces.push(Piece::Delim {
        ch,
        len,
        orig: len,
        can_open,
        can_close,
    });
    cur.bump_n(len);
}

/// GFM bare-URL autolink: `http://`, `https://` or `www.` at a word start.
/// Trailing punctuation and unbalanced closing parentheses stay outside the
/// link. Returns false (consuming nothing) when the candidate is not a URL.
fn try_bare_autolink(pieces: &mut Vec<Piece>, buf: &mut String, cur: &mut Cursor) -> bool {
    let rest = cur.rest();
    let prefix = if rest.starts_with("http://") || rest.starts_with("https://") {
        ""
    } else if rest.starts_with("www.") {
        "http://"
    } else {
        return false;
    };
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(rest.len());
    let mut url = &rest[..end];
    loop {
        let Some(last) = url.chars().next_back() else {
            break;
        };
        let trim = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | '*' | '_' | '~' => true,
            ')' => {
                let opens = url.matches('(').count();
                let closes = url.matches(')').count();
                closes > opens
            }
            _ => false,
        };
        if !trim {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    let scheme_len = if prefix.is_empty() {
        url.find("//").map(|i| i + 2).unwrap_or(0)
    } else {
        "www.".len()
    };
    let host = &url[scheme_len.min(url.len())..];
    if host.is_empty() || !host.contains('.') {
        return false;
    }
    flush(pieces, buf);
    pieces.push(Piece::Node(Inline::Link {
        destination: format!("{prefix}{url}"),
        children: vec![Inline::Text(url.to_string())],
    }));
    cur.bump_n(url.len());
    true
}
