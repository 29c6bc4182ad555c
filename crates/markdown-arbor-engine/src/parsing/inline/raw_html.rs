use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Inline;

use super::cursor::Cursor;

fn uri_autolink() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<[A-Za-z][A-Za-z0-9+.\-]{1,31}:[^<>\x00-\x20]*>").expect("uri autolink")
    })
}

fn email_autolink() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^<[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+>",
        )
        .expect("email autolink")
    })
}

fn html_constructs() -> &'static [Regex; 5] {
    static RES: OnceLock<[Regex; 5]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(?s)^<!--.*?-->").expect("html comment"),
            Regex::new(r"(?s)^<!\[CDATA\[.*?\]\]>").expect("html cdata"),
            Regex::new(r"(?s)^<\?.*?\?>").expect("html processing instruction"),
            Regex::new(r"^<![A-Za-z][^>]*>").expect("html declaration"),
            Regex::new(
                r#"^</?[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>"#,
            )
            .expect("html tag"),
        ]
    })
}

/// Recognizes an angle-bracket construct at the cursor: URI autolink, email
/// autolink, or raw inline HTML. Consumes it and returns the node, or
/// consumes nothing.
pub(super) fn try_angle(cur: &mut Cursor) -> Option<Inline> {
    let rest = cur.rest();

    if let Some(m) = uri_autolink().find(rest) {
        let destination = rest[1..m.end() - 1].to_string();
        cur.bump_n(m.end());
        return Some(Inline::Link {
            children: vec![Inline::Text(destination.clone())],
            destination,
        });
    }
    if let Some(m) = email_autolink().find(rest) {
        let address = &rest[1..m.end() - 1];
        let node = Inline::Link {
            destination: format!("mailto:{address}"),
            children: vec![Inline::Text(address.to_string())],
        };
        cur.bump_n(m.end());
        return Some(node);
    }
    for re in html_constructs() {
        if let Some(m) = re.find(rest) {
            let html = m.as_str().to_string();
            cur.bump_n(m.end());
            return Some(Inline::Html(html));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle(input: &str) -> Option<Inline> {
        let mut cur = Cursor::new(input);
        try_angle(&mut cur)
    }

    #[test]
    fn uri_autolink_node() {
        let node = angle("<https://example.com/a?b=c>").unwrap();
        match node {
            Inline::Link {
                destination,
                children,
            } => {
                assert_eq!(destination, "https://example.com/a?b=c");
                assert_eq!(
                    children,
                    vec![Inline::Text("https://example.com/a?b=c".to_string())]
                );
            }
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn email_autolink_gets_mailto() {
        let node = angle("<user@example.com>").unwrap();
        match node {
            Inline::Link { destination, .. } => assert_eq!(destination, "mailto:user@example.com"),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn open_tag_with_attributes() {
        assert_eq!(
            angle(r#"<a href="x" class='y' disabled>"#),
            Some(Inline::Html(r#"<a href="x" class='y' disabled>"#.to_string()))
        );
    }

    #[test]
    fn closing_tag_and_comment() {
        assert_eq!(angle("</em>"), Some(Inline::Html("</em>".to_string())));
        assert_eq!(
            angle("<!-- hi -->"),
            Some(Inline::Html("<!-- hi -->".to_string()))
        );
    }

    #[test]
    fn spaced_tag_is_html_not_autolink() {
        // A scheme cannot contain spaces, but `not` with attributes `a` and
        // `link` is a well-formed open tag.
        assert_eq!(
            angle("<not a link>"),
            Some(Inline::Html("<not a link>".to_string()))
        );
    }

    #[test]
    fn bare_angle_is_text() {
        assert_eq!(angle("< div"), None);
        assert_eq!(angle("<3"), None);
        assert_eq!(angle("<1 bad>"), None);
    }
}
