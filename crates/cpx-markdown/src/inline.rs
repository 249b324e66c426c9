//! Inline span scanner.
//!
//! Patterns are tried in a fixed priority order (strikethrough, bold,
//! italic, highlight, code, link, autolink) and the first pattern that
//! matches *anywhere* in the remaining text wins; priority beats position.
//! Text before the winning match is emitted as one plain span, unparsed.
//! Unbalanced markers never fail; they degrade to literal text.
//!
//! The scanner keeps a cursor into the input instead of re-slicing the
//! remainder per match, so adversarial input (long text, no closing marker)
//! stays linear in the common paths.

use crate::doc::Inline;
use crate::options::RenderOptions;

/// A successful pattern match inside the remainder.
struct Found {
    /// Byte offset of the opening marker within the remainder.
    start: usize,
    /// Byte offset just past the closing marker.
    end: usize,
    node: Inline,
}

/// Splits `text` into a flat span sequence. Never fails.
pub(crate) fn parse_inline(text: &str, opts: &RenderOptions) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(found) = first_match(rest, opts) else {
            spans.push(Inline::Text(rest.to_string()));
            break;
        };
        if found.start > 0 {
            spans.push(Inline::Text(rest[..found.start].to_string()));
        }
        spans.push(found.node);
        rest = &rest[found.end..];
    }

    spans
}

/// The ordered pattern chain. Order is a compatibility contract, not an
/// optimization: reordering changes which span wins on ambiguous input.
fn first_match(rest: &str, opts: &RenderOptions) -> Option<Found> {
    if opts.strikethrough
        && let Some(found) = find_delimited(rest, "~~", Inline::Strikethrough)
    {
        return Some(found);
    }
    if let Some(found) = find_bold(rest, opts.underscore_markers) {
        return Some(found);
    }
    if let Some(found) = find_italic(rest, opts.underscore_markers) {
        return Some(found);
    }
    if opts.highlight
        && let Some(found) = find_delimited(rest, "==", Inline::Highlight)
    {
        return Some(found);
    }
    if let Some(found) = find_delimited(rest, "`", Inline::Code) {
        return Some(found);
    }
    if let Some(found) = find_link(rest, opts.link_titles) {
        return Some(found);
    }
    if opts.autolink
        && let Some(found) = find_autolink(rest)
    {
        return Some(found);
    }
    None
}

/// First `marker…marker` pair. The span body may be empty (`**` with no
/// bold closer reads as an empty italic, like the source dialect).
///
/// If the first opener has no closer, no later opener can have one either
/// (any later closer would itself be a later occurrence), so one probe
/// suffices.
fn find_delimited(rest: &str, marker: &str, make: fn(String) -> Inline) -> Option<Found> {
    let open = rest.find(marker)?;
    let body = open + marker.len();
    let close = rest[body..].find(marker)? + body;
    Some(Found {
        start: open,
        end: close + marker.len(),
        node: make(rest[body..close].to_string()),
    })
}

/// `**bold**`, plus `__bold__` when underscore markers are enabled.
/// Marker pairs must match symmetrically; the earliest viable opener wins.
fn find_bold(rest: &str, underscore: bool) -> Option<Found> {
    let star = find_delimited(rest, "**", Inline::Bold);
    let under = underscore
        .then(|| find_delimited(rest, "__", Inline::Bold))
        .flatten();
    earliest(star, under)
}

/// `*italic*`, plus `_italic_` when underscore markers are enabled.
fn find_italic(rest: &str, underscore: bool) -> Option<Found> {
    let star = find_delimited(rest, "*", Inline::Italic);
    let under = underscore
        .then(|| find_delimited(rest, "_", Inline::Italic))
        .flatten();
    earliest(star, under)
}

fn earliest(a: Option<Found>, b: Option<Found>) -> Option<Found> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.start < a.start { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// `[text](url)` with an optional trailing `"title"` inside the parens.
///
/// Candidate `[` positions are tried left to right; for each, candidate `](`
/// splits left to right; the first combination with a well-formed tail wins.
/// Link text may therefore contain stray brackets from rejected candidates.
fn find_link(rest: &str, allow_title: bool) -> Option<Found> {
    for (open, _) in rest.match_indices('[') {
        let mut search = open + 1;
        while let Some(off) = rest[search..].find(']') {
            let close = search + off;
            if rest[close + 1..].starts_with('(') {
                let tail = &rest[close + 2..];
                if let Some((url, title, consumed)) = scan_link_tail(tail, allow_title) {
                    return Some(Found {
                        start: open,
                        end: close + 2 + consumed,
                        node: Inline::Link {
                            text: rest[open + 1..close].to_string(),
                            url,
                            title,
                        },
                    });
                }
            }
            search = close + 1;
        }
    }
    None
}

/// Scans `url ["title"])`, returning the URL, optional title, and the byte
/// count consumed from `tail` (through the closing paren).
fn scan_link_tail(tail: &str, allow_title: bool) -> Option<(String, Option<String>, usize)> {
    let mut cursor = 0;
    loop {
        let ahead = &tail[cursor..];
        if allow_title
            && let Some((title, len)) = match_link_title(ahead)
        {
            return Some((tail[..cursor].to_string(), Some(title), cursor + len));
        }
        if ahead.starts_with(')') {
            return Some((tail[..cursor].to_string(), None, cursor + 1));
        }
        cursor += ahead.chars().next()?.len_utf8();
    }
}

/// Matches `<whitespace>+"title")`, returning the title and bytes consumed.
fn match_link_title(s: &str) -> Option<(String, usize)> {
    let ws: usize = s
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum();
    if ws == 0 {
        return None;
    }
    let inner = s[ws..].strip_prefix('"')?;
    let mut search = 0;
    while let Some(off) = inner[search..].find('"') {
        let quote = search + off;
        if inner[quote + 1..].starts_with(')') {
            // ws + opening quote + title + closing quote + paren
            return Some((inner[..quote].to_string(), ws + 1 + quote + 2));
        }
        search = quote + 1;
    }
    None
}

/// A bare `http://` / `https://` URL. The URL run after the scheme must be
/// non-empty and stops at whitespace or any of `<>"[]`.
fn find_autolink(rest: &str) -> Option<Found> {
    let mut search = 0;
    loop {
        let http = rest[search..].find("http://").map(|off| (off, 7));
        let https = rest[search..].find("https://").map(|off| (off, 8));
        let (off, scheme_len) = match (http, https) {
            (Some(a), Some(b)) => {
                if b.0 < a.0 {
                    b
                } else {
                    a
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return None,
        };
        let start = search + off;
        let run: usize = rest[start + scheme_len..]
            .chars()
            .take_while(|c| !c.is_whitespace() && !matches!(c, '<' | '>' | '"' | '[' | ']'))
            .map(char::len_utf8)
            .sum();
        if run > 0 {
            let end = start + scheme_len + run;
            return Some(Found {
                start,
                end,
                node: Inline::Autolink(rest[start..end].to_string()),
            });
        }
        search = start + 1;
    }
}
