//! Chat markup handling.
//!
//! Client chat text arrives wrapped in a single `<FONT>` element. The
//! wrapper is stripped before lexing so the lexer does not swallow the
//! whole line as one markup span. Outbound console text goes the other
//! way and has its markup-significant characters entity-escaped.

use std::borrow::Cow;

const FONT_OPEN: &[u8] = b"<font";
const FONT_CLOSE: &[u8] = b"</font>";

/// Characters replaced by [`escape_entities`].
const ESCAPED_CHARS: &[char] = &['&', '<', '>'];

/// Remove the first `<FONT ...>` open tag and the first `</FONT>` after it.
///
/// The tag name is matched ASCII case-insensitively and may carry
/// attributes. Everything else, including markup nested inside the
/// wrapper, is preserved verbatim.
///
/// - No open tag: returned unchanged.
/// - Open tag without a closing `>`: returned unchanged.
/// - Open tag without a matching `</FONT>`: only the open tag is removed.
///
/// ```
/// use proxycmd_proto::strip_font;
///
/// assert_eq!(strip_font("<FONT>!help</FONT>"), "!help");
/// assert_eq!(strip_font("<FONT color=\"#fff\">a <b>b</b></FONT>"), "a <b>b</b>");
/// assert_eq!(strip_font("plain"), "plain");
/// ```
pub fn strip_font(line: &str) -> Cow<'_, str> {
    let Some(open_start) = find_open_tag(line) else {
        return Cow::Borrowed(line);
    };
    let Some(open_len) = line[open_start..].find('>').map(|i| i + 1) else {
        return Cow::Borrowed(line);
    };

    let mut stripped = String::with_capacity(line.len());
    stripped.push_str(&line[..open_start]);
    let rest = &line[open_start + open_len..];

    match find_ascii_ci(rest.as_bytes(), FONT_CLOSE, 0) {
        Some(close) => {
            stripped.push_str(&rest[..close]);
            stripped.push_str(&rest[close + FONT_CLOSE.len()..]);
        }
        None => stripped.push_str(rest),
    }

    Cow::Owned(stripped)
}

/// Escape `&`, `<` and `>` as HTML entities.
///
/// Inserted entities are never re-scanned, so `&` inside `&lt;` is not
/// escaped twice.
///
/// ```
/// use proxycmd_proto::escape_entities;
///
/// assert_eq!(escape_entities("a<b & c>"), "a&lt;b &amp; c&gt;");
/// ```
pub fn escape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains(ESCAPED_CHARS) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Find `<font` followed by `>` or whitespace.
fn find_open_tag(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut from = 0;
    while let Some(at) = find_ascii_ci(bytes, FONT_OPEN, from) {
        match bytes.get(at + FONT_OPEN.len()) {
            Some(b'>') => return Some(at),
            Some(b) if b.is_ascii_whitespace() => return Some(at),
            _ => from = at + 1,
        }
    }
    None
}

/// ASCII case-insensitive substring search starting at byte `from`.
///
/// `needle` must be ASCII, so any match lands on a char boundary.
fn find_ascii_ci(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| i + from)
}
