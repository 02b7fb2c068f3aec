//! Shell-like argument lexer for chat command lines.
//!
//! Splits a line on unquoted whitespace while honoring:
//! - `'...'` and `"..."` quoting (only when a token has not started yet)
//! - `\x` escapes, which append `x` literally
//! - inline markup spans (`<tag>...</tag>`), appended verbatim as one unit
//!
//! Markup is never re-parsed: the span runs from the `<` to the first `>`
//! that follows the first `</` after it.

use nom::{
    bytes::complete::{tag, take_until},
    combinator::recognize,
    sequence::tuple,
    IResult,
};

use crate::error::{ArgsError, Result};

/// Split `line` into argument tokens.
///
/// # Examples
///
/// ```
/// use proxycmd_proto::tokenize;
///
/// assert_eq!(tokenize("!foo \"bar baz\" qux").unwrap(), vec!["!foo", "bar baz", "qux"]);
/// assert_eq!(tokenize("a\\ b c").unwrap(), vec!["a b", "c"]);
/// assert!(tokenize("say \"oops").is_err());
/// ```
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = None::<char>;
    let mut pos = 0;

    while let Some(ch) = line[pos..].chars().next() {
        let next = pos + ch.len_utf8();

        match ch {
            '<' => {
                let span =
                    markup_span(&line[pos..]).ok_or(ArgsError::MalformedMarkup { offset: pos })?;
                current.push_str(span);
                pos += span.len();
                continue;
            }
            '\\' => {
                let Some(escaped) = line[next..].chars().next() else {
                    return Err(ArgsError::UnterminatedEscape);
                };
                current.push(escaped);
                pos = next + escaped.len_utf8();
                continue;
            }
            '"' | '\'' if quote.is_none() && current.is_empty() => quote = Some(ch),
            c if quote == Some(c) => quote = None,
            c if quote.is_none() && c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }

        pos = next;
    }

    if let Some(open) = quote {
        return Err(ArgsError::UnterminatedQuote(open));
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Match a markup span at the start of `input`, which must begin with `<`.
fn markup_span(input: &str) -> Option<&str> {
    let body = input.get(1..)?;
    let parsed: IResult<&str, &str> =
        recognize(tuple((take_until("</"), tag("</"), take_until(">"), tag(">"))))(body);
    let (_, matched) = parsed.ok()?;
    Some(&input[..1 + matched.len()])
}
