use crate::grammar;
use std::borrow::Cow;

/// Removes `/* ... */` comments from style text.
///
/// Escapes and quoted strings are skipped as whole units, so a `/*` inside a string is never
/// treated as a comment start. A needless escape of a non-hex letter (or `-`) is unescaped, the
/// same way a CSS consumer would read it. An unterminated comment runs to the end of the input.
pub fn strip_comments(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0usize;
    let mut i = 0usize;
    // Plain `/` characters at the end of the text kept so far.
    let mut trailing_slashes = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'/' {
            trailing_slashes = 0;
        }
        match bytes[i] {
            b'\\' => {
                let Some(end) = grammar::escape(input, i) else {
                    i += 1;
                    continue;
                };
                let escaped = bytes[i + 1];
                if escaped == b'-' || matches!(escaped.to_ascii_lowercase(), b'g'..=b'z') {
                    let out = out.get_or_insert_with(|| String::with_capacity(input.len()));
                    out.push_str(&input[copied..i]);
                    copied = i + 1;
                }
                i = end;
            }
            b'\'' | b'"' => match grammar::quoted_string(input, i) {
                Some(end) => i = end,
                None => i += 1,
            },
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let out = out.get_or_insert_with(|| String::with_capacity(input.len()));
                out.push_str(&input[copied..i]);
                let mut end = comment_end(input, i + 2);
                // `/` + comment + `*` would form a new comment start once the comment is gone.
                while trailing_slashes > 0 && bytes.get(end) == Some(&b'*') {
                    out.pop();
                    trailing_slashes -= 1;
                    end = comment_end(input, end + 1);
                }
                copied = end;
                i = end;
            }
            b'/' => {
                trailing_slashes += 1;
                i += 1;
            }
            _ => i = grammar::next_char(input, i),
        }
    }

    match out {
        Some(mut out) => {
            out.push_str(&input[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(input),
    }
}

/// Offset just past the `*/` closing a comment whose body starts at `from`.
fn comment_end(input: &str, from: usize) -> usize {
    input
        .get(from..)
        .and_then(|rest| rest.find("*/"))
        .map_or(input.len(), |rel| from + rel + 2)
}
