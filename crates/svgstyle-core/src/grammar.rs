//! Scanners for the building blocks of inline style text.
//!
//! Every primitive takes the full input plus a byte offset and returns the byte offset just
//! past the match, or `None` when the primitive does not match there. Scanners never backtrack,
//! so the cost of any primitive is linear in the length of what it consumes.
//!
//! All structural characters are ASCII, so scanning works on bytes; non-ASCII characters are
//! always consumed whole to keep offsets on UTF-8 boundaries.

/// Whitespace as understood by the style grammar (Unicode whitespace plus BOM).
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Byte length of the whitespace character at `pos`, if there is one.
pub fn space_at(input: &str, pos: usize) -> Option<usize> {
    let ch = char_at(input, pos)?;
    is_space(ch).then(|| ch.len_utf8())
}

/// Offset after any run of whitespace starting at `pos`.
pub fn skip_spaces(input: &str, mut pos: usize) -> usize {
    while let Some(len) = space_at(input, pos) {
        pos += len;
    }
    pos
}

pub(crate) fn char_at(input: &str, pos: usize) -> Option<char> {
    input.get(pos..)?.chars().next()
}

/// Offset just past the character starting at `pos` (or `pos` at end of input).
pub(crate) fn next_char(input: &str, pos: usize) -> usize {
    pos + char_at(input, pos).map_or(0, char::len_utf8)
}

/// `\` + 1-6 hex digits + optional whitespace, `\` + line break, or `\` + any character.
pub fn escape(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&b'\\') {
        return None;
    }
    let start = pos + 1;
    let first = *bytes.get(start)?;

    if first.is_ascii_hexdigit() {
        let mut end = start;
        while end < bytes.len() && end - start < 6 && bytes[end].is_ascii_hexdigit() {
            end += 1;
        }
        // A code point escape swallows one whitespace character.
        return Some(end + space_at(input, end).unwrap_or(0));
    }

    if first == b'\r' && bytes.get(start + 1) == Some(&b'\n') {
        return Some(start + 2);
    }

    Some(next_char(input, start))
}

fn quoted(input: &str, pos: usize, quote: u8) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&quote) {
        return None;
    }
    let mut i = pos + 1;
    loop {
        let Some(&b) = bytes.get(i) else {
            // Unterminated strings run to the end of the input.
            return Some(i);
        };
        match b {
            _ if b == quote => return Some(i + 1),
            b'\n' | b'\r' => return None,
            b'\\' => i = escape(input, i)?,
            _ => i = next_char(input, i),
        }
    }
}

/// A `'...'` string. Unterminated strings match up to the end of the input.
pub fn single_quoted(input: &str, pos: usize) -> Option<usize> {
    quoted(input, pos, b'\'')
}

/// A `"..."` string. Unterminated strings match up to the end of the input.
pub fn double_quoted(input: &str, pos: usize) -> Option<usize> {
    quoted(input, pos, b'"')
}

/// Either kind of quoted string.
pub fn quoted_string(input: &str, pos: usize) -> Option<usize> {
    single_quoted(input, pos).or_else(|| double_quoted(input, pos))
}

/// A `(...)` group, e.g. the argument of `url(data:image/png;base64,...)`.
///
/// Groups do not nest; a bare `(` or the end of input before `)` means no match.
pub fn paren_group(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    let mut i = pos + 1;
    loop {
        match *bytes.get(i)? {
            b')' => return Some(i + 1),
            b'(' => return None,
            b'\\' => i = escape(input, i)?,
            b'\'' | b'"' => i = quoted_string(input, i)?,
            _ => i = next_char(input, i),
        }
    }
}
