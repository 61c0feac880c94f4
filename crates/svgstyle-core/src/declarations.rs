use crate::grammar::{self, escape, paren_group, quoted_string, skip_spaces, space_at};

/// One `property: value` pair from a style block, in source form.
///
/// An empty `property` marks a malformed declaration such as `:red`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Iterator over the declarations of a (comment-free) style block.
///
/// Tokenization is lenient: fragments without a colon are skipped, trailing or missing
/// semicolons are accepted, and running out of input simply ends the iteration.
#[derive(Debug, Clone)]
pub struct Declarations<'input> {
    input: &'input str,
    pos: usize,
}

enum PropertyEnd {
    /// Property spans `start..end`; the colon is at `colon`.
    Colon { end: usize, colon: usize },
    /// A `;` was reached before any colon.
    Semicolon(usize),
    Eof,
}

impl<'input> Declarations<'input> {
    pub fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    fn scan_property(&self, start: usize) -> PropertyEnd {
        let bytes = self.input.as_bytes();
        let mut i = start;
        // End of the last non-whitespace token, so trailing spaces are left out of the name
        // while a space swallowed by an escape (`\31 `) stays in.
        let mut end = start;
        while i < bytes.len() {
            match bytes[i] {
                b':' => return PropertyEnd::Colon { end, colon: i },
                b';' => return PropertyEnd::Semicolon(i),
                b'\\' => {
                    let Some(next) = escape(self.input, i) else {
                        return PropertyEnd::Eof;
                    };
                    i = next;
                    end = next;
                }
                _ => {
                    if let Some(len) = space_at(self.input, i) {
                        i += len;
                    } else {
                        i = grammar::next_char(self.input, i);
                        end = i;
                    }
                }
            }
        }
        PropertyEnd::Eof
    }

    /// Returns the end of the value and the offset where the next declaration starts.
    fn scan_value(&self, start: usize) -> (usize, usize) {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut i = start;
        loop {
            let after_spaces = skip_spaces(input, i);
            if after_spaces >= bytes.len() {
                return (i, bytes.len());
            }
            if bytes[after_spaces] == b';' {
                return (i, skip_spaces(input, after_spaces + 1));
            }
            i = after_spaces;

            // Strings and groups are taken whole so their `;` never ends the declaration; if
            // one does not match here its opening character is consumed like any other.
            let matched = match bytes[i] {
                b'\\' => escape(input, i),
                b'\'' | b'"' => quoted_string(input, i),
                b'(' => paren_group(input, i),
                _ => None,
            };
            i = matched.unwrap_or_else(|| grammar::next_char(input, i));
        }
    }
}

impl Iterator for Declarations<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }
            let start = skip_spaces(self.input, self.pos);
            match self.scan_property(start) {
                PropertyEnd::Colon { end, colon } => {
                    let value_start = skip_spaces(self.input, colon + 1);
                    let (value_end, next) = self.scan_value(value_start);
                    self.pos = next;
                    return Some(Declaration::new(
                        &self.input[start..end],
                        &self.input[value_start..value_end],
                    ));
                }
                PropertyEnd::Semicolon(at) => self.pos = at + 1,
                PropertyEnd::Eof => {
                    self.pos = self.input.len();
                    return None;
                }
            }
        }
    }
}

/// Splits a style block into its declarations, in source order.
///
/// The input is expected to be comment-free (see [`crate::comments::strip_comments`]).
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    Declarations::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(String, String)> {
        parse_declarations(input)
            .into_iter()
            .map(|d| (d.property, d.value))
            .collect()
    }

    fn p(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn splits_simple_declarations() {
        assert_eq!(
            pairs("fill:#000; color: #fff;"),
            vec![p("fill", "#000"), p("color", "#fff")]
        );
        assert_eq!(
            pairs("  fill : red  ;stroke:blue"),
            vec![p("fill", "red"), p("stroke", "blue")]
        );
    }

    #[test]
    fn keeps_semicolons_inside_url_groups() {
        assert_eq!(
            pairs("background:url(data:image/png;base64,iVBO==)"),
            vec![p("background", "url(data:image/png;base64,iVBO==)")]
        );
        assert_eq!(
            pairs("a:url('x;y') no-repeat;b:c"),
            vec![p("a", "url('x;y') no-repeat"), p("b", "c")]
        );
    }

    #[test]
    fn keeps_delimiters_inside_strings() {
        assert_eq!(
            pairs(r#"content:"a;b:c";font-family:'x; y'"#),
            vec![p("content", r#""a;b:c""#), p("font-family", "'x; y'")]
        );
        assert_eq!(
            pairs("content:'unterminated; fill:red"),
            vec![p("content", "'unterminated; fill:red")]
        );
    }

    #[test]
    fn escaped_delimiters_do_not_split() {
        assert_eq!(pairs(r"a\:b:c\;d;e:f"), vec![p(r"a\:b", r"c\;d"), p("e", "f")]);
        assert_eq!(pairs(r"font-family:\31 23"), vec![p("font-family", r"\31 23")]);
    }

    #[test]
    fn unbalanced_parens_fall_back_to_plain_text() {
        assert_eq!(pairs("a:url(x;b:c"), vec![p("a", "url(x"), p("b", "c")]);
        assert_eq!(pairs("a:f(g(h));b:c"), vec![p("a", "f(g(h))"), p("b", "c")]);
    }

    #[test]
    fn fragments_without_colon_are_skipped() {
        assert_eq!(pairs("garbage;fill:red"), vec![p("fill", "red")]);
        assert_eq!(pairs("fill:red;garbage"), vec![p("fill", "red")]);
        assert_eq!(pairs(";;fill:red;;"), vec![p("fill", "red")]);
        assert!(pairs("no colon at all").is_empty());
        assert!(pairs("").is_empty());
        assert!(pairs("   ").is_empty());
    }

    #[test]
    fn empty_property_and_empty_value_are_reported() {
        assert_eq!(pairs(":red;fill:"), vec![p("", "red"), p("fill", "")]);
    }

    #[test]
    fn value_keeps_inner_whitespace_and_case() {
        assert_eq!(
            pairs("font:Bold  12PX Arial ;"),
            vec![p("font", "Bold  12PX Arial")]
        );
        assert_eq!(pairs("a b:c"), vec![p("a b", "c")]);
    }

    #[test]
    fn long_inputs_scan_in_linear_time() {
        let spaces = format!("fill:a{}b", " ".repeat(200_000));
        assert_eq!(parse_declarations(&spaces).len(), 1);
        let opens = format!("fill:{}", "(".repeat(200_000));
        assert_eq!(parse_declarations(&opens).len(), 1);
        let quotes = format!("fill:{}", "'\n".repeat(100_000));
        assert_eq!(parse_declarations(&quotes).len(), 1);
    }
}
