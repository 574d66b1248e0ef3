//! X coordinate extraction from free-form G-code lines.
//!
//! A line is scanned left to right for the first X token:
//!
//! ```text
//! token   ::= prefix? ('X' | 'x') ws* number
//! prefix  ::= ('-' | ws)*          // a '-' here forces the value negative
//! number  ::= ('+' | '-')? digit+ ('.' digit*)?
//! ```
//!
//! An `X` that is not followed by a valid number is skipped and the scan
//! continues after it. Only the first token of a line is ever used.
//!
//! A `-` only negates the value when it sits directly in front of the chosen
//! token's `X`. A `-X` elsewhere on the line, e.g. `X1.0 -X2.0` or
//! `X1.0 (OFFSET -X)`, leaves the first token's value positive. This is
//! deliberately narrower than a whole-line search for `-X`.

use tracing::debug;

/// First X token found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XToken<'a> {
    /// Byte offset of the `X` letter
    pub offset: usize,
    /// A `-` (optionally followed by whitespace) directly precedes the `X`
    pub negated: bool,
    /// Numeric literal including its own sign, e.g. `-0.7` or `1.915`
    pub literal: &'a str,
}

impl XToken<'_> {
    /// Resolve the token to a signed value.
    ///
    /// A negating prefix wins over the literal's own sign. Returns `None` if the
    /// literal does not parse as a float.
    pub fn value(&self) -> Option<f64> {
        let value = match self.literal.parse::<f64>() {
            Ok(v) => v,
            Err(e) => {
                debug!("Unparseable X literal {:?}: {}", self.literal, e);
                return None;
            }
        };
        if self.negated {
            Some(-value.abs())
        } else {
            Some(value)
        }
    }
}

/// Find the first X token on a line
pub fn find_x_token(line: &str) -> Option<XToken<'_>> {
    for (offset, ch) in line.char_indices() {
        if !ch.eq_ignore_ascii_case(&'x') {
            continue;
        }
        let after = offset + ch.len_utf8();
        if let Some(literal) = scan_number(&line[after..]) {
            return Some(XToken {
                offset,
                negated: has_negating_prefix(&line[..offset]),
                literal,
            });
        }
    }
    None
}

/// Extract the X value of a line, if it has one
pub fn extract_x_value(line: &str) -> Option<f64> {
    find_x_token(line).and_then(|token| token.value())
}

/// Match `ws* sign? digit+ ('.' digit*)?` at the start of `rest`, returning the
/// literal without the leading whitespace.
fn scan_number(rest: &str) -> Option<&str> {
    let trimmed = rest.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    Some(&trimmed[..end])
}

fn has_negating_prefix(before: &str) -> bool {
    before.trim_end().ends_with('-')
}
