//! Brace matching over free-form source text.
//!
//! The scanner does not parse the host language. It walks bytes, tracking
//! nesting depth, and knows just enough about string literals and comments
//! to ignore delimiters hidden inside them. All delimiters are ASCII, so
//! every offset it returns is a valid `str` char boundary.

use serde::{Deserialize, Serialize};

/// Rule deciding where a block body ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Depth-counting match of the opening delimiter, any nesting depth.
    #[default]
    Balanced,
    /// One level of nesting tolerated; the body ends at the first `}` not
    /// preceded by an unmatched `{` since the previous `}`. Deeper bodies
    /// are truncated.
    SingleNesting,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::SingleNesting => "single-nesting",
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte offset of the `}` closing the `{` at `open`, or `None` if the text
/// ends first.
///
/// `open` must index a `{` in `text`; any other byte yields `None`.
pub fn find_close(text: &str, open: usize, termination: Termination) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'{') {
        return None;
    }
    match termination {
        Termination::Balanced => balanced_close(text.as_bytes(), open),
        Termination::SingleNesting => single_nesting_close(text.as_bytes(), open),
    }
}

/// Whether byte offset `pos` lies inside a line or block comment.
///
/// Walks `text` from the start with the same string and template rules as
/// the body scanner, so `//` inside a string literal does not count.
pub fn in_comment(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < pos.min(bytes.len()) {
        let next = match bytes[i] {
            b'\'' | b'"' => skip_quoted(bytes, i),
            b'`' => skip_template(bytes, i).unwrap_or(bytes.len()),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = skip_line_comment(bytes, i);
                if pos < end {
                    return true;
                }
                end
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = skip_block_comment(bytes, i);
                if pos < end {
                    return true;
                }
                end
            }
            _ => i + 1,
        };
        i = next;
    }

    false
}

fn balanced_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'\'' | b'"' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'`' => {
                i = skip_template(bytes, i)?;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn single_nesting_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut nested = false;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'{' => nested = true,
            b'}' if nested => nested = false,
            b'}' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Skip a `'` or `"` string starting at `start`. Returns the offset just past
/// the closing quote.
///
/// A newline ends the literal early: such quotes are almost always stray
/// apostrophes in regex literals or prose, and stopping at the line keeps
/// them from swallowing the rest of the document.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip a template literal starting at `start`, descending into `${ ... }`
/// substitutions. `None` if a substitution never closes.
fn skip_template(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i = balanced_close(bytes, i + 1)? + 1;
            }
            _ => i += 1,
        }
    }
    Some(bytes.len())
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |offset| start + 2 + offset + 2)
}
