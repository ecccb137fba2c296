use regex::Regex;

use super::{Encoding, EncodingKind, Header, captured_name, quoted_name};
use crate::scanner::{self, Termination};
use crate::{Error, Result};

/// Blocks written as `case '<name>': { ... }` arms of a dispatch `switch`.
///
/// The body's `{` must follow the label directly (whitespace allowed).
/// Arms that fall through to a call, such as `case 'x': return f();`, have no
/// inline body and are not blocks. Labels inside comments are ignored.
#[derive(Debug, Clone)]
pub struct DispatchCase {
    label: Regex,
    termination: Termination,
}

impl DispatchCase {
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r"\bcase\s+{}\s*:\s*\{{", quoted_name(prefix));
        let label = Regex::new(&pattern).map_err(|source| Error::InvalidPattern {
            marker: "case label",
            prefix: prefix.to_string(),
            source,
        })?;
        Ok(Self {
            label,
            termination: Termination::default(),
        })
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }
}

impl Encoding for DispatchCase {
    fn kind(&self) -> EncodingKind {
        EncodingKind::DispatchCase
    }

    fn locate(&self, text: &str, from: usize) -> Option<Header> {
        let mut cursor = from;

        while let Some(caps) = self.label.captures_at(text, cursor) {
            let whole = caps.get(0)?;
            if scanner::in_comment(text, whole.start()) {
                tracing::debug!(offset = whole.start(), "case label inside comment");
                cursor = whole.end();
                continue;
            }
            return Some(Header {
                name: captured_name(&caps)?,
                start: whole.start(),
                open: whole.end() - 1,
            });
        }

        None
    }

    fn termination(&self) -> Termination {
        self.termination
    }
}
