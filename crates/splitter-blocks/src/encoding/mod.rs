//! Block-boundary grammars.
//!
//! An [`Encoding`] knows how a named block is introduced in one kind of
//! source document: which marker carries the name and where the body's
//! opening delimiter sits. The [`crate::BlockExtractor`] is shared by all
//! encodings and does the body matching.

mod dispatch;
mod table;

pub use dispatch::DispatchCase;
pub use table::TableEntry;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::scanner::Termination;

/// Location of a block header found by an [`Encoding`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The block name, without quotes.
    pub name: String,
    /// Byte offset where the header's first marker starts.
    pub start: usize,
    /// Byte offset of the `{` opening the body.
    pub open: usize,
}

/// A pluggable block-boundary grammar.
pub trait Encoding: std::fmt::Debug + Send + Sync {
    /// Short label for logs.
    fn kind(&self) -> EncodingKind;

    /// Find the first header starting at or after byte offset `from`.
    fn locate(&self, text: &str, from: usize) -> Option<Header>;

    /// Rule used to find the end of each body.
    fn termination(&self) -> Termination;
}

/// The supported encodings, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingKind {
    DispatchCase,
    TableEntry,
}

impl EncodingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DispatchCase => "dispatch-case",
            Self::TableEntry => "table-entry",
        }
    }

    /// Build the encoding for handler names starting with `prefix`.
    pub fn build(&self, prefix: &str, termination: Termination) -> Result<Box<dyn Encoding>> {
        Ok(match self {
            Self::DispatchCase => Box::new(DispatchCase::new(prefix)?.with_termination(termination)),
            Self::TableEntry => Box::new(TableEntry::new(prefix)?.with_termination(termination)),
        })
    }
}

impl std::fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regex fragment matching a quoted name beginning with `prefix`, capturing
/// it in group `single` or `double` depending on the quote used.
fn quoted_name(prefix: &str) -> String {
    let prefix = regex::escape(prefix);
    format!(r#"(?:'(?P<single>{prefix}[^'\n]*)'|"(?P<double>{prefix}[^"\n]*)")"#)
}

fn captured_name(caps: &regex::Captures<'_>) -> Option<String> {
    caps.name("single")
        .or_else(|| caps.name("double"))
        .map(|m| m.as_str().to_string())
}
