use regex::Regex;

use super::{Encoding, EncodingKind, Header, captured_name, quoted_name};
use crate::scanner::{self, Termination};
use crate::{Error, Result};

/// Blocks written as entries of an object-literal table:
///
/// ```text
/// {
///   name: 'xrp_get_offers',
///   description: '...',
///   handler: async (args) => { ... },
/// }
/// ```
///
/// The `handler:` marker only counts when it belongs to the same entry as the
/// `name:` field. Under [`Termination::Balanced`] the entry extends to its
/// matching `}`; under [`Termination::SingleNesting`] no `}` may appear
/// between the name and the handler.
#[derive(Debug, Clone)]
pub struct TableEntry {
    entry: Regex,
    handler: Regex,
    termination: Termination,
}

const HANDLER_PATTERN: &str = concat!(
    r"\bhandler\s*:\s*(?:async\b\s*)?",
    r"(?:function\b\s*[\w$]*\s*\([^)]*\)|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
    r"\s*\{",
);

impl TableEntry {
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r"\{{\s*name\s*:\s*{}", quoted_name(prefix));
        let entry = Regex::new(&pattern).map_err(|source| Error::InvalidPattern {
            marker: "name field",
            prefix: prefix.to_string(),
            source,
        })?;
        let handler = Regex::new(HANDLER_PATTERN).map_err(|source| Error::InvalidPattern {
            marker: "handler field",
            prefix: prefix.to_string(),
            source,
        })?;
        Ok(Self {
            entry,
            handler,
            termination: Termination::default(),
        })
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Offset past which a `handler:` marker no longer belongs to the entry
    /// opened at `entry_open`.
    fn entry_limit(&self, text: &str, entry_open: usize, name_end: usize) -> usize {
        match self.termination {
            Termination::Balanced => scanner::find_close(text, entry_open, Termination::Balanced)
                .unwrap_or(text.len()),
            Termination::SingleNesting => text[name_end..]
                .find('}')
                .map_or(text.len(), |offset| name_end + offset),
        }
    }
}

impl Encoding for TableEntry {
    fn kind(&self) -> EncodingKind {
        EncodingKind::TableEntry
    }

    fn locate(&self, text: &str, from: usize) -> Option<Header> {
        let mut cursor = from;

        while let Some(caps) = self.entry.captures_at(text, cursor) {
            let whole = caps.get(0)?;
            if scanner::in_comment(text, whole.start()) {
                cursor = whole.end();
                continue;
            }
            let name = captured_name(&caps)?;
            let limit = self.entry_limit(text, whole.start(), whole.end());

            if let Some(handler) = self.handler.find(&text[whole.end()..limit]) {
                return Some(Header {
                    name,
                    start: whole.start(),
                    open: whole.end() + handler.end() - 1,
                });
            }

            tracing::debug!(name = %name, "table entry without inline handler");
            cursor = whole.end();
        }

        None
    }

    fn termination(&self) -> Termination {
        self.termination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"export const additionalTools = [
  {
    name: 'xrp_get_offers',
    description: 'List offers',
    inputSchema: { type: 'object' },
    handler: async (args: any) => {
      return list(args);
    },
  },
];"#;

    #[test]
    fn locates_handler_body_after_name() {
        let header = TableEntry::new("xrp_").unwrap().locate(TABLE, 0).unwrap();

        assert_eq!(header.name, "xrp_get_offers");
        assert_eq!(&TABLE[header.open..header.open + 1], "{");
        assert!(TABLE[..header.open].ends_with("=> "));
    }

    #[test]
    fn accepts_handler_shapes() {
        let shapes = [
            "handler: async (args) => {",
            "handler: (args) => {",
            "handler: async args => {",
            "handler: args => {",
            "handler: async function (args) {",
            "handler: function named(args) {",
        ];
        let encoding = TableEntry::new("xrp_").unwrap();
        for shape in shapes {
            let text = format!("{{ name: 'xrp_x', {shape} return 1; }} }}");
            let header = encoding.locate(&text, 0);
            assert!(header.is_some(), "shape not recognized: {shape}");
        }
    }

    #[test]
    fn handler_of_next_entry_is_not_borrowed() {
        let text = r#"[
  { name: 'xrp_a', description: 'no handler' },
  { name: 'other', handler: async () => { return 2; } },
]"#;
        assert!(TableEntry::new("xrp_").unwrap().locate(text, 0).is_none());
    }

    #[test]
    fn single_nesting_rejects_brace_before_handler() {
        let text = "{ name: 'xrp_a', schema: { type: 'object' }, handler: async () => { go(); } }";
        let balanced = TableEntry::new("xrp_").unwrap();
        let legacy = TableEntry::new("xrp_")
            .unwrap()
            .with_termination(Termination::SingleNesting);

        assert!(balanced.locate(text, 0).is_some());
        assert!(legacy.locate(text, 0).is_none());
    }

    #[test]
    fn skips_entry_without_handler_and_finds_next() {
        let text = "{ name: 'xrp_a' } { name: 'xrp_b', handler: () => { b(); } }";
        let header = TableEntry::new("xrp_").unwrap().locate(text, 0).unwrap();
        assert_eq!(header.name, "xrp_b");
    }

    #[test]
    fn commented_out_entries_are_skipped() {
        let text = "/* { name: 'xrp_old', handler: () => { old(); } }, */\n{ name: 'xrp_new', handler: () => { n(); } }";
        let header = TableEntry::new("xrp_").unwrap().locate(text, 0).unwrap();
        assert_eq!(header.name, "xrp_new");
    }
}
