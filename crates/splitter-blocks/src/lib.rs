//! Named handler block detection for handler-splitter.
//!
//! A source document embeds many handlers, each keyed by a string name. This
//! crate locates where each named block starts and ends and yields the blocks
//! lazily in source order.
//!
//! # Encodings
//!
//! How a block is introduced is described by an [`Encoding`]:
//!
//! - [`DispatchCase`]: `case 'xrp_get_balance': { ... }` inside a `switch`.
//! - [`TableEntry`]: `{ name: 'xrp_get_balance', ..., handler: async (args) => { ... } }`
//!   inside an object-literal table.
//!
//! # Termination
//!
//! Where a body ends is decided by the [`Termination`] rule. The default,
//! [`Termination::Balanced`], counts nesting depth and ignores delimiters
//! inside strings and comments. [`Termination::SingleNesting`] reproduces the
//! older one-level matcher and truncates deeper bodies at the first
//! plausible close.
//!
//! ```
//! use splitter_blocks::{BlockExtractor, DispatchCase};
//!
//! let source = "switch (name) { case 'xrp_get_balance': { return fmt(x); } }";
//! let extractor = BlockExtractor::new(DispatchCase::new("xrp_").unwrap());
//!
//! let blocks = extractor.extract_all(source);
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].name, "xrp_get_balance");
//! assert_eq!(blocks[0].body, "return fmt(x);");
//! ```

pub mod encoding;
pub mod error;
pub mod extractor;
pub mod scanner;

pub use encoding::{DispatchCase, Encoding, EncodingKind, Header, TableEntry};
pub use error::{Error, Result};
pub use extractor::{Block, BlockExtractor, Blocks};
pub use scanner::{Termination, find_close, in_comment};
