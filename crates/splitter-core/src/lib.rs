//! Extraction orchestration for handler-splitter
//!
//! This crate ties the block detector to the output tree:
//!
//! - **CategoryIndex**: block name to category routing, with a `misc` fallback
//! - **NameTransformer**: output paths and handler identifiers derived from names
//! - **FileEmitter**: renders the wrapper template and writes it once per path
//! - **ExtractionSession**: runs every configured document in order and reports counts
//!
//! # Architecture
//!
//! ```text
//!                 splitter-cli
//!                      |
//!                splitter-core
//!                      |
//!          +-----------+-----------+
//!          |                       |
//!     splitter-fs           splitter-blocks
//! ```

pub mod category;
pub mod config;
pub mod document;
pub mod emitter;
pub mod error;
pub mod naming;
pub mod session;
pub mod template;

pub use category::{Category, CategoryIndex};
pub use config::{DocumentConfig, SplitterConfig};
pub use document::{ExtractedBlock, SourceDocument};
pub use emitter::{Emitted, FileEmitter};
pub use error::{Error, Result};
pub use naming::NameTransformer;
pub use session::{DocumentReport, EmittedFile, ExtractionSession, SessionEvent, SessionReport};
pub use template::WrapperTemplate;
