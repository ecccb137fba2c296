//! Source documents and the blocks extracted from them.

use splitter_blocks::{Block, EncodingKind};
use splitter_fs::{NormalizedPath, io};

use crate::{DocumentConfig, Error, Result};

/// A source document read fully into memory. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub label: String,
    pub path: NormalizedPath,
    pub encoding: EncodingKind,
    pub text: String,
}

impl SourceDocument {
    /// Read the document described by `config`.
    pub fn load(config: &DocumentConfig) -> Result<Self> {
        let path = NormalizedPath::new(&config.path);
        let text = io::read_text(&path).map_err(|source| Error::SourceUnreadable {
            label: config.label.clone(),
            path: path.to_native(),
            source,
        })?;

        tracing::debug!(label = %config.label, path = %path, bytes = text.len(), "loaded source document");

        Ok(Self {
            label: config.label.clone(),
            path,
            encoding: config.encoding,
            text,
        })
    }

    /// A document whose text is already in memory.
    pub fn from_text(label: impl Into<String>, encoding: EncodingKind, text: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            path: NormalizedPath::new(&label),
            label,
            encoding,
            text: text.into(),
        }
    }
}

/// A block together with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    pub block: Block,
    pub origin: String,
}

impl ExtractedBlock {
    pub fn new(block: Block, origin: &SourceDocument) -> Self {
        Self {
            block,
            origin: origin.label.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.block.name
    }

    pub fn body(&self) -> &str {
        &self.block.body
    }
}
