//! Run configuration.
//!
//! Every field has a default matching the stock layout (`src/index.ts` as the
//! primary dispatch document, `src/additional-tools.ts` as the table
//! document, output under `src/tools`), so a config file only needs the
//! fields it changes:
//!
//! ```toml
//! output_root = "generated"
//! termination = "single-nesting"
//!
//! [[documents]]
//! label = "main index.ts"
//! path = "src/index.ts"
//! encoding = "dispatch-case"
//!
//! [categories]
//! xrp_get_server_info = "help"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use splitter_blocks::{EncodingKind, Termination};
use splitter_fs::NormalizedPath;

use crate::{Category, CategoryIndex, Error, NameTransformer, Result, WrapperTemplate};

/// One source document to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Name used in log lines and the per-document report.
    pub label: String,
    pub path: String,
    pub encoding: EncodingKind,
}

impl DocumentConfig {
    pub fn new(label: impl Into<String>, path: impl Into<String>, encoding: EncodingKind) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            encoding,
        }
    }
}

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Directory the `tools/<category>/` tree is created under.
    pub output_root: String,
    /// Namespace prefix every handler name starts with.
    pub prefix: String,
    pub termination: Termination,
    /// Processed in order; earlier documents win path conflicts.
    pub documents: Vec<DocumentConfig>,
    pub template: WrapperTemplate,
    /// Extra name-to-category mappings, applied over the built-in table.
    pub categories: BTreeMap<String, Category>,
    /// Start from an empty table instead of the built-in one.
    pub replace_builtin_categories: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            output_root: "src".to_string(),
            prefix: "xrp_".to_string(),
            termination: Termination::default(),
            documents: vec![
                DocumentConfig::new("main index.ts", "src/index.ts", EncodingKind::DispatchCase),
                DocumentConfig::new(
                    "additional tools",
                    "src/additional-tools.ts",
                    EncodingKind::TableEntry,
                ),
            ],
            template: WrapperTemplate::default(),
            categories: BTreeMap::new(),
            replace_builtin_categories: false,
        }
    }
}

impl SplitterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(invalid("at least one document is required"));
        }
        if let Some(doc) = self.documents.iter().find(|d| d.path.trim().is_empty()) {
            return Err(invalid(format!("document {:?} has an empty path", doc.label)));
        }
        let extension = &self.template.extension;
        if extension.is_empty() || extension.contains(['/', '\\', '.']) {
            return Err(invalid(format!("extension {extension:?} must be a bare file extension")));
        }
        Ok(())
    }

    /// The category table for this run.
    pub fn category_index(&self) -> CategoryIndex {
        let mut index = if self.replace_builtin_categories {
            CategoryIndex::new()
        } else {
            CategoryIndex::builtin()
        };
        index.extend(self.categories.clone());
        index
    }

    pub fn naming(&self) -> NameTransformer {
        NameTransformer::new(&self.prefix, &self.template.extension)
    }

    pub fn output_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.output_root)
    }

    /// Resolve relative document paths and the output root against `base`,
    /// typically the directory holding the config file.
    pub fn rebase(mut self, base: &Path) -> Self {
        let rebase = |path: &str| -> String {
            if Path::new(path).is_absolute() {
                path.to_string()
            } else {
                NormalizedPath::new(base).join(path).as_str().to_string()
            }
        };
        for doc in &mut self.documents {
            doc.path = rebase(&doc.path);
        }
        self.output_root = rebase(&self.output_root);
        self
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}
