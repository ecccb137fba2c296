//! Output paths and identifiers derived from block names.

use splitter_fs::NormalizedPath;

use crate::Category;

/// Directory under the output root that holds the category folders.
pub const TOOLS_DIR: &str = "tools";

/// Derives output paths and wrapper identifiers from block names.
///
/// Names follow `<prefix><word>_<word>...`. Every transform is pure, so a
/// name always maps to the same path and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTransformer {
    prefix: String,
    extension: String,
}

impl NameTransformer {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `tools/<category>/<dasherized-name>.<ext>`, relative to the output root.
    pub fn output_path(&self, category: Category, name: &str) -> NormalizedPath {
        NormalizedPath::new(TOOLS_DIR)
            .join(category.as_str())
            .join(&format!("{}.{}", dasherize(name), self.extension))
    }

    /// The name with its prefix removed and each word title-cased:
    /// `xrp_get_balance` becomes `GetBalance`.
    ///
    /// A name without the prefix is transformed as-is.
    pub fn identifier(&self, name: &str) -> String {
        let stem = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
        title_case(stem)
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .collect()
    }

    /// Name of the exported wrapper function, `handle<Identifier>`.
    pub fn function_name(&self, name: &str) -> String {
        format!("handle{}", self.identifier(name))
    }
}

/// Replace every `_` with `-`. Idempotent.
pub fn dasherize(name: &str) -> String {
    name.replace('_', "-")
}

/// Whether `name` can become a single file name: non-empty, no path
/// separators, no `..`, no control characters.
pub fn is_path_safe(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && !name.contains("..")
        && !name.chars().any(char::is_control)
}

/// Upper-case the first letter of each alphabetic run and lower-case the rest.
/// Any non-alphabetic character starts a new word.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
