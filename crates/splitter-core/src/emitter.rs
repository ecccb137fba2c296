//! Materializes extracted blocks as standalone handler files.

use std::sync::Arc;

use splitter_fs::{NormalizedPath, OutputSink};

use crate::{Error, NameTransformer, Result, WrapperTemplate};

/// Outcome of [`FileEmitter::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// The wrapper was written (or would be, in dry-run mode).
    Written,
    /// A file already existed at the path; nothing was written.
    Skipped,
}

/// Writes one wrapper file per block, never overwriting an existing file.
pub struct FileEmitter {
    sink: Arc<dyn OutputSink>,
    template: WrapperTemplate,
    naming: NameTransformer,
    dry_run: bool,
}

impl FileEmitter {
    pub fn new(sink: Arc<dyn OutputSink>, template: WrapperTemplate, naming: NameTransformer) -> Self {
        Self {
            sink,
            template,
            naming,
            dry_run: false,
        }
    }

    /// Report what would be written without touching the sink.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Render the wrapper for `name` around `body` and write it to `path`.
    ///
    /// Returns [`Emitted::Skipped`] without writing if `path` already exists.
    /// Missing parent directories are created first.
    pub fn emit(&self, path: &NormalizedPath, name: &str, body: &str) -> Result<Emitted> {
        if self.sink.exists(path) {
            tracing::warn!(name, path = %path, "output exists, skipping");
            return Ok(Emitted::Skipped);
        }

        let content = self
            .template
            .render(&self.naming.function_name(name), name, body);

        if self.dry_run {
            tracing::debug!(name, path = %path, bytes = content.len(), "dry run, not writing");
            return Ok(Emitted::Written);
        }

        let emit_failed = |source| Error::EmitFailed {
            name: name.to_string(),
            path: path.to_native(),
            source,
        };

        if let Some(parent) = path.parent() {
            self.sink.create_dir_all(&parent).map_err(emit_failed)?;
        }
        self.sink.write(path, &content).map_err(emit_failed)?;

        tracing::info!(name, path = %path, "wrote handler");
        Ok(Emitted::Written)
    }
}

impl std::fmt::Debug for FileEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEmitter")
            .field("template", &self.template)
            .field("naming", &self.naming)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}
