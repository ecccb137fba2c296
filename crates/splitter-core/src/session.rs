//! End-to-end extraction run.

use std::collections::HashMap;
use std::sync::Arc;

use splitter_blocks::{BlockExtractor, Termination};
use splitter_fs::{NormalizedPath, OutputSink};

use crate::naming::is_path_safe;
use crate::{
    Category, CategoryIndex, Emitted, Error, ExtractedBlock, FileEmitter, NameTransformer,
    Result, SourceDocument, SplitterConfig,
};

/// One processed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub name: String,
    pub category: Category,
    pub path: NormalizedPath,
    pub outcome: Emitted,
}

/// Counts for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub label: String,
    /// Blocks written by this document.
    pub extracted: usize,
    /// Blocks whose output already existed.
    pub skipped: usize,
    pub files: Vec<EmittedFile>,
}

impl DocumentReport {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            extracted: 0,
            skipped: 0,
            files: Vec::new(),
        }
    }

    /// Files this document actually wrote, in source order.
    pub fn written(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter(|f| f.outcome == Emitted::Written)
    }
}

/// Counts for a whole run, documents in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub documents: Vec<DocumentReport>,
}

impl SessionReport {
    pub fn total(&self) -> usize {
        self.documents.iter().map(|d| d.extracted).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.documents.iter().map(|d| d.skipped).sum()
    }
}

/// Progress reported while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum SessionEvent<'a> {
    /// One block was written or skipped.
    File(&'a EmittedFile),
    /// A document finished; its counts are final.
    DocumentDone(&'a DocumentReport),
}

/// Drives extraction over an ordered list of documents.
///
/// Documents are processed strictly in order and blocks in source order, so
/// when two documents produce the same path the earlier one always wins.
/// There is no rollback: files written before a failure stay on disk.
#[derive(Debug)]
pub struct ExtractionSession {
    categories: CategoryIndex,
    naming: NameTransformer,
    emitter: FileEmitter,
    output_root: NormalizedPath,
    termination: Termination,
}

impl ExtractionSession {
    pub fn new(
        categories: CategoryIndex,
        naming: NameTransformer,
        emitter: FileEmitter,
        output_root: NormalizedPath,
    ) -> Self {
        Self {
            categories,
            naming,
            emitter,
            output_root,
            termination: Termination::default(),
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Build a session from `config`, writing through `sink`.
    pub fn from_config(config: &SplitterConfig, sink: Arc<dyn OutputSink>, dry_run: bool) -> Result<Self> {
        config.validate()?;
        let emitter = FileEmitter::new(sink, config.template.clone(), config.naming()).dry_run(dry_run);
        Ok(Self::new(
            config.category_index(),
            config.naming(),
            emitter,
            config.output_root(),
        )
        .with_termination(config.termination))
    }

    /// Read every configured document.
    ///
    /// All documents are read before any extraction starts, so an unreadable
    /// document aborts the run with nothing written.
    pub fn load(config: &SplitterConfig) -> Result<Vec<SourceDocument>> {
        config.documents.iter().map(SourceDocument::load).collect()
    }

    /// Process `documents` in order.
    pub fn run(&self, documents: &[SourceDocument]) -> Result<SessionReport> {
        self.run_with(documents, |_| {})
    }

    /// Process `documents` in order, calling `on_event` as each block is
    /// handled and each document completes.
    ///
    /// Events already delivered stay valid when the run later fails.
    pub fn run_with<F>(&self, documents: &[SourceDocument], mut on_event: F) -> Result<SessionReport>
    where
        F: FnMut(SessionEvent<'_>),
    {
        let mut claims = HashMap::new();
        let mut report = SessionReport::default();

        for document in documents {
            let done = self.process_document(document, &mut claims, &mut on_event)?;
            on_event(SessionEvent::DocumentDone(&done));
            report.documents.push(done);
        }

        tracing::info!(
            total = report.total(),
            skipped = report.total_skipped(),
            "extraction finished"
        );
        Ok(report)
    }

    /// Extract and emit every block of one document.
    ///
    /// `claims` maps each output path produced so far in this run to the
    /// block name that produced it.
    fn process_document(
        &self,
        document: &SourceDocument,
        claims: &mut HashMap<NormalizedPath, String>,
        on_event: &mut dyn FnMut(SessionEvent<'_>),
    ) -> Result<DocumentReport> {
        let encoding = document.encoding.build(self.naming.prefix(), self.termination)?;
        let extractor = BlockExtractor::from_boxed(encoding);
        let mut report = DocumentReport::new(&document.label);

        let _span = tracing::info_span!("document", label = %document.label).entered();

        for block in extractor.blocks(&document.text) {
            let extracted = ExtractedBlock::new(block, document);
            let name = extracted.name();
            if !is_path_safe(name) {
                return Err(Error::UnsafeBlockName {
                    name: name.to_string(),
                    document: extracted.origin.clone(),
                    line: extracted.block.start_line,
                });
            }
            let category = self.categories.lookup(name);
            let path = self
                .output_root
                .join(self.naming.output_path(category, name).as_str());

            let outcome = match claims.get(&path) {
                Some(owner) if owner != name => {
                    return Err(Error::PathCollision {
                        path: path.to_string(),
                        first: owner.clone(),
                        second: name.to_string(),
                    });
                }
                Some(_) => {
                    tracing::debug!(name, origin = %extracted.origin, "already emitted this run");
                    Emitted::Skipped
                }
                None => {
                    let outcome = self.emitter.emit(&path, name, extracted.body())?;
                    claims.insert(path.clone(), name.to_string());
                    outcome
                }
            };

            match outcome {
                Emitted::Written => report.extracted += 1,
                Emitted::Skipped => report.skipped += 1,
            }
            let file = EmittedFile {
                name: name.to_string(),
                category,
                path,
                outcome,
            };
            on_event(SessionEvent::File(&file));
            report.files.push(file);
        }

        tracing::info!(
            extracted = report.extracted,
            skipped = report.skipped,
            "document done"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WrapperTemplate;
    use splitter_blocks::EncodingKind;
    use splitter_fs::MemorySink;

    fn session(sink: &Arc<MemorySink>) -> ExtractionSession {
        let naming = NameTransformer::new("xrp_", "ts");
        let emitter = FileEmitter::new(sink.clone(), WrapperTemplate::default(), naming.clone());
        ExtractionSession::new(CategoryIndex::builtin(), naming, emitter, NormalizedPath::new("src"))
    }

    #[test]
    fn duplicate_name_in_one_document_is_skipped() {
        let sink = Arc::new(MemorySink::new());
        let doc = SourceDocument::from_text(
            "main",
            EncodingKind::DispatchCase,
            "case 'xrp_a': { first(); } case 'xrp_a': { second(); }",
        );

        let report = session(&sink).run(&[doc]).unwrap();

        assert_eq!(report.documents[0].extracted, 1);
        assert_eq!(report.documents[0].skipped, 1);
        let content = sink.read(&NormalizedPath::new("src/tools/misc/xrp-a.ts")).unwrap();
        assert!(content.contains("first();"));
    }

    #[test]
    fn colliding_paths_are_an_error() {
        let sink = Arc::new(MemorySink::new());
        let doc = SourceDocument::from_text(
            "main",
            EncodingKind::DispatchCase,
            "case 'xrp_a_b': { one(); } case 'xrp_a-b': { two(); }",
        );

        let err = session(&sink).run(&[doc]).unwrap_err();

        assert!(matches!(
            err,
            Error::PathCollision { ref first, ref second, .. } if first == "xrp_a_b" && second == "xrp_a-b"
        ));
    }

    #[test]
    fn report_lists_files_in_source_order() {
        let sink = Arc::new(MemorySink::new());
        let doc = SourceDocument::from_text(
            "main",
            EncodingKind::DispatchCase,
            "case 'xrp_mint_nft': { m(); } case 'xrp_get_balance': { b(); }",
        );

        let report = session(&sink).run(&[doc]).unwrap();

        let files: Vec<_> = report.documents[0]
            .written()
            .map(|f| (f.category, f.path.as_str().to_string()))
            .collect();
        assert_eq!(
            files,
            vec![
                (Category::Nft, "src/tools/nft/xrp-mint-nft.ts".to_string()),
                (Category::Core, "src/tools/core/xrp-get-balance.ts".to_string()),
            ]
        );
    }
}
