//! Lazy extraction of named blocks from a source document.

use std::ops::Range;

use crate::encoding::Encoding;
use crate::scanner;

/// A named block found in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block name as written in the source, without quotes.
    pub name: String,
    /// The body between the delimiters, surrounding whitespace trimmed.
    pub body: String,
    /// Byte range of the body in the source, delimiters included.
    pub span: Range<usize>,
    /// The 1-based line on which the block's header starts.
    pub start_line: usize,
    /// The 1-based line holding the body's closing delimiter.
    pub end_line: usize,
}

/// Extracts named blocks using one [`Encoding`].
#[derive(Debug)]
pub struct BlockExtractor {
    encoding: Box<dyn Encoding>,
}

impl BlockExtractor {
    pub fn new(encoding: impl Encoding + 'static) -> Self {
        Self {
            encoding: Box::new(encoding),
        }
    }

    pub fn from_boxed(encoding: Box<dyn Encoding>) -> Self {
        Self { encoding }
    }

    /// Lazily iterate the blocks of `text` in source order.
    ///
    /// The iterator is `Clone`; calling `blocks` again starts a fresh scan.
    pub fn blocks<'e, 't>(&'e self, text: &'t str) -> Blocks<'e, 't> {
        Blocks {
            encoding: self.encoding.as_ref(),
            text,
            cursor: 0,
            line_pos: 0,
            line: 1,
        }
    }

    /// Collect every block of `text`.
    pub fn extract_all(&self, text: &str) -> Vec<Block> {
        self.blocks(text).collect()
    }

    /// Find the first block named `name`.
    pub fn find_block(&self, text: &str, name: &str) -> Option<Block> {
        self.blocks(text).find(|block| block.name == name)
    }

    pub fn has_block(&self, text: &str, name: &str) -> bool {
        self.find_block(text, name).is_some()
    }
}

/// Iterator over the blocks of one document. See [`BlockExtractor::blocks`].
#[derive(Debug, Clone)]
pub struct Blocks<'e, 't> {
    encoding: &'e dyn Encoding,
    text: &'t str,
    cursor: usize,
    // Line bookkeeping: offsets only move forward, so lines are counted once.
    line_pos: usize,
    line: usize,
}

impl Blocks<'_, '_> {
    fn line_at(&mut self, pos: usize) -> usize {
        let newlines = self.text.as_bytes()[self.line_pos..pos]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.line += newlines;
        self.line_pos = pos;
        self.line
    }
}

impl Iterator for Blocks<'_, '_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let termination = self.encoding.termination();

        loop {
            let header = self.encoding.locate(self.text, self.cursor)?;

            let Some(close) = scanner::find_close(self.text, header.open, termination) else {
                tracing::warn!(
                    name = %header.name,
                    encoding = %self.encoding.kind(),
                    "block body never closes, skipping"
                );
                self.cursor = header.open + 1;
                continue;
            };

            tracing::debug!(
                name = %header.name,
                start = header.start,
                end = close,
                "located block"
            );

            let start_line = self.line_at(header.start);
            let end_line = self.line_at(close);
            self.cursor = close + 1;

            return Some(Block {
                name: header.name,
                body: self.text[header.open + 1..close].trim().to_string(),
                span: header.open..close + 1,
                start_line,
                end_line,
            });
        }
    }
}

impl std::iter::FusedIterator for Blocks<'_, '_> {}
