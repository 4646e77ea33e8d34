//! Document model and the capability traits rules query it through.
//!
//! Rules never parse source text themselves. A host supplies parsed
//! [`Block`]s through a [`BlockProvider`] and raw file contents through a
//! [`ByteSource`]; [`MemoryDocuments`] is an in-memory implementation of both.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::types::{Position, SourceRange};

/// Errors raised by a document provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No document with the requested name is known to the provider.
    #[error("document not found: {filename}")]
    FileNotFound {
        /// The requested file name.
        filename: String,
    },

    /// The provider failed to answer a block query.
    #[error("failed to query `{block_type}` blocks: {message}")]
    Query {
        /// Block type that was requested.
        block_type: String,
        /// Provider-specific detail.
        message: String,
    },
}

/// Table of line start offsets for a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds the index by recording the offset after every `\n`.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            bytes
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Byte offset where the given 1-indexed line starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|i| self.line_starts.get(i))
            .copied()
    }

    /// Converts a byte offset into a [`Position`].
    ///
    /// Columns count characters, so multi-byte UTF-8 sequences advance the
    /// column by one. Offsets past the end clamp to the end of `bytes`.
    #[must_use]
    pub fn position(&self, bytes: &[u8], offset: usize) -> Position {
        let offset = offset.min(bytes.len());
        let line_idx = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        let column = bytes[line_start..offset]
            .iter()
            .filter(|b| (**b & 0xC0) != 0x80)
            .count()
            + 1;
        Position::new(line_idx + 1, column, offset)
    }
}

/// A source file: name plus immutable raw content.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    bytes: Vec<u8>,
    lines: LineIndex,
}

impl Document {
    /// Creates a document and derives its line table.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let lines = LineIndex::new(&bytes);
        Self {
            name: name.into(),
            bytes,
            lines,
        }
    }

    /// Name the document is addressed by.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line table of this document.
    #[must_use]
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Position of a byte offset in this document.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(&self.bytes, offset)
    }

    /// Range between two byte offsets in this document.
    #[must_use]
    pub fn range(&self, start: usize, end: usize) -> SourceRange {
        SourceRange::new(self.name.clone(), self.position(start), self.position(end))
    }
}

/// A named attribute inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name (e.g., `instance_type`).
    pub name: String,
    /// Range from the start of the name to the end of the value.
    pub range: SourceRange,
}

impl Attribute {
    /// Creates a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, range: SourceRange) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }
}

/// A structural unit of a document with its direct attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block type (e.g., `module`).
    pub block_type: String,
    /// Ordered labels (e.g., the module call name).
    pub labels: Vec<String>,
    /// Direct attributes keyed by name.
    pub attributes: HashMap<String, Attribute>,
}

impl Block {
    /// Creates a block without attributes.
    #[must_use]
    pub fn new<I, S>(block_type: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_type: block_type.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute. An existing attribute with the same name is kept.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.insert_attribute(attribute);
        self
    }

    /// Inserts an attribute unless one with the same name exists.
    ///
    /// Returns false when the name was already taken.
    pub fn insert_attribute(&mut self, attribute: Attribute) -> bool {
        if self.attributes.contains_key(&attribute.name) {
            return false;
        }
        self.attributes.insert(attribute.name.clone(), attribute);
        true
    }

    /// First label, used to identify the block in messages.
    #[must_use]
    pub fn label(&self) -> &str {
        self.labels.first().map_or("", String::as_str)
    }

    /// Looks up a direct attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

/// Request for all blocks of one type with a fixed label arity.
///
/// Bodies are always returned attributes-only: nested blocks are not
/// descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockQuery {
    /// Block type to match.
    pub block_type: String,
    /// Names of the labels the block must carry, in order.
    pub label_names: Vec<String>,
}

impl BlockQuery {
    /// Creates a query for blocks of the given type without labels.
    #[must_use]
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            label_names: Vec::new(),
        }
    }

    /// Adds a required label.
    #[must_use]
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.label_names.push(name.into());
        self
    }

    /// Whether `block` answers this query.
    ///
    /// Blocks of the right type but with the wrong number of labels are
    /// rejected with a warning.
    #[must_use]
    pub fn matches(&self, block: &Block) -> bool {
        if block.block_type != self.block_type {
            return false;
        }
        if block.labels.len() != self.label_names.len() {
            warn!(
                "Skipping `{}` block with {} label(s), expected {}",
                block.block_type,
                block.labels.len(),
                self.label_names.len()
            );
            return false;
        }
        true
    }
}

/// Source of parsed blocks.
pub trait BlockProvider {
    /// Returns every block matching `query`, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce the blocks.
    fn blocks(&self, query: &BlockQuery) -> Result<Vec<Block>, ProviderError>;
}

/// Source of raw file contents.
pub trait ByteSource {
    /// Returns the complete raw bytes of `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::FileNotFound`] for unknown names.
    fn file_bytes(&self, filename: &str) -> Result<&[u8], ProviderError>;
}

/// In-memory documents and blocks.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocuments {
    documents: Vec<Document>,
    blocks: Vec<Block>,
}

impl MemoryDocuments {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Adds a block. Blocks are returned in insertion order.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Adds a document in place.
    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Adds a block in place.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Looks up a document by name.
    #[must_use]
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name() == name)
    }

    /// Number of documents held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl BlockProvider for MemoryDocuments {
    fn blocks(&self, query: &BlockQuery) -> Result<Vec<Block>, ProviderError> {
        Ok(self
            .blocks
            .iter()
            .filter(|b| query.matches(b))
            .cloned()
            .collect())
    }
}

impl ByteSource for MemoryDocuments {
    fn file_bytes(&self, filename: &str) -> Result<&[u8], ProviderError> {
        self.document(filename)
            .map(Document::bytes)
            .ok_or_else(|| ProviderError::FileNotFound {
                filename: filename.to_string(),
            })
    }
}
