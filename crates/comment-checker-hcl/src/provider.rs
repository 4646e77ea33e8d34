//! `BlockProvider` and `ByteSource` over HCL files parsed by `hcl-edit`.

use std::ops::Range;
use std::path::{Path, PathBuf};

use comment_checker_core::{
    Attribute, Block, BlockProvider, BlockQuery, ByteSource, Document, MemoryDocuments,
    ProviderError,
};
use hcl_edit::structure::{Attribute as HclAttribute, Block as HclBlock, BlockLabel, Structure};
use hcl_edit::Span;
use thiserror::Error;
use tracing::{debug, info, warn};

const BOM: &str = "\u{feff}";

/// Errors raised while loading HCL files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("{filename} is not valid UTF-8 (invalid byte at offset {offset})")]
    Encoding {
        /// Document name.
        filename: String,
        /// Offset of the first invalid byte.
        offset: usize,
    },

    /// The file is not valid HCL.
    #[error("failed to parse {filename}: {message}")]
    Parse {
        /// Document name.
        filename: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A document with the same name was already loaded.
    #[error("{filename} was loaded twice")]
    Duplicate {
        /// Document name.
        filename: String,
    },
}

/// Parsed HCL documents.
///
/// Holds each file's raw bytes next to the top-level blocks found in it.
/// Blocks are answered in load order, then document order.
#[derive(Debug, Default)]
pub struct HclDocuments {
    store: MemoryDocuments,
}

impl HclDocuments {
    /// Creates an empty set of documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` as an HCL body and stores it under `name`.
    ///
    /// Returns the number of top-level blocks found.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, the text is not UTF-8, or the
    /// text is not valid HCL.
    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<usize, LoadError> {
        let name = name.into();
        if self.store.document(&name).is_some() {
            return Err(LoadError::Duplicate { filename: name });
        }

        let document = Document::new(name, bytes);
        let blocks = parse_blocks(&document)?;
        debug!("Parsed {} block(s) from {}", blocks.len(), document.name());

        let count = blocks.len();
        self.store.add_document(document);
        for block in blocks {
            self.store.add_block(block);
        }
        Ok(count)
    }

    /// Reads and parses one file, storing it under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&mut self, path: &Path, name: impl Into<String>) -> Result<usize, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_source(name, bytes)
    }

    /// Reads and parses `paths`, naming each document by its path relative
    /// to `root`.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read or parsed.
    pub fn load_files<I, P>(&mut self, root: &Path, paths: I) -> Result<usize, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut loaded = 0;
        for path in paths {
            let path = path.as_ref();
            self.load_file(path, document_name(root, path))?;
            loaded += 1;
        }
        info!("Loaded {} file(s) under {}", loaded, root.display());
        Ok(loaded)
    }

    /// Looks up a loaded document.
    #[must_use]
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.store.document(name)
    }

    /// Number of loaded documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl BlockProvider for HclDocuments {
    fn blocks(&self, query: &BlockQuery) -> Result<Vec<Block>, ProviderError> {
        self.store.blocks(query)
    }
}

impl ByteSource for HclDocuments {
    fn file_bytes(&self, filename: &str) -> Result<&[u8], ProviderError> {
        self.store.file_bytes(filename)
    }
}

/// Path of `path` relative to `root`, with `/` separators.
fn document_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

fn parse_blocks(document: &Document) -> Result<Vec<Block>, LoadError> {
    let text = std::str::from_utf8(document.bytes()).map_err(|e| LoadError::Encoding {
        filename: document.name().to_string(),
        offset: e.valid_up_to(),
    })?;

    // Spans are relative to the text handed to the parser.
    let (body_text, shift) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, BOM.len()),
        None => (text, 0),
    };

    let body = hcl_edit::parser::parse_body(body_text).map_err(|e| LoadError::Parse {
        filename: document.name().to_string(),
        message: e.to_string(),
    })?;

    Ok(body
        .iter()
        .filter_map(|structure| match structure {
            Structure::Block(block) => Some(convert_block(block, document, shift)),
            Structure::Attribute(_) => None,
        })
        .collect())
}

fn convert_block(block: &HclBlock, document: &Document, shift: usize) -> Block {
    let mut converted = Block::new(block.ident.as_str(), block.labels.iter().map(label_text));

    for structure in block.body.iter() {
        let Structure::Attribute(attribute) = structure else {
            continue;
        };
        let name = attribute.key.as_str();
        let Some(span) = attribute_span(attribute, document.bytes(), shift) else {
            warn!("No source span for `{}` in {}", name, document.name());
            continue;
        };
        // The parser rejects redefined keys, so names are unique here.
        converted.insert_attribute(Attribute::new(name, document.range(span.start, span.end)));
    }

    converted
}

fn label_text(label: &BlockLabel) -> String {
    match label {
        BlockLabel::Ident(ident) => ident.as_str().to_string(),
        BlockLabel::String(string) => string.as_str().to_string(),
    }
}

/// Byte range from the attribute key to the end of its value, in document
/// offsets, without surrounding whitespace.
fn attribute_span(attribute: &HclAttribute, bytes: &[u8], shift: usize) -> Option<Range<usize>> {
    let whole = attribute.span();
    let start = attribute
        .key
        .span()
        .or_else(|| whole.clone())
        .map(|s| s.start)?;
    let end = attribute
        .value
        .span()
        .or(whole)
        .map(|s| s.end)?;

    let mut start = (start + shift).min(bytes.len());
    let mut end = (end + shift).min(bytes.len());
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comment_checker_core::Position;

    fn modules(docs: &HclDocuments) -> Vec<Block> {
        docs.blocks(&BlockQuery::new("module").label("name")).unwrap()
    }

    #[test]
    fn attribute_ranges_cover_key_to_value() {
        let mut docs = HclDocuments::new();
        let count = docs
            .add_source(
                "resource.tf",
                "\nmodule \"example\" {\n  source = \"./modules/example\"\n  instance_type = \"t2.micro\"\n}",
            )
            .unwrap();
        assert_eq!(count, 1);

        let blocks = modules(&docs);
        assert_eq!(blocks[0].label(), "example");
        let range = &blocks[0].attribute("instance_type").unwrap().range;
        assert_eq!(range.filename, "resource.tf");
        assert_eq!(range.start, Position::new(4, 3, 53));
        assert_eq!(range.end, Position::new(4, 29, 79));
    }

    #[test]
    fn trailing_comment_is_outside_the_range() {
        let mut docs = HclDocuments::new();
        docs.add_source("main.tf", "module \"m\" {\n  count = 2 # two\n}\n")
            .unwrap();
        let blocks = modules(&docs);
        let range = &blocks[0].attribute("count").unwrap().range;
        assert_eq!((range.start.column, range.end.column), (3, 12));
    }

    #[test]
    fn byte_order_mark_keeps_original_offsets() {
        let mut docs = HclDocuments::new();
        docs.add_source("main.tf", "\u{feff}module \"m\" {\n  a = 1\n}\n")
            .unwrap();
        let blocks = modules(&docs);
        let range = &blocks[0].attribute("a").unwrap().range;
        assert_eq!(range.start, Position::new(2, 3, 18));
        assert_eq!(docs.file_bytes("main.tf").unwrap()[..3], [0xef, 0xbb, 0xbf]);
    }

    #[test]
    fn non_utf8_is_rejected() {
        let mut docs = HclDocuments::new();
        let err = docs
            .add_source("bad.tf", b"module \"m\" {\n  a = \"\xff\"\n}\n".to_vec())
            .unwrap_err();
        assert!(matches!(err, LoadError::Encoding { offset: 20, .. }));
        assert!(docs.is_empty());
    }

    #[test]
    fn invalid_hcl_is_rejected() {
        let mut docs = HclDocuments::new();
        let err = docs.add_source("bad.tf", "module \"m\" {\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref filename, .. } if filename == "bad.tf"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut docs = HclDocuments::new();
        docs.add_source("main.tf", "").unwrap();
        let err = docs.add_source("main.tf", "").unwrap_err();
        assert_eq!(err.to_string(), "main.tf was loaded twice");
    }

    #[test]
    fn only_direct_attributes_are_collected() {
        let mut docs = HclDocuments::new();
        docs.add_source(
            "main.tf",
            "module \"m\" {\n  source = \"x\"\n  lifecycle {\n    a = 1\n  }\n}\n",
        )
        .unwrap();
        let blocks = modules(&docs);
        let block = &blocks[0];
        assert!(block.attribute("source").is_some());
        assert!(block.attribute("a").is_none());
    }

    #[test]
    fn label_arity_filters_blocks() {
        let mut docs = HclDocuments::new();
        docs.add_source(
            "main.tf",
            "resource \"aws_instance\" \"web\" {\n  ami = \"x\"\n}\nmodule \"m\" {}\nmodule {}\n",
        )
        .unwrap();
        let labels: Vec<String> = modules(&docs).iter().map(|b| b.label().to_string()).collect();
        assert_eq!(labels, vec!["m"]);

        let resources = docs
            .blocks(&BlockQuery::new("resource").label("type").label("name"))
            .unwrap();
        assert_eq!(resources[0].labels, vec!["aws_instance", "web"]);
    }

    #[test]
    fn redefined_attribute_is_a_parse_error() {
        let mut docs = HclDocuments::new();
        let err = docs
            .add_source("main.tf", "module \"m\" {\n  a = 1\n  a = 2\n}\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref filename, .. } if filename == "main.tf"));
        assert!(docs.is_empty());
    }

    #[test]
    fn unknown_file_is_not_found() {
        let docs = HclDocuments::new();
        assert!(matches!(
            docs.file_bytes("missing.tf"),
            Err(ProviderError::FileNotFound { .. })
        ));
    }

    #[test]
    fn load_files_names_documents_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("modules");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("main.tf"), "module \"a\" {}\n").unwrap();
        std::fs::write(nested.join("inner.tf"), "module \"b\" {}\n").unwrap();

        let mut docs = HclDocuments::new();
        let loaded = docs
            .load_files(
                dir.path(),
                [dir.path().join("main.tf"), nested.join("inner.tf")],
            )
            .unwrap();
        assert_eq!(loaded, 2);
        assert!(docs.document("main.tf").is_some());
        assert!(docs.document("modules/inner.tf").is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut docs = HclDocuments::new();
        let err = docs
            .load_file(&dir.path().join("absent.tf"), "absent.tf")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
