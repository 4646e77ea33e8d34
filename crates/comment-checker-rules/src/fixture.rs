//! Test documents built from HCL-like source without a real parser.
//!
//! Recognizes top-level `type "label" ... {` headers, single-line
//! `key = value` attributes directly inside them, nested blocks (skipped),
//! and closing braces on their own line. Ranges run from the key to the end
//! of the trimmed line.

use comment_checker_core::{Attribute, Block, Document, MemoryDocuments};

/// Builds a store from `(filename, source)` pairs, in order.
pub(crate) fn documents(files: &[(&str, &str)]) -> MemoryDocuments {
    let mut docs = MemoryDocuments::new();
    for (name, source) in files {
        let doc = Document::new(*name, *source);
        for block in scan_blocks(&doc, source) {
            docs.add_block(block);
        }
        docs.add_document(doc);
    }
    docs
}

fn scan_blocks(doc: &Document, source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;
    let mut depth = 0usize;
    let mut offset = 0;

    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        if trimmed == "}" {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                blocks.extend(current.take());
            }
            continue;
        }

        if trimmed.ends_with('{') {
            if depth == 0 {
                current = Some(parse_header(trimmed));
            }
            depth += 1;
            continue;
        }

        if depth == 1 {
            if let (Some(block), Some((key, _))) = (current.as_mut(), trimmed.split_once('=')) {
                let start = line_start + (line.len() - trimmed.len());
                let end = line_start + line.len();
                block.insert_attribute(Attribute::new(key.trim(), doc.range(start, end)));
            }
        }
    }

    blocks
}

fn parse_header(header: &str) -> Block {
    let header = header.trim_end_matches('{').trim();
    let (block_type, rest) = header.split_once(' ').unwrap_or((header, ""));
    let labels = rest
        .split('"')
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, label)| label.to_string());
    Block::new(block_type, labels)
}

#[test]
fn fixture_ranges_match_parser_positions() {
    let docs = documents(&[(
        "resource.tf",
        "\nmodule \"example\" {\n  source = \"./modules/example\"\n  instance_type = \"t2.micro\"\n}",
    )]);
    let blocks = comment_checker_core::BlockProvider::blocks(
        &docs,
        &comment_checker_core::BlockQuery::new("module").label("name"),
    )
    .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].label(), "example");
    let range = &blocks[0].attribute("instance_type").unwrap().range;
    assert_eq!((range.start.line, range.start.column), (4, 3));
    assert_eq!((range.end.line, range.end.column), (4, 29));
}
