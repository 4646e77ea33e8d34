//! Detection of documentation comments directly above an item.
//!
//! Only the single physical line immediately preceding the item is
//! inspected. A comment further up, or separated by a blank line, does not
//! count.
//!
//! ```text
//! module "example" {
//!   # Pinned because the default is too small.   <- previous line
//!   instance_type = "t2.micro"                   <- item starts here
//! }
//! ```

use crate::document::Attribute;

/// Single-line comment markers recognized in front of an item.
pub const COMMENT_MARKERS: &[&str] = &["#", "//"];

/// Returns the physical line above the one containing `offset`.
///
/// The returned slice excludes both line terminators' `\n`; a `\r` from a
/// CRLF ending is still present. Returns `None` when `offset` is on the first
/// line or past the end of `bytes`.
#[must_use]
pub fn previous_line(bytes: &[u8], offset: usize) -> Option<&[u8]> {
    if offset > bytes.len() {
        return None;
    }
    let own_line_start = bytes[..offset].iter().rposition(|b| *b == b'\n')?;
    let prev_line_start = bytes[..own_line_start]
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1);
    Some(&bytes[prev_line_start..own_line_start])
}

/// Returns true if `line`, with ASCII whitespace trimmed, is a comment with
/// some text after its marker. A bare `#` or `//` is not a documentation
/// comment.
#[must_use]
pub fn is_comment_line(line: &[u8]) -> bool {
    let line = trim_ascii_whitespace(line);
    COMMENT_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker.as_bytes()) && line.len() > marker.len())
}

/// Returns true if the line directly above byte `offset` is a non-empty
/// comment.
#[must_use]
pub fn is_preceded_by_comment_at(bytes: &[u8], offset: usize) -> bool {
    previous_line(bytes, offset).is_some_and(is_comment_line)
}

/// Returns true if the line directly above `attribute` is a non-empty
/// comment.
///
/// `bytes` must be the full content of the file the attribute belongs to.
#[must_use]
pub fn is_preceded_by_comment(attribute: &Attribute, bytes: &[u8]) -> bool {
    is_preceded_by_comment_at(bytes, attribute.range.start.byte)
}

fn trim_ascii_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}
