//! Locates the blocks a rule inspects.

use comment_checker_core::{Block, BlockQuery, CheckError, RuleContext};
use tracing::debug;

/// Label name used when querying single-label blocks.
pub const NAME_LABEL: &str = "name";

/// Returns every `block_type` block carrying exactly one label, in document
/// order, with attributes-only bodies.
///
/// # Errors
///
/// Returns [`CheckError::Document`] if the provider fails.
pub fn locate_blocks(ctx: &RuleContext<'_>, block_type: &str) -> Result<Vec<Block>, CheckError> {
    let query = BlockQuery::new(block_type).label(NAME_LABEL);
    let blocks = ctx
        .blocks(&query)
        .map_err(|e| CheckError::document(format!("locating `{block_type}` blocks"), e))?;
    debug!("Located {} `{}` block(s)", blocks.len(), block_type);
    Ok(blocks)
}
