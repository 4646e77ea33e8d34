//! Utility functions for rule implementations.

pub mod comments;

#[doc(inline)]
pub use comments::{is_comment_line, is_preceded_by_comment, previous_line};
