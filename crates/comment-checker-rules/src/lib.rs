//! # comment-checker-rules
//!
//! Built-in rules for comment-checker.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CC001 | `module-attribute-comments` | Requires a comment directly above configured module arguments |
//!
//! ## Usage
//!
//! ```ignore
//! use comment_checker_core::Checker;
//! use comment_checker_rules::{FieldSpecs, ModuleAttributeComments};
//!
//! let checker = Checker::builder()
//!     .rule(ModuleAttributeComments::new().fields(FieldSpecs::names(["instance_type"])))
//!     .build();
//! let result = checker.run(&documents)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod field_spec;
mod locator;
pub mod module_attribute_comments;
mod presets;

#[cfg(test)]
mod fixture;

pub use field_spec::{FieldSpec, FieldSpecs};
pub use locator::{locate_blocks, NAME_LABEL};
pub use module_attribute_comments::ModuleAttributeComments;
pub use presets::{all_rules, checker_from_config, rules_from_config};

/// Re-export core types for convenience.
pub use comment_checker_core::{Diagnostic, Rule, Severity};
