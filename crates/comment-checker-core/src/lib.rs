//! # comment-checker-core
//!
//! Core framework for checking that configuration attributes carry
//! documentation comments.
//!
//! This crate provides the foundational types and traits:
//!
//! - [`BlockProvider`] and [`ByteSource`] capability traits a host implements
//!   to expose parsed blocks and raw file bytes
//! - [`Rule`] trait for checks and [`Checker`] for running them
//! - [`DiagnosticSink`] receiving [`Diagnostic`]s
//! - [`utils::comments`] with the comment adjacency detector
//!
//! ## Example
//!
//! ```ignore
//! use comment_checker_core::{Checker, MemoryDocuments};
//!
//! let checker = Checker::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = checker.run(&documents)?;
//! for diagnostic in &result.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod context;
mod document;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use checker::{CheckError, Checker, CheckerBuilder};
pub use config::{CheckerConfig, Config, ConfigError, RuleConfig};
pub use context::{DiagnosticSink, RuleContext, SinkError};
pub use document::{
    Attribute, Block, BlockProvider, BlockQuery, ByteSource, Document, LineIndex,
    MemoryDocuments, ProviderError,
};
pub use rule::{Rule, RuleBox};
pub use types::{
    Diagnostic, DiagnosticReport, LintResult, Position, Severity, SourceRange, Suggestion,
};
