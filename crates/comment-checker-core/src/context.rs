//! Context types for rule execution.

use thiserror::Error;

use crate::document::{Block, BlockProvider, BlockQuery, ByteSource, ProviderError};
use crate::types::{Diagnostic, LintResult, Severity};

/// A diagnostic sink refused a submission.
#[derive(Debug, Error)]
#[error("failed to emit {code} diagnostic at {location}: {message}")]
pub struct SinkError {
    /// Code of the rejected diagnostic.
    pub code: String,
    /// Location of the rejected diagnostic (`file:line:column`).
    pub location: String,
    /// Why the sink rejected it.
    pub message: String,
}

impl SinkError {
    /// Creates an error for a rejected diagnostic.
    #[must_use]
    pub fn new(diagnostic: &Diagnostic, message: impl Into<String>) -> Self {
        Self {
            code: diagnostic.code.clone(),
            location: diagnostic.range.to_string(),
            message: message.into(),
        }
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagnostic cannot be delivered.
    fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError>;
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError> {
        self.push(diagnostic);
        Ok(())
    }
}

impl DiagnosticSink for LintResult {
    fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

/// Context provided to a rule for one check invocation.
///
/// Bundles the document capabilities, the diagnostic sink, and the severity
/// the rule should report at (its default or a configured override).
pub struct RuleContext<'a> {
    blocks: &'a dyn BlockProvider,
    bytes: &'a dyn ByteSource,
    sink: &'a mut dyn DiagnosticSink,
    severity: Severity,
}

impl<'a> RuleContext<'a> {
    /// Creates a new rule context.
    #[must_use]
    pub fn new(
        blocks: &'a dyn BlockProvider,
        bytes: &'a dyn ByteSource,
        sink: &'a mut dyn DiagnosticSink,
        severity: Severity,
    ) -> Self {
        Self {
            blocks,
            bytes,
            sink,
            severity,
        }
    }

    /// Effective severity for diagnostics of the running rule.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Queries blocks from the document provider.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub fn blocks(&self, query: &BlockQuery) -> Result<Vec<Block>, ProviderError> {
        self.blocks.blocks(query)
    }

    /// Raw bytes of a document.
    ///
    /// # Errors
    ///
    /// Propagates provider failures, including unknown file names.
    pub fn file_bytes(&self, filename: &str) -> Result<&'a [u8], ProviderError> {
        self.bytes.file_bytes(filename)
    }

    /// Submits a diagnostic to the sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if it rejects the diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError> {
        self.sink.emit(diagnostic)
    }
}
