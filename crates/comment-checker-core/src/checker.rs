//! Checker that runs rules against a document provider.

use crate::config::{Config, ConfigError};
use crate::context::{DiagnosticSink, RuleContext, SinkError};
use crate::document::{BlockProvider, ByteSource, ProviderError};
use crate::rule::{Rule, RuleBox};
use crate::types::LintResult;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a check invocation.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration could not be decoded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Blocks or file contents could not be retrieved.
    #[error("Document retrieval failed while {stage}: {source}")]
    Document {
        /// What the checker was doing (e.g., "locating `module` blocks").
        stage: String,
        /// Provider failure.
        source: ProviderError,
    },

    /// The diagnostic sink rejected a diagnostic.
    #[error("Diagnostic submission failed: {0}")]
    Sink(#[from] SinkError),
}

impl CheckError {
    /// Wraps a provider failure with the stage it happened in.
    #[must_use]
    pub fn document(stage: impl Into<String>, source: ProviderError) -> Self {
        Self::Document {
            stage: stage.into(),
            source,
        }
    }
}

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the checker.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used for severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the checker.
    #[must_use]
    pub fn build(self) -> Checker {
        Checker {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Runs an explicit list of rules over one set of documents.
///
/// Rules run in the order they were added; each rule visits blocks in
/// document order, so the diagnostic sequence is reproducible.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the registered rules, in run order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule, emitting diagnostics into `sink`.
    ///
    /// # Errors
    ///
    /// Stops at the first rule failure. Diagnostics emitted before it stay in
    /// the sink.
    pub fn check(
        &self,
        blocks: &dyn BlockProvider,
        bytes: &dyn ByteSource,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CheckError> {
        for rule in &self.rules {
            let severity = self
                .config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity());
            debug!("Running rule {} ({}) at {}", rule.name(), rule.code(), severity);

            let mut ctx = RuleContext::new(blocks, bytes, &mut *sink, severity);
            rule.check(&mut ctx)?;
        }
        Ok(())
    }

    /// Runs every rule and collects the diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the first rule failure.
    pub fn run<D>(&self, documents: &D) -> Result<LintResult, CheckError>
    where
        D: BlockProvider + ByteSource,
    {
        let mut result = LintResult::new();
        self.check(documents, documents, &mut result)?;
        info!(
            "Check complete: {} diagnostic(s) from {} rule(s)",
            result.diagnostics.len(),
            self.rules.len()
        );
        Ok(result)
    }
}
