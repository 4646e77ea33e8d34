//! Rule trait for defining checks.

use crate::checker::CheckError;
use crate::context::RuleContext;
use crate::types::Severity;

/// A check run against the documents of one invocation.
///
/// Rules pull blocks and file bytes through the [`RuleContext`] and push
/// diagnostics back into it. They hold their own configuration and keep no
/// state between invocations.
///
/// # Example
///
/// ```ignore
/// use comment_checker_core::{BlockQuery, CheckError, Rule, RuleContext};
///
/// pub struct NoEmptyModules;
///
/// impl Rule for NoEmptyModules {
///     fn name(&self) -> &'static str { "no-empty-modules" }
///     fn code(&self) -> &'static str { "CC900" }
///
///     fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), CheckError> {
///         let query = BlockQuery::new("module").label("name");
///         let blocks = ctx
///             .blocks(&query)
///             .map_err(|e| CheckError::document("locating modules", e))?;
///         for block in blocks {
///             // ...
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "module-attribute-comments").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CC001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the rule runs when the configuration does not mention it.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Reference to the rule's documentation, if any.
    fn link(&self) -> Option<&'static str> {
        None
    }

    /// Runs the rule, emitting diagnostics through `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if document retrieval or diagnostic submission
    /// fails. Diagnostics emitted before the failure stay in the sink.
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), CheckError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
