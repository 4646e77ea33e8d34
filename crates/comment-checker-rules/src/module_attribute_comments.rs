//! Rule to require a comment directly above selected module arguments.
//!
//! # Rationale
//!
//! Overriding a module input is a decision someone made for a reason. A
//! comment on the line above the argument keeps that reason next to the
//! value, where reviewers and future editors will see it.
//!
//! # Detected Patterns
//!
//! ```hcl
//! module "example" {
//!   source        = "./modules/example"
//!   instance_type = "t2.micro"
//! }
//! ```
//!
//! # Good Patterns
//!
//! ```hcl
//! module "example" {
//!   source = "./modules/example"
//!   # Burst capacity is enough for the nightly batch.
//!   instance_type = "t2.micro"
//! }
//! ```

use comment_checker_core::utils::comments::is_preceded_by_comment;
use comment_checker_core::{
    Block, CheckError, ConfigError, Diagnostic, Rule, RuleConfig, RuleContext, Severity,
    Suggestion,
};
use tracing::{debug, warn};

use crate::field_spec::{FieldSpec, FieldSpecs, RuleOptionsDto};
use crate::locator::locate_blocks;

/// Rule code for module-attribute-comments.
pub const CODE: &str = "CC001";

/// Rule name for module-attribute-comments.
pub const NAME: &str = "module-attribute-comments";

/// Documentation reference attached to diagnostics.
pub const LINK: &str = "README.md#module-attribute-comments";

/// Block type inspected unless configured otherwise.
pub const DEFAULT_BLOCK_TYPE: &str = "module";

/// Requires configured attributes of `module` blocks to have a comment on the
/// line directly above them.
#[derive(Debug, Clone)]
pub struct ModuleAttributeComments {
    block_type: String,
    fields: Vec<FieldSpec>,
}

impl Default for ModuleAttributeComments {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleAttributeComments {
    /// Creates the rule for `module` blocks with no attributes configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_type: DEFAULT_BLOCK_TYPE.to_string(),
            fields: Vec::new(),
        }
    }

    /// Sets the block type to inspect.
    #[must_use]
    pub fn block_type(mut self, block_type: impl Into<String>) -> Self {
        self.block_type = block_type.into();
        self
    }

    /// Replaces the configured fields.
    #[must_use]
    pub fn fields(mut self, fields: FieldSpecs) -> Self {
        self.fields = fields.into_specs();
        self
    }

    /// Appends one field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the rule from its `[rules.module-attribute-comments]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rule`] for unknown options or when both
    /// configuration shapes are used at once.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let options: RuleOptionsDto = config.decode_options(NAME)?;
        let block_type = options
            .block_type
            .clone()
            .unwrap_or_else(|| DEFAULT_BLOCK_TYPE.to_string());
        let fields = options.field_specs().map_err(|message| ConfigError::Rule {
            rule: NAME.to_string(),
            message,
        })?;
        Ok(Self::new().block_type(block_type).fields(fields))
    }

    /// Configured fields, in evaluation order.
    #[must_use]
    pub fn configured_fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Emits a diagnostic for every configured attribute that lacks a
    /// comment, visiting blocks in order and fields in configured order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file's bytes cannot be retrieved or the sink
    /// rejects a diagnostic.
    pub fn evaluate(&self, blocks: &[Block], ctx: &mut RuleContext<'_>) -> Result<(), CheckError> {
        for block in blocks {
            for field in &self.fields {
                let Some(attribute) = block.attribute(&field.name) else {
                    continue;
                };

                let bytes = ctx.file_bytes(&attribute.range.filename).map_err(|e| {
                    CheckError::document(
                        format!("reading {} for `{}`", attribute.range.filename, field.name),
                        e,
                    )
                })?;

                if is_preceded_by_comment(attribute, bytes) {
                    continue;
                }

                debug!(
                    "`{}` in {} \"{}\" has no comment at {}",
                    field.name,
                    block.block_type,
                    block.label(),
                    attribute.range
                );

                let severity = ctx.severity();
                ctx.emit(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        severity,
                        attribute.range.clone(),
                        self.message(block, field),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Add a `#` comment on the line directly above `{}`",
                        field.name
                    )))
                    .with_link(LINK),
                )?;
            }
        }
        Ok(())
    }

    fn message(&self, block: &Block, field: &FieldSpec) -> String {
        let mut message = format!(
            "{} in {} \"{}\" should have a comment",
            field.name,
            self.block_type,
            block.label()
        );
        if !field.message.is_empty() {
            message.push_str(". ");
            message.push_str(&field.message);
        }
        message
    }
}

impl Rule for ModuleAttributeComments {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a comment directly above configured module arguments"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn link(&self) -> Option<&'static str> {
        Some(LINK)
    }

    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), CheckError> {
        if self.fields.is_empty() {
            warn!("{NAME} is enabled, but no attributes were configured");
            return Ok(());
        }

        let blocks = locate_blocks(ctx, &self.block_type)?;
        self.evaluate(&blocks, ctx)
    }
}
