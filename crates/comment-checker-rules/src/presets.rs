//! Builds rule lists from configuration.

use crate::module_attribute_comments::NAME;
use crate::ModuleAttributeComments;
use comment_checker_core::{CheckError, Checker, Config, ConfigError, Rule, RuleBox};
use tracing::debug;

/// Returns every available rule with its default settings.
///
/// Useful for listing rules; rules that need options (such as
/// `module-attribute-comments`) do nothing until configured.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ModuleAttributeComments::new())]
}

/// Builds the rules enabled by `config`, decoding each rule's options.
///
/// A rule runs when its `enabled` flag is set, or when the flag is absent and
/// the rule is enabled by default.
///
/// # Errors
///
/// Returns [`ConfigError::Rule`] if an enabled rule's options are invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let mut rules: Vec<RuleBox> = Vec::new();

    let default = ModuleAttributeComments::new();
    if config.is_rule_enabled(NAME, default.enabled_by_default()) {
        let rule = match config.rule(NAME) {
            Some(rule_config) => ModuleAttributeComments::from_config(rule_config)?,
            None => default,
        };
        debug!(
            "Enabled {} with {} field(s)",
            NAME,
            rule.configured_fields().len()
        );
        rules.push(Box::new(rule));
    }

    Ok(rules)
}

/// Builds a checker running the rules enabled in `config`, with its
/// severity overrides applied.
///
/// # Errors
///
/// Returns [`CheckError::Config`] if an enabled rule's options are invalid.
pub fn checker_from_config(config: Config) -> Result<Checker, CheckError> {
    let rules = rules_from_config(&config)?;
    Ok(Checker::builder().rules(rules).config(config).build())
}
