//! Configuration types for comment-checker.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::Severity;

/// Top-level configuration for comment-checker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for a failing exit status (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// File discovery configuration.
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled, falling back to the rule's own default.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str, default: bool) -> bool {
        self.rules
            .get(rule_name)
            .and_then(|c| c.enabled)
            .unwrap_or(default)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block of a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Severity at or above which a check counts as failed.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Root directory to check (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File extensions to check, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns to exclude.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["tf".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/.terraform/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Decodes all rule-specific options into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rule`] if the options do not match `T`.
    pub fn decode_options<T: serde::de::DeserializeOwned>(
        &self,
        rule_name: &str,
    ) -> Result<T, ConfigError> {
        let table: toml::Table = self
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Rule {
                rule: rule_name.to_string(),
                message: e.to_string(),
            })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Rule options are malformed or contradictory.
    #[error("Invalid configuration for rule `{rule}`: {message}")]
    Rule {
        /// Rule the options belong to.
        rule: String,
        /// What is wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.checker.respect_gitignore);
        assert_eq!(config.checker.extensions, vec!["tf"]);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_threshold(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[checker]
root = "./infra"
exclude = ["**/generated/**"]

[rules.module-attribute-comments]
enabled = true
severity = "warning"
attribute_names = ["instance_type", "count"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.checker.root, PathBuf::from("./infra"));
        assert_eq!(config.checker.extensions, vec!["tf"]);
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert!(config.is_rule_enabled("module-attribute-comments", false));
        assert_eq!(
            config.rule_severity("module-attribute-comments"),
            Some(Severity::Warning)
        );

        let rule_config = config.rule("module-attribute-comments").unwrap();
        assert_eq!(
            rule_config.options.get("attribute_names"),
            Some(&toml::Value::Array(vec![
                toml::Value::from("instance_type"),
                toml::Value::from("count"),
            ]))
        );
    }

    #[test]
    fn rule_default_applies_when_unconfigured() {
        let config = Config::default();
        assert!(!config.is_rule_enabled("module-attribute-comments", false));
        assert!(config.is_rule_enabled("module-attribute-comments", true));
    }

    #[test]
    fn explicit_disable_wins_over_default() {
        let config = Config::parse("[rules.x]\nenabled = false\n").unwrap();
        assert!(!config.is_rule_enabled("x", true));
    }

    #[test]
    fn decode_options_reports_rule() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Opts {
            block_type: String,
        }

        let config = Config::parse("[rules.x]\nblock_type = 3\n").unwrap();
        let err = config.rule("x").unwrap().decode_options::<Opts>("x").unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration for rule `x`"));
    }

    #[test]
    fn invalid_severity_is_parse_error() {
        let err = Config::parse("[rules.x]\nseverity = \"fatal\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
