//! Configured attributes that must carry a comment.
//!
//! Two configuration shapes are accepted and normalize to the same ordered
//! list of [`FieldSpec`]s:
//!
//! ```toml
//! [rules.module-attribute-comments]
//! attribute_names = ["instance_type", "count"]
//! message = "Explain why the default is overridden."
//! ```
//!
//! ```toml
//! [[rules.module-attribute-comments.attribute]]
//! name = "instance_type"
//! message = "Must explain override."
//!
//! [[rules.module-attribute-comments.attribute]]
//! name = "count"
//! ```

use serde::Deserialize;

/// One attribute that must be documented, with an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute name.
    pub name: String,
    /// Explanation appended to diagnostics; empty when not configured.
    pub message: String,
}

impl FieldSpec {
    /// Creates a field without an explanation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: String::new(),
        }
    }

    /// Sets the explanation.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// The two configuration shapes for field specifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpecs {
    /// A flat list of names sharing one message.
    Names {
        /// Attribute names, in order.
        names: Vec<String>,
        /// Message shared by every name; may be empty.
        message: String,
    },
    /// Explicit name/message pairs.
    Explicit(Vec<FieldSpec>),
}

impl Default for FieldSpecs {
    fn default() -> Self {
        Self::Explicit(Vec::new())
    }
}

impl FieldSpecs {
    /// Flat form without a shared message.
    #[must_use]
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names {
            names: names.into_iter().map(Into::into).collect(),
            message: String::new(),
        }
    }

    /// Explicit form.
    #[must_use]
    pub fn explicit(specs: Vec<FieldSpec>) -> Self {
        Self::Explicit(specs)
    }

    /// Normalizes into the ordered list the evaluator walks.
    ///
    /// Duplicates are kept.
    #[must_use]
    pub fn into_specs(self) -> Vec<FieldSpec> {
        match self {
            Self::Names { names, message } => names
                .into_iter()
                .map(|name| FieldSpec::new(name).with_message(message.clone()))
                .collect(),
            Self::Explicit(specs) => specs,
        }
    }
}

/// Raw options of the `module-attribute-comments` rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuleOptionsDto {
    /// Block type to inspect.
    #[serde(default)]
    pub block_type: Option<String>,
    /// Flat form names.
    #[serde(default)]
    pub attribute_names: Option<Vec<String>>,
    /// Flat form shared message.
    #[serde(default)]
    pub message: Option<String>,
    /// Explicit form entries.
    #[serde(default)]
    pub attribute: Option<Vec<FieldSpecDto>>,
}

/// One `[[...attribute]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FieldSpecDto {
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RuleOptionsDto {
    /// Picks the configuration shape, rejecting mixed forms.
    pub(crate) fn field_specs(self) -> Result<FieldSpecs, String> {
        match (self.attribute_names, self.attribute) {
            (Some(_), Some(_)) => {
                Err("`attribute_names` and `attribute` cannot be used together".to_string())
            }
            (Some(names), None) => Ok(FieldSpecs::Names {
                names,
                message: self.message.unwrap_or_default(),
            }),
            (None, attribute) => {
                if self.message.is_some() {
                    return Err("`message` requires `attribute_names`".to_string());
                }
                Ok(FieldSpecs::Explicit(
                    attribute
                        .unwrap_or_default()
                        .into_iter()
                        .map(|a| FieldSpec {
                            name: a.name,
                            message: a.message.unwrap_or_default(),
                        })
                        .collect(),
                ))
            }
        }
    }
}
