//! Configuration
//!
//! Behavioural settings have no defaults: the tag limit must always be
//! supplied. Only the chip markup template falls back to
//! [`DEFAULT_CHIP_TEMPLATE`].

use std::{fs, num::NonZeroUsize, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::render::{CLASS_PLACEHOLDER, VALUE_PLACEHOLDER};

/// Markup used for each chip unless the configuration overrides it.
pub const DEFAULT_CHIP_TEMPLATE: &str = r#"<div class="tag-item {{class}}" data-value="{{value}}">{{value}}<span class="action-del"> X </span></div>"#;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error, including a zero `limit`
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The chip template cannot show the tag value
    #[error("chip template must contain the {{{{value}}}} placeholder")]
    TemplateMissingValue,
}

/// Tag input widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagInputConfig {
    /// Maximum number of tags.
    pub limit: NonZeroUsize,

    /// Extra CSS class substituted into each chip.
    #[serde(default)]
    pub tag_class: Option<String>,

    /// Chip markup with `{{value}}` and optional `{{class}}` placeholders.
    #[serde(default = "default_chip_template")]
    pub chip_template: String,
}

fn default_chip_template() -> String {
    DEFAULT_CHIP_TEMPLATE.to_string()
}

impl TagInputConfig {
    /// Configuration with the given limit, no tag class and the default template.
    #[must_use]
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            limit,
            tag_class: None,
            chip_template: default_chip_template(),
        }
    }

    /// Set the CSS class used for chips.
    #[must_use]
    pub fn with_tag_class(mut self, tag_class: impl Into<String>) -> Self {
        self.tag_class = Some(tag_class.into());
        self
    }

    /// Replace the chip template.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TemplateMissingValue`] if the template does not
    /// reference the tag value.
    pub fn with_chip_template(mut self, template: impl Into<String>) -> Result<Self, ConfigError> {
        self.chip_template = template.into();
        self.validate()?;

        Ok(self)
    }

    /// Parse and validate configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML is malformed, `limit` is missing
    /// or zero, or the template is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check invariants that deserialization alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TemplateMissingValue`] if the template does not
    /// contain the value placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.chip_template.contains(VALUE_PLACEHOLDER) {
            return Err(ConfigError::TemplateMissingValue);
        }

        Ok(())
    }

    /// Whether the template styles chips with the tag class.
    pub fn uses_tag_class(&self) -> bool {
        self.chip_template.contains(CLASS_PLACEHOLDER)
    }
}
