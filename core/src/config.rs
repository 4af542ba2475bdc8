//! Rendering and conversion configuration.
//!
//! Values are provided by the host application. Every field has a default, so
//! a partial TOML document is enough:
//!
//! ```
//! use govuk_forms_core::FormsConfig;
//!
//! let config = FormsConfig::from_toml_str(r#"
//!     conversion_error_template = "{0} must be a valid date"
//!     item_id_separator = "-"
//! "#).unwrap();
//! assert_eq!(config.item_id_separator, "-");
//! ```

use crate::conversion_error::LABEL_PLACEHOLDER;
use crate::items::DatePart;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML for this structure.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Default `Day`/`Month`/`Year` labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLabels {
    /// Day label.
    pub day: String,
    /// Month label.
    pub month: String,
    /// Year label.
    pub year: String,
}

impl Default for ItemLabels {
    fn default() -> Self {
        Self {
            day: "Day".to_string(),
            month: "Month".to_string(),
            year: "Year".to_string(),
        }
    }
}

/// Configuration shared by every field in an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Replaces the converters' message template when set. Must contain `{0}`.
    pub conversion_error_template: Option<String>,

    /// Joins a field id and an item suffix.
    ///
    /// Default: `.`
    pub item_id_separator: String,

    /// Class added to an input in error.
    ///
    /// Default: `govuk-input--error`
    pub error_class: String,

    /// Screen-reader prefix for error messages.
    ///
    /// Default: `Error`
    pub error_visually_hidden_text: String,

    /// Default item labels.
    pub item_labels: ItemLabels,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            conversion_error_template: None,
            item_id_separator: ".".to_string(),
            error_class: "govuk-input--error".to_string(),
            error_visually_hidden_text: "Error".to_string(),
            item_labels: ItemLabels::default(),
        }
    }
}

impl FormsConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(template) = &self.conversion_error_template {
            if !template.contains(LABEL_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "conversion_error_template must contain {LABEL_PLACEHOLDER}"
                )));
            }
        }
        if self.item_id_separator.is_empty() {
            return Err(ConfigError::Validation(
                "item_id_separator cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the conversion error template.
    #[must_use]
    pub fn with_conversion_error_template(mut self, template: impl Into<String>) -> Self {
        self.conversion_error_template = Some(template.into());
        self
    }

    /// Set the item id separator.
    #[must_use]
    pub fn with_item_id_separator(mut self, separator: impl Into<String>) -> Self {
        self.item_id_separator = separator.into();
        self
    }

    /// Set the error class.
    #[must_use]
    pub fn with_error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    /// The default label for `part`.
    #[must_use]
    pub fn item_label(&self, part: DatePart) -> &str {
        match part {
            DatePart::Day => &self.item_labels.day,
            DatePart::Month => &self.item_labels.month,
            DatePart::Year => &self.item_labels.year,
        }
    }

    /// The generated id of `part` within a field whose id is `field_id`.
    #[must_use]
    pub fn item_id(&self, field_id: &str, part: DatePart) -> String {
        format!("{field_id}{}{}", self.item_id_separator, part.suffix())
    }
}

/// The wire name of `part` within a field named `name`, e.g. `dob.Day`.
#[must_use]
pub fn item_name(name: &str, part: DatePart) -> String {
    format!("{name}.{}", part.suffix())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormsConfig::default();
        assert_eq!(config.conversion_error_template, None);
        assert_eq!(config.item_id_separator, ".");
        assert_eq!(config.error_class, "govuk-input--error");
        assert_eq!(config.item_label(DatePart::Month), "Month");
        assert_eq!(config.item_id("dob", DatePart::Year), "dob.Year");
    }

    #[test]
    fn test_config_builder() {
        let config = FormsConfig::new()
            .with_conversion_error_template("Enter a real {0}")
            .with_item_id_separator("-")
            .with_error_class("app-error");
        assert_eq!(config.item_id("dob", DatePart::Day), "dob-Day");
        assert_eq!(config.error_class, "app-error");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = FormsConfig::from_toml_str(
            r#"
            error_visually_hidden_text = "Gwall"

            [item_labels]
            day = "Diwrnod"
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.error_visually_hidden_text, "Gwall");
        assert_eq!(config.item_label(DatePart::Day), "Diwrnod");
        assert_eq!(config.item_label(DatePart::Year), "Year");
    }

    #[test]
    fn test_from_toml_rejects_template_without_placeholder() {
        let err = FormsConfig::from_toml_str(r#"conversion_error_template = "Bad date""#)
            .expect_err("missing placeholder");
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_from_toml_rejects_malformed() {
        let err = FormsConfig::from_toml_str("item_id_separator = ").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_item_name() {
        assert_eq!(item_name("DateOfBirth", DatePart::Day), "DateOfBirth.Day");
    }
}
