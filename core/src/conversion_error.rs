//! Per-sub-field conversion failures.

use crate::error::ConfigurationError;
use crate::items::{DateInputItems, DatePart};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message template used when no other template is configured.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "{0} must be a real date";

/// Placeholder substituted with the field's display label.
pub const LABEL_PLACEHOLDER: &str = "{0}";

/// Which sub-fields of a submitted date could not be converted.
///
/// Never empty: at least one of day, month or year is always flagged. The
/// error is data, not a fault; it is attached to validation state and rendered
/// next to the offending inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(try_from = "RawConversionError")]
#[error("conversion failed for {fields:?}")]
pub struct ConversionError {
    fields: DateInputItems,
    template: String,
}

/// Wire form of [`ConversionError`], checked on the way in.
#[derive(Deserialize)]
struct RawConversionError {
    fields: DateInputItems,
    template: String,
}

impl TryFrom<RawConversionError> for ConversionError {
    type Error = ConfigurationError;

    fn try_from(raw: RawConversionError) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.fields)?.with_template(raw.template))
    }
}

impl ConversionError {
    /// Create an error flagging `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyConversionError`] if `fields` is empty.
    pub fn new(fields: DateInputItems) -> Result<Self, ConfigurationError> {
        if fields.is_empty() {
            return Err(ConfigurationError::EmptyConversionError);
        }
        Ok(Self::flagging(fields))
    }

    /// Succeed if `failed` is empty, otherwise fail with exactly those fields.
    ///
    /// This is the usual way for a converter to finish its checks.
    ///
    /// # Errors
    ///
    /// Returns a `ConversionError` when any field failed.
    pub fn check(failed: DateInputItems) -> Result<(), Self> {
        if failed.is_empty() {
            Ok(())
        } else {
            Err(Self::flagging(failed))
        }
    }

    /// Callers guarantee `fields` is non-empty.
    pub(crate) fn flagging(fields: DateInputItems) -> Self {
        debug_assert!(!fields.is_empty());
        Self {
            fields,
            template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
        }
    }

    /// Replace the message template. It should contain `{0}`.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// The failing sub-fields.
    #[must_use]
    pub const fn fields(&self) -> DateInputItems {
        self.fields
    }

    /// Whether `part` failed.
    #[must_use]
    pub const fn contains(&self, part: DatePart) -> bool {
        self.fields.contains(part.flag())
    }

    /// The message template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The user-facing message for a field labelled `label`.
    #[must_use]
    pub fn message(&self, label: &str) -> String {
        self.template.replace(LABEL_PLACEHOLDER, label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_configuration_error() {
        assert_eq!(
            ConversionError::new(DateInputItems::empty()),
            Err(ConfigurationError::EmptyConversionError)
        );
    }

    #[test]
    fn test_message_substitutes_label() {
        let err = ConversionError::new(DateInputItems::DAY | DateInputItems::MONTH)
            .expect("non-empty");
        assert_eq!(err.message("Date of birth"), "Date of birth must be a real date");
        assert!(err.contains(DatePart::Day));
        assert!(!err.contains(DatePart::Year));
    }

    #[test]
    fn test_check() {
        assert!(ConversionError::check(DateInputItems::empty()).is_ok());
        let err = ConversionError::check(DateInputItems::YEAR).expect_err("year failed");
        assert_eq!(err.fields(), DateInputItems::YEAR);
    }

    #[test]
    fn test_custom_template() {
        let err = ConversionError::new(DateInputItems::YEAR)
            .expect("non-empty")
            .with_template("Enter a valid {0}");
        assert_eq!(err.message("start date"), "Enter a valid start date");
    }

    #[test]
    fn test_serde_round_trip_keeps_fields() {
        let err = ConversionError::new(DateInputItems::MONTH).expect("non-empty");
        let json = serde_json::to_string(&err).expect("serialize");
        let back: ConversionError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, err);
    }

    #[test]
    fn test_deserializing_empty_fields_fails() {
        let json = r#"{"fields":"","template":"{0} must be a real date"}"#;
        let result = serde_json::from_str::<ConversionError>(json);
        assert!(result.is_err());
    }
}
