//! Contracts for the request data the engine reads.
//!
//! All external inputs are abstracted behind traits and passed in, so the
//! engine itself does no I/O:
//! - [`SubmittedValues`]: raw text previously posted under a wire name
//! - [`DisplayMetadata`]: display label and description for a binding
//! - [`ValidationState`]: validation errors recorded against a wire name

use crate::conversion_error::ConversionError;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Source of previously submitted form values.
pub trait SubmittedValues {
    /// Every value submitted under `name`, in submission order.
    fn values(&self, name: &str) -> Vec<&str>;

    /// The first value submitted under `name`.
    fn value(&self, name: &str) -> Option<&str> {
        self.values(name).into_iter().next()
    }

    /// Whether anything was submitted under `name`.
    fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }
}

impl SubmittedValues for HashMap<String, String> {
    fn values(&self, name: &str) -> Vec<&str> {
        self.get(name).map(String::as_str).into_iter().collect()
    }
}

impl SubmittedValues for IndexMap<String, String> {
    fn values(&self, name: &str) -> Vec<&str> {
        self.get(name).map(String::as_str).into_iter().collect()
    }
}

impl SubmittedValues for [(String, String)] {
    fn values(&self, name: &str) -> Vec<&str> {
        self.iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl SubmittedValues for Vec<(String, String)> {
    fn values(&self, name: &str) -> Vec<&str> {
        self.as_slice().values(name)
    }
}

/// A request with no submitted form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubmission;

impl SubmittedValues for NoSubmission {
    fn values(&self, _name: &str) -> Vec<&str> {
        Vec::new()
    }
}

/// Source of human-readable names for bindings.
pub trait DisplayMetadata {
    /// The display label for the field bound to `name`.
    fn display_name(&self, name: &str) -> Option<String>;

    /// The description (used as hint) for the field bound to `name`.
    fn description(&self, name: &str) -> Option<String> {
        let _ = name;
        None
    }
}

/// Metadata source that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl DisplayMetadata for NoMetadata {
    fn display_name(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Source of validation errors.
pub trait ValidationState {
    /// Whether any error is recorded against `name`.
    fn has_errors(&self, name: &str) -> bool;

    /// The structured conversion error recorded against `name`, if the error
    /// came from a failed conversion.
    fn conversion_error(&self, name: &str) -> Option<&ConversionError>;

    /// The first error message recorded against `name`.
    fn first_error_message(&self, name: &str) -> Option<&str>;
}

/// Validation state with nothing recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoErrors;

impl ValidationState for NoErrors {
    fn has_errors(&self, _name: &str) -> bool {
        false
    }

    fn conversion_error(&self, _name: &str) -> Option<&ConversionError> {
        None
    }

    fn first_error_message(&self, _name: &str) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_keep_every_value() {
        let pairs = vec![
            ("colour".to_string(), "red".to_string()),
            ("size".to_string(), "large".to_string()),
            ("colour".to_string(), "blue".to_string()),
        ];
        assert_eq!(pairs.values("colour"), vec!["red", "blue"]);
        assert_eq!(pairs.value("size"), Some("large"));
        assert!(!pairs.contains("weight"));
    }

    #[test]
    fn test_map_sources() {
        let mut map = HashMap::new();
        map.insert("dob.Day".to_string(), "1".to_string());
        assert_eq!(map.value("dob.Day"), Some("1"));
        assert_eq!(map.value("dob.Month"), None);
        assert!(NoSubmission.values("dob.Day").is_empty());
    }
}
