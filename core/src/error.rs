//! Configuration errors.
//!
//! These describe mistakes in how a host application declares its fields:
//! out-of-order or duplicate declarations, conflicting explicit values, or a
//! domain type with no registered converter. They are not user-facing; data
//! errors in submitted text are [`ConversionError`](crate::ConversionError)s.

use crate::element::{ElementId, FieldKind};
use crate::items::DatePart;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// A structural problem in a field's declarations or setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    // ═══════════════════════════════════════════════════════════
    // Ordering and cardinality
    // ═══════════════════════════════════════════════════════════

    /// The same element was declared twice.
    #[error("Only one {element} element is permitted (already declared by {existing})")]
    DuplicateElement {
        /// The second declaration.
        element: ElementId,
        /// The first declaration.
        existing: ElementId,
    },

    /// An element was declared after one that must follow it.
    #[error("{element} must be specified before {existing}")]
    MustBeDeclaredBefore {
        /// The late declaration.
        element: ElementId,
        /// The already-present declaration that should have come after it.
        existing: ElementId,
    },

    /// Two elements that cannot both appear in one field.
    #[error("{element} cannot be specified when {existing} is present")]
    MutuallyExclusive {
        /// The rejected declaration.
        element: ElementId,
        /// The conflicting declaration.
        existing: ElementId,
    },

    /// An element was declared inside an open group where it is not allowed.
    #[error("{element} must not be specified inside {group}")]
    InsideGroup {
        /// The rejected declaration.
        element: ElementId,
        /// The open group.
        group: ElementId,
    },

    /// An element that only belongs inside a group was declared outside one.
    #[error("{element} must be specified inside {group}")]
    OutsideGroup {
        /// The rejected declaration.
        element: ElementId,
        /// The group it belongs in.
        group: ElementId,
    },

    /// A group was closed without being opened.
    #[error("{group} was closed without being opened")]
    GroupNotOpen {
        /// The group.
        group: ElementId,
    },

    /// A traversal ended with a group still open.
    #[error("{group} was opened but never closed")]
    GroupNotClosed {
        /// The group.
        group: ElementId,
    },

    /// A declaration that does not belong to the field kind.
    #[error("{declaration} is not supported by {kind:?} fields")]
    UnsupportedDeclaration {
        /// The field kind.
        kind: FieldKind,
        /// Short name of the declaration.
        declaration: &'static str,
    },

    // ═══════════════════════════════════════════════════════════
    // Values
    // ═══════════════════════════════════════════════════════════

    /// Both the field and one of its items carry an explicit value.
    #[error("Value cannot be specified for both the date input and its {part} item")]
    ValueConflict {
        /// The item with the explicit value.
        part: DatePart,
    },

    /// An explicit set of error items was empty.
    #[error("Error items cannot be empty")]
    EmptyErrorItems,

    /// A conversion error was constructed with no failing sub-fields.
    #[error("A conversion error must identify at least one failing item")]
    EmptyConversionError,

    // ═══════════════════════════════════════════════════════════
    // Conversion
    // ═══════════════════════════════════════════════════════════

    /// No converter is registered for the bound domain type.
    #[error("No converter registered for {type_name}")]
    NoConverter {
        /// The domain type's name.
        type_name: &'static str,
    },
}

/// Every configuration error found while applying a sequence of declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} configuration error(s){}", .0.len(), bulleted(.0))]
pub struct ConfigurationErrors(Vec<ConfigurationError>);

fn bulleted(errors: &[ConfigurationError]) -> String {
    errors.iter().map(|error| format!("\n  - {error}")).collect()
}

impl ConfigurationErrors {
    /// Wrap a non-empty list of errors.
    #[must_use]
    pub const fn new(errors: Vec<ConfigurationError>) -> Self {
        Self(errors)
    }

    /// The collected errors in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[ConfigurationError] {
        &self.0
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the inner list.
    #[must_use]
    pub fn into_inner(self) -> Vec<ConfigurationError> {
        self.0
    }
}

impl From<ConfigurationError> for ConfigurationErrors {
    fn from(error: ConfigurationError) -> Self {
        Self(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_must_be_declared_before_display() {
        let err = ConfigurationError::MustBeDeclaredBefore {
            element: FieldKind::DateInput.element(ElementKind::Hint),
            existing: FieldKind::DateInput.element(ElementKind::ErrorMessage),
        };
        assert_eq!(
            err.to_string(),
            "<govuk-date-input-hint> must be specified before <govuk-date-input-error-message>"
        );
    }

    #[test]
    fn test_no_converter_display() {
        let err = ConfigurationError::NoConverter { type_name: "u64" };
        assert_eq!(err.to_string(), "No converter registered for u64");
    }

    #[test]
    fn test_aggregate_display_lists_each_error() {
        let errors = ConfigurationErrors::new(vec![
            ConfigurationError::EmptyErrorItems,
            ConfigurationError::ValueConflict {
                part: DatePart::Month,
            },
        ]);
        let text = errors.to_string();
        assert!(text.starts_with("2 configuration error(s)"));
        assert!(text.contains("Error items cannot be empty"));
        assert!(text.contains("its Month item"));
    }
}
