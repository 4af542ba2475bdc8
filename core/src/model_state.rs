//! In-memory validation state for one submission.
//!
//! `ModelState` is where binders record errors and where resolvers look them
//! up. It serializes with serde, so a host can carry it across a
//! post/redirect/get round-trip and still re-derive per-item errors.

use crate::conversion_error::ConversionError;
use crate::sources::ValidationState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One recorded validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelError {
    /// User-facing message.
    pub message: String,
    /// Structured details when the error came from a failed conversion.
    pub conversion: Option<ConversionError>,
}

/// An entry for the error summary: which input to link to and what to say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSummaryEntry {
    /// Fragment link, e.g. `#DateOfBirth.Day`.
    pub href: String,
    /// The message shown in the summary.
    pub message: String,
}

/// Validation errors keyed by wire name, in the order first recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelState {
    entries: IndexMap<String, Vec<ModelError>>,
}

impl ModelState {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a plain validation error against `name`.
    pub fn add_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.entries.entry(name.into()).or_default().push(ModelError {
            message: message.into(),
            conversion: None,
        });
    }

    /// Record a conversion failure against `name`, labelled for display.
    pub fn add_conversion_error(
        &mut self,
        name: impl Into<String>,
        error: ConversionError,
        label: &str,
    ) {
        let message = error.message(label);
        self.entries.entry(name.into()).or_default().push(ModelError {
            message,
            conversion: Some(error),
        });
    }

    /// Whether no errors are recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Total number of recorded errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Errors recorded against `name`.
    #[must_use]
    pub fn errors(&self, name: &str) -> &[ModelError] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Remove every error recorded against `name`.
    pub fn clear(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    /// One summary entry per errored name, linking to `href_for(name)`.
    ///
    /// Date inputs should link to their first errored item rather than the
    /// name itself; pass a closure that knows those ids.
    pub fn summary(&self, mut href_for: impl FnMut(&str) -> String) -> Vec<ErrorSummaryEntry> {
        self.entries
            .iter()
            .filter_map(|(name, errors)| {
                errors.first().map(|error| ErrorSummaryEntry {
                    href: href_for(name),
                    message: error.message.clone(),
                })
            })
            .collect()
    }
}

impl ValidationState for ModelState {
    fn has_errors(&self, name: &str) -> bool {
        !self.errors(name).is_empty()
    }

    fn conversion_error(&self, name: &str) -> Option<&ConversionError> {
        self.errors(name)
            .iter()
            .find_map(|error| error.conversion.as_ref())
    }

    fn first_error_message(&self, name: &str) -> Option<&str> {
        self.errors(name).first().map(|error| error.message.as_str())
    }
}
