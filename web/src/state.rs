//! Shared state for form handlers.
//!
//! Everything here is built once at start-up and then only read, so it is
//! shared behind `Arc`s and cloned cheaply into each request.

use govuk_forms_core::{ConverterRegistry, DisplayMetadata, FormsConfig};
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;

/// Display names and descriptions for the fields a service renders.
///
/// Deserializes from a table keyed by wire name:
///
/// ```
/// use govuk_forms_web::FieldCatalog;
/// use govuk_forms_core::DisplayMetadata;
///
/// let catalog: FieldCatalog = serde_json::from_str(
///     r#"{ "DateOfBirth": { "display_name": "Date of birth" } }"#,
/// )
/// .unwrap();
/// assert_eq!(catalog.display_name("DateOfBirth").as_deref(), Some("Date of birth"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: IndexMap<String, FieldInfo>,
}

/// Catalogue entry for one field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldInfo {
    /// Name used in labels, legends and error messages.
    pub display_name: String,
    /// Used as the hint when none is declared.
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldCatalog {
    /// An empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldInfo {
                display_name: display_name.into(),
                description: None,
            },
        );
        self
    }

    /// Add a field with a description.
    #[must_use]
    pub fn with_described_field(
        mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldInfo {
                display_name: display_name.into(),
                description: Some(description.into()),
            },
        );
        self
    }

    /// The entry for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }
}

impl DisplayMetadata for FieldCatalog {
    fn display_name(&self, name: &str) -> Option<String> {
        self.get(name).map(|info| info.display_name.clone())
    }

    fn description(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|info| info.description.clone())
    }
}

/// Application state shared across all form handlers.
#[derive(Clone)]
pub struct FormsState {
    /// Process-wide converter registry.
    pub registry: Arc<ConverterRegistry>,
    /// Rendering and binding options.
    pub config: Arc<FormsConfig>,
    /// Field display metadata.
    pub catalog: Arc<FieldCatalog>,
}

impl Default for FormsState {
    fn default() -> Self {
        Self::new(
            ConverterRegistry::with_defaults(),
            FormsConfig::default(),
            FieldCatalog::default(),
        )
    }
}

impl FormsState {
    /// Create the shared state.
    #[must_use]
    pub fn new(registry: ConverterRegistry, config: FormsConfig, catalog: FieldCatalog) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
